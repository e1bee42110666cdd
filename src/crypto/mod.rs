//! Chromium cookie-value decryption.
//!
//! Chromium encrypts cookie values with a per-platform secret:
//!
//! - **Linux**: AES-128-CBC. `v10` values use a key derived from the fixed password
//!   `peanuts`; `v11` values use a key derived from a password kept in the desktop
//!   keyring (Secret Service), falling back to an empty password when none is stored.
//! - **macOS**: AES-128-CBC with a key derived from the Keychain password, 1003
//!   PBKDF2 iterations.
//! - **Windows**: AES-256-GCM with a key stored DPAPI-protected in `Local State`.
//!
//! Values without a `v10`/`v11` prefix are already plaintext.
//!
//! Everything that needs a cipher or a key store lives behind the `cookies` cargo
//! feature. Without it, [`required_packages`] names what is missing.

use crate::utils::platform::Platform;

#[cfg(all(feature = "cookies", target_os = "linux"))]
pub mod linux;

#[cfg(all(feature = "cookies", target_os = "macos"))]
pub mod macos;

#[cfg(all(feature = "cookies", target_os = "windows"))]
pub mod windows;

#[cfg(feature = "cookies")]
mod decryptor;

#[cfg(feature = "cookies")]
pub use decryptor::{CookieDecryptor, decrypt_cbc, derive_key};

pub const V10_PREFIX: &[u8] = b"v10";
pub const V11_PREFIX: &[u8] = b"v11";

/// PBKDF2 salt shared by every platform
pub const SALT: &[u8] = b"saltysalt";

/// Password behind Linux `v10` values
pub const LINUX_V10_PASSWORD: &[u8] = b"peanuts";

pub const LINUX_ITERATIONS: u32 = 1;
pub const MAC_ITERATIONS: u32 = 1003;

/// AES-CBC initialization vector: 16 spaces
pub const CBC_IV: [u8; 16] = [b' '; 16];

/// Whether a stored value carries an encryption version prefix
pub fn is_encrypted(value: &[u8]) -> bool {
    value.starts_with(V10_PREFIX) || value.starts_with(V11_PREFIX)
}

/// Crates cookie decryption needs on `platform`
pub fn required_packages(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Linux => &["aes", "cbc", "pbkdf2", "sha1", "secret-service"],
        Platform::Mac => &["aes", "cbc", "pbkdf2", "sha1", "security-framework"],
        Platform::Windows => &["aes-gcm", "base64", "windows"],
        Platform::Other => &[],
    }
}
