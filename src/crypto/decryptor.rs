use std::path::Path;

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, KeyIvInit};
use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
#[cfg(target_os = "linux")]
use tracing::warn;

use super::{CBC_IV, LINUX_ITERATIONS, LINUX_V10_PASSWORD, SALT, V10_PREFIX, is_encrypted};
use crate::browsers::registry::CookieSource;
use crate::error::{Error, Result};
use crate::utils::platform::Platform;

type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// Derive a 16-byte AES key from a password using PBKDF2-HMAC-SHA1
pub fn derive_key(password: &[u8], iterations: u32) -> [u8; 16] {
    let mut key = [0u8; 16];
    pbkdf2_hmac::<Sha1>(password, SALT, iterations, &mut key);
    key
}

/// AES-128-CBC decrypt with the fixed all-space IV and PKCS#7 padding
pub fn decrypt_cbc(key: &[u8; 16], data: &[u8]) -> Result<Vec<u8>> {
    Aes128CbcDec::new(key.into(), &CBC_IV.into())
        .decrypt_padded_vec_mut::<Pkcs7>(data)
        .map_err(|_| Error::Decryption("AES-CBC padding check failed (wrong key?)".to_string()))
}

enum Keys {
    /// Linux and macOS. The v11 key is resolved on first use.
    Cbc { v10: [u8; 16], v11: Option<[u8; 16]> },
    #[cfg(target_os = "windows")]
    Gcm([u8; 32]),
}

/// Decrypts the `encrypted_value` column of one browser's cookie store
///
/// Key material is fetched once per decryptor, so a single fetch prompts the user's
/// keyring at most once.
pub struct CookieDecryptor {
    keys: Keys,
    source: CookieSource,
}

impl CookieDecryptor {
    /// Prepares the key source `platform` uses for this browser
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyringUnavailable`] if the platform key store cannot be read
    /// (macOS Keychain, Windows `Local State`), or when no key source exists for
    /// `platform` on this host.
    #[cfg_attr(not(target_os = "windows"), allow(unused_variables))]
    pub fn for_platform(platform: Platform, source: &CookieSource, install_dir: &Path) -> Result<Self> {
        let keys = match platform {
            Platform::Linux => Keys::Cbc { v10: derive_key(LINUX_V10_PASSWORD, LINUX_ITERATIONS), v11: None },
            #[cfg(target_os = "macos")]
            Platform::Mac => {
                let password = super::macos::keychain_password(source)?;
                let key = derive_key(&password, super::MAC_ITERATIONS);
                Keys::Cbc { v10: key, v11: Some(key) }
            }
            #[cfg(target_os = "windows")]
            Platform::Windows => Keys::Gcm(super::windows::local_state_key(&install_dir.join("Local State"))?),
            _ => {
                return Err(Error::KeyringUnavailable(format!(
                    "cannot read {} cookie keys for {} from this host",
                    source.keychain_account, platform
                )));
            }
        };
        Ok(Self { keys, source: *source })
    }

    #[cfg(test)]
    pub(crate) fn with_cbc_keys(source: &CookieSource, v10: [u8; 16], v11: Option<[u8; 16]>) -> Self {
        Self { keys: Keys::Cbc { v10, v11 }, source: *source }
    }

    /// Returns the plaintext bytes of a stored cookie value
    ///
    /// Values without a `v10`/`v11` prefix are returned unchanged.
    pub fn decrypt(&mut self, value: &[u8]) -> Result<Vec<u8>> {
        if !is_encrypted(value) {
            return Ok(value.to_vec());
        }
        let (prefix, payload) = value.split_at(V10_PREFIX.len());

        match &mut self.keys {
            Keys::Cbc { v10, v11 } => {
                let key = if prefix == V10_PREFIX {
                    *v10
                } else {
                    match v11 {
                        Some(key) => *key,
                        None => {
                            let key = resolve_v11_key(&self.source)?;
                            *v11 = Some(key);
                            key
                        }
                    }
                };
                decrypt_cbc(&key, payload)
            }
            #[cfg(target_os = "windows")]
            Keys::Gcm(key) => super::windows::decrypt_gcm(key, payload),
        }
    }
}

#[cfg(target_os = "linux")]
fn resolve_v11_key(source: &CookieSource) -> Result<[u8; 16]> {
    let password = match super::linux::keyring_password(source)? {
        Some(password) => password,
        None => {
            warn!("No {} entry in the keyring, trying the empty password", source.keychain_service);
            Vec::new()
        }
    };
    Ok(derive_key(&password, LINUX_ITERATIONS))
}

#[cfg(not(target_os = "linux"))]
fn resolve_v11_key(source: &CookieSource) -> Result<[u8; 16]> {
    Err(Error::KeyringUnavailable(format!("{} is only available from a Linux keyring", source.keychain_service)))
}
