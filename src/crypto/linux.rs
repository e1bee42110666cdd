//! Secret Service (GNOME Keyring / KWallet) lookup for the `v11` password.
//!
//! Chromium stores the password under an `application` attribute
//! (`chrome`, `chromium`, `brave`). Older installs only carry the item label
//! (`Chrome Safe Storage`), so the default collection is scanned as a fallback.

use std::collections::HashMap;

use secret_service::EncryptionType;
use secret_service::blocking::SecretService;
use tracing::debug;

use crate::browsers::registry::CookieSource;
use crate::error::{Error, Result};

fn unavailable(e: secret_service::Error) -> Error {
    Error::KeyringUnavailable(e.to_string())
}

/// Fetch the browser's safe-storage password
///
/// # Returns
/// * `Ok(Some(password))` - Found by application attribute or by label
/// * `Ok(None)` - The keyring is reachable but holds no entry for this browser
/// * `Err(...)` - The Secret Service is unavailable or refused to unlock
pub fn keyring_password(source: &CookieSource) -> Result<Option<Vec<u8>>> {
    let ss = SecretService::connect(EncryptionType::Dh).map_err(unavailable)?;

    let mut attributes = HashMap::new();
    attributes.insert("application", source.keyring_application);
    let found = ss.search_items(attributes).map_err(unavailable)?;

    if let Some(item) = found.unlocked.first().or_else(|| found.locked.first()) {
        if found.unlocked.is_empty() {
            item.unlock().map_err(unavailable)?;
        }
        return item.get_secret().map(Some).map_err(unavailable);
    }

    debug!("no keyring item for application={}, scanning labels", source.keyring_application);

    let collection = ss.get_default_collection().map_err(unavailable)?;
    if collection.is_locked().map_err(unavailable)? {
        collection.unlock().map_err(unavailable)?;
    }
    for item in collection.get_all_items().map_err(unavailable)? {
        if item.get_label().map_err(unavailable)? == source.keychain_service {
            return item.get_secret().map(Some).map_err(unavailable);
        }
    }

    Ok(None)
}
