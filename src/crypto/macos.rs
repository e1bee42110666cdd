//! macOS Keychain lookup for the safe-storage password.

use security_framework::passwords::get_generic_password;

use crate::browsers::registry::CookieSource;
use crate::error::{Error, Result};

/// errSecItemNotFound
const ITEM_NOT_FOUND: i32 = -25300;

/// Read the `<Browser> Safe Storage` generic password from the login keychain
pub fn keychain_password(source: &CookieSource) -> Result<Vec<u8>> {
    match get_generic_password(source.keychain_service, source.keychain_account) {
        Ok(password) => Ok(password),
        Err(e) if e.code() == ITEM_NOT_FOUND => {
            Err(Error::KeyringUnavailable(format!("no '{}' entry in the keychain", source.keychain_service)))
        }
        Err(e) => Err(Error::KeyringUnavailable(e.to_string())),
    }
}
