//! DPAPI-protected key and AES-256-GCM cookie decryption.
//!
//! The AES key lives base64-encoded in `Local State` under
//! `os_crypt.encrypted_key`, prefixed with `DPAPI`. Cookie payloads (after the
//! `v10` prefix) are a 12-byte nonce followed by ciphertext and tag.

use std::fs;
use std::path::Path;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine;
use windows::Win32::Foundation::HLOCAL;
use windows::Win32::Security::Cryptography::{CRYPT_INTEGER_BLOB, CryptUnprotectData};
use windows::Win32::System::Memory::LocalFree;

use crate::error::{Error, Result};

const DPAPI_PREFIX: &[u8] = b"DPAPI";
const NONCE_LEN: usize = 12;

/// Read and unprotect the AES-256 key from a `Local State` file
pub fn local_state_key(local_state_path: &Path) -> Result<[u8; 32]> {
    let text = fs::read_to_string(local_state_path)
        .map_err(|e| Error::KeyringUnavailable(format!("{}: {}", local_state_path.display(), e)))?;
    let json: serde_json::Value = serde_json::from_str(&text).map_err(|e| Error::corrupt(local_state_path, e))?;

    let encoded = json["os_crypt"]["encrypted_key"]
        .as_str()
        .ok_or_else(|| Error::corrupt(local_state_path, "no os_crypt.encrypted_key"))?;
    let encrypted = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| Error::corrupt(local_state_path, e))?;

    let Some(protected) = encrypted.strip_prefix(DPAPI_PREFIX) else {
        return Err(Error::corrupt(local_state_path, "encrypted_key lacks the DPAPI prefix"));
    };

    let key = unprotect(protected)?;
    key.try_into().map_err(|_| Error::Decryption("unexpected key length from DPAPI".to_string()))
}

fn unprotect(data: &[u8]) -> Result<Vec<u8>> {
    let blob_in = CRYPT_INTEGER_BLOB { cbData: data.len() as u32, pbData: data.as_ptr() as *mut u8 };
    let mut blob_out = CRYPT_INTEGER_BLOB::default();

    // SAFETY: blob_in borrows `data` for the duration of the call; blob_out is
    // allocated by DPAPI, copied out, then released with LocalFree
    unsafe {
        CryptUnprotectData(&blob_in, None, None, None, None, 0, &mut blob_out)
            .map_err(|e| Error::Decryption(format!("DPAPI: {}", e)))?;

        let plain = std::slice::from_raw_parts(blob_out.pbData, blob_out.cbData as usize).to_vec();
        let _ = LocalFree(HLOCAL(blob_out.pbData as *mut _));
        Ok(plain)
    }
}

/// Decrypt a `v10` payload (nonce, ciphertext, tag)
pub fn decrypt_gcm(key: &[u8; 32], payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() < NONCE_LEN {
        return Err(Error::Decryption("AES-GCM payload shorter than its nonce".to_string()));
    }
    let (nonce, ciphertext) = payload.split_at(NONCE_LEN);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| Error::Decryption("invalid AES-256 key".to_string()))?;
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| Error::Decryption("AES-GCM authentication failed".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcm_roundtrip() {
        let key = [7u8; 32];
        let cipher = Aes256Gcm::new_from_slice(&key).unwrap();
        let nonce = [3u8; NONCE_LEN];
        let ciphertext = cipher.encrypt(Nonce::from_slice(&nonce), b"cookie".as_ref()).unwrap();

        let mut payload = nonce.to_vec();
        payload.extend(ciphertext);
        assert_eq!(decrypt_gcm(&key, &payload).unwrap(), b"cookie");
    }

    #[test]
    fn test_gcm_short_payload() {
        assert!(matches!(decrypt_gcm(&[0u8; 32], b"short"), Err(Error::Decryption(_))));
    }
}
