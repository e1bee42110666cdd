use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::crypto::CookieDecryptor;
use crate::error::{Error, Result};
use crate::models::CookieRecord;
use crate::models::timestamp::from_webkit_micros;

const COOKIES_SQL: &str = "
    SELECT host_key, name, value, encrypted_value, path, expires_utc, is_secure, is_httponly
    FROM cookies";

/// From this schema version on, decrypted values start with SHA-256(host_key)
const HOST_DIGEST_VERSION: i64 = 24;
const HOST_DIGEST_LEN: usize = 32;

/// Read and decrypt every cookie in an opened Chromium `Cookies` snapshot
///
/// A non-empty plaintext `value` column wins over `encrypted_value`. Expiry `0`
/// marks a session cookie and yields `expires: None`.
pub fn read_cookies(conn: &Connection, source: &Path, decryptor: &mut CookieDecryptor) -> Result<Vec<CookieRecord>> {
    let strip_host_digest = schema_version(conn, source)? >= HOST_DIGEST_VERSION;

    let mut stmt = conn.prepare(COOKIES_SQL).map_err(|e| Error::corrupt(source, e))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(RawCookie {
                host: row.get(0)?,
                name: row.get(1)?,
                value: row.get(2)?,
                encrypted_value: row.get::<_, Option<Vec<u8>>>(3)?.unwrap_or_default(),
                path: row.get(4)?,
                expires_utc: row.get(5)?,
                secure: row.get(6)?,
                http_only: row.get(7)?,
            })
        })
        .map_err(|e| Error::corrupt(source, e))?;

    let mut records = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| Error::corrupt(source, e))?;

        let value = if !raw.value.is_empty() || raw.encrypted_value.is_empty() {
            raw.value
        } else {
            let mut plain = decryptor.decrypt(&raw.encrypted_value)?;
            if strip_host_digest && crate::crypto::is_encrypted(&raw.encrypted_value) && plain.len() >= HOST_DIGEST_LEN {
                plain.drain(..HOST_DIGEST_LEN);
            }
            String::from_utf8(plain)
                .map_err(|_| Error::Decryption(format!("cookie {} on {} is not valid UTF-8", raw.name, raw.host)))?
        };

        let expires = if raw.expires_utc == 0 { None } else { from_webkit_micros(raw.expires_utc) };

        records.push(CookieRecord {
            name: raw.name,
            host: raw.host,
            path: raw.path,
            value,
            expires,
            secure: raw.secure,
            http_only: raw.http_only,
        });
    }
    Ok(records)
}

struct RawCookie {
    host: String,
    name: String,
    value: String,
    encrypted_value: Vec<u8>,
    path: String,
    expires_utc: i64,
    secure: bool,
    http_only: bool,
}

// Stores without a meta table predate host digests
fn schema_version(conn: &Connection, source: &Path) -> Result<i64> {
    let has_meta: bool = conn
        .query_row("SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = 'meta'", [], |row| {
            row.get(0)
        })
        .map_err(|e| Error::corrupt(source, e))?;
    if !has_meta {
        return Ok(0);
    }

    let version: Option<String> = conn
        .query_row("SELECT CAST(value AS TEXT) FROM meta WHERE key = 'version'", [], |row| row.get(0))
        .optional()
        .map_err(|e| Error::corrupt(source, e))?;
    Ok(version.and_then(|v| v.trim().parse().ok()).unwrap_or(0))
}
