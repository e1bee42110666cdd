//! OS default-browser detection.
//!
//! Linux asks `xdg-settings`; Windows reads the `https` URL association from the
//! registry. Other platforms have no detection. Every failure degrades to
//! [`Error::DefaultBrowserUnavailable`] with a warning rather than a hard error
//! from the OS call.

use tracing::warn;

use super::registry::BrowserKind;
use crate::error::{Error, Result};
use crate::utils::platform::Platform;

/// Detect the default browser on `platform` and map it to an adapter
pub fn default_browser(platform: Platform) -> Result<BrowserKind> {
    let raw = match platform {
        Platform::Linux => linux_default(),
        Platform::Windows => windows_default(),
        _ => {
            warn!("Default browser feature not supported on this OS");
            return Err(Error::DefaultBrowserUnavailable(format!("not supported on {}", platform)));
        }
    };

    let Some(raw) = raw else {
        warn!("No default browser found");
        return Err(Error::DefaultBrowserUnavailable("no default browser found".to_string()));
    };

    match_default_name(&raw).ok_or_else(|| {
        warn!("Current default browser is not supported");
        Error::DefaultBrowserUnavailable(format!("{} is not a supported browser", raw))
    })
}

/// Map an OS-reported browser identifier to an adapter
///
/// The first pass accepts an exact display name or alias. The second accepts any
/// alias contained in the identifier, so `firefoxurl-3EEDF34567DDE` resolves to
/// Firefox.
pub fn match_default_name(raw: &str) -> Option<BrowserKind> {
    let name = raw.trim().to_lowercase();
    let name = name.strip_suffix(".desktop").unwrap_or(&name);

    BrowserKind::ALL
        .into_iter()
        .find(|kind| {
            let config = kind.config();
            config.name.to_lowercase() == name || config.aliases.contains(&name)
        })
        .or_else(|| {
            BrowserKind::ALL
                .into_iter()
                .find(|kind| kind.config().aliases.iter().any(|alias| name.contains(alias)))
        })
}

fn linux_default() -> Option<String> {
    let output = std::process::Command::new("xdg-settings").args(["get", "default-web-browser"]).output();
    match output {
        Ok(output) if output.status.success() => {
            let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
            (!value.is_empty()).then_some(value)
        }
        Ok(output) => {
            warn!("xdg-settings failed: {}", String::from_utf8_lossy(&output.stderr).trim());
            None
        }
        Err(e) => {
            warn!("Could not run xdg-settings: {}", e);
            None
        }
    }
}

#[cfg(target_os = "windows")]
fn windows_default() -> Option<String> {
    use windows::Win32::System::Registry::{HKEY_CURRENT_USER, RRF_RT_REG_SZ, RegGetValueW};
    use windows::core::w;

    let mut buf = [0u16; 256];
    let mut len = (buf.len() * std::mem::size_of::<u16>()) as u32;

    // SAFETY: buf outlives the call and len holds its size in bytes
    let status = unsafe {
        RegGetValueW(
            HKEY_CURRENT_USER,
            w!(r"Software\Microsoft\Windows\Shell\Associations\UrlAssociations\https\UserChoice"),
            w!("ProgId"),
            RRF_RT_REG_SZ,
            None,
            Some(buf.as_mut_ptr().cast()),
            Some(&mut len),
        )
    };
    if let Err(e) = status.ok() {
        warn!("Could not read the default browser from the registry: {}", e);
        return None;
    }

    let chars = (len as usize / std::mem::size_of::<u16>()).min(buf.len());
    let value = String::from_utf16_lossy(&buf[..chars]).trim_end_matches('\0').to_string();
    (!value.is_empty()).then_some(value)
}

#[cfg(not(target_os = "windows"))]
fn windows_default() -> Option<String> {
    warn!("Windows default browser lookup is unavailable on this host");
    None
}
