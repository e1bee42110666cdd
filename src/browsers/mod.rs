//! Browser adapters.
//!
//! A [`Browser`] binds one registry entry ([`BrowserKind`]) to a platform and home
//! directory. It resolves profile directories and store paths, and runs the
//! copy-then-query extraction for history, bookmarks, and cookies.

pub mod default;
pub mod profiles;
pub mod registry;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use default::{default_browser, match_default_name};
pub use registry::{BookmarkParser, BrowserConfig, BrowserKind};

use crate::error::{Error, Result};
use crate::extract::{self, ScratchDir};
use crate::outputs::{BookmarkOutputs, CookieOutputs, HistoryOutputs};
use crate::utils::environment::HostContext;
use crate::utils::paths::{ROOT_PROFILE, format_path_with_tilde};
use crate::utils::platform::Platform;

/// Ordering applied to a fetch result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub sort: bool,
    pub descending: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { sort: true, descending: false }
    }
}

/// One browser adapter bound to a platform and home directory
#[derive(Debug, Clone)]
pub struct Browser {
    kind: BrowserKind,
    config: &'static BrowserConfig,
    platform: Platform,
    install_dir: PathBuf,
}

impl Browser {
    /// Bind `kind` to the running host
    pub fn new(kind: BrowserKind) -> Result<Self> {
        Self::with_context(kind, &HostContext::detect()?)
    }

    /// Bind `kind` to an explicit platform and home directory
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlatformUnsupported`] when the browser declares no install
    /// path for `ctx.platform`.
    pub fn with_context(kind: BrowserKind, ctx: &HostContext) -> Result<Self> {
        let config = kind.config();
        let relative = config
            .path_for(ctx.platform)
            .ok_or(Error::PlatformUnsupported { browser: config.name, platform: ctx.platform })?;

        Ok(Self { kind, config, platform: ctx.platform, install_dir: ctx.home.join(relative) })
    }

    pub fn kind(&self) -> BrowserKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.config.name
    }

    pub fn config(&self) -> &'static BrowserConfig {
        self.config
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    pub fn profile_support(&self) -> bool {
        self.config.profile_support
    }

    pub fn supports_bookmarks(&self) -> bool {
        self.config.bookmarks.is_some()
    }

    /// Profiles whose directory holds `store_file`
    ///
    /// Browsers without profile support always report `["."]`; a missing store is
    /// only noticed at fetch time. A missing install directory yields no profiles.
    pub fn profiles(&self, store_file: &str) -> Vec<String> {
        if !self.config.profile_support {
            return vec![ROOT_PROFILE.to_string()];
        }
        if !self.install_dir.exists() {
            info!("{}", Error::BrowserNotInstalled { browser: self.name(), path: self.install_dir.clone() });
            return Vec::new();
        }
        profiles::discover_profiles(&self.install_dir, self.config.profile_prefixes, store_file)
    }

    pub fn history_profiles(&self) -> Vec<String> {
        self.profiles(self.config.history_file)
    }

    pub fn bookmark_profiles(&self) -> Result<Vec<String>> {
        Ok(self.profiles(self.bookmarks_file()?))
    }

    pub fn profile_dir(&self, profile: &str) -> PathBuf {
        if profile == ROOT_PROFILE { self.install_dir.clone() } else { self.install_dir.join(profile) }
    }

    pub fn history_path(&self, profile: &str) -> PathBuf {
        self.profile_dir(profile).join(self.config.history_file)
    }

    pub fn bookmarks_path(&self, profile: &str) -> Result<PathBuf> {
        Ok(self.profile_dir(profile).join(self.bookmarks_file()?))
    }

    /// Cookie store of `profile`, preferring the newest layout that exists
    pub fn cookies_path(&self, profile: &str) -> Result<PathBuf> {
        let source = self.config.cookies.ok_or(Error::CookiesNotSupported { browser: self.name() })?;
        let dir = self.profile_dir(profile);
        let candidates: Vec<PathBuf> = source.files.iter().map(|file| dir.join(file)).collect();
        candidates
            .iter()
            .find(|path| path.is_file())
            .or_else(|| candidates.first())
            .cloned()
            .ok_or(Error::CookiesNotSupported { browser: self.name() })
    }

    fn bookmarks_file(&self) -> Result<&'static str> {
        self.config
            .bookmarks
            .map(|source| source.file)
            .ok_or(Error::BookmarksNotSupported { browser: self.name() })
    }

    /// Fetch history from `paths`, or from every discovered profile when `None`
    ///
    /// Each store is copied to a call-scoped scratch directory and queried read-only.
    /// Missing or zero-length stores contribute nothing. The merged result is sorted
    /// once at the end when `opts.sort` is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptStore`] if a store cannot be queried. I/O errors while
    /// copying propagate.
    pub fn fetch_history(&self, paths: Option<&[PathBuf]>, opts: FetchOptions) -> Result<HistoryOutputs> {
        let paths = match paths {
            Some(paths) => paths.to_vec(),
            None => self.history_profiles().iter().map(|p| self.history_path(p)).collect(),
        };

        let mut scratch = ScratchDir::new()?;
        let mut outputs = HistoryOutputs::new();
        for path in &paths {
            let Some(conn) = scratch.open_sqlite(path)? else {
                debug!("no history at {}", format_path_with_tilde(path));
                continue;
            };
            let records = extract::read_history(&conn, path, &self.config.history_query)?;
            debug!("{}: {} history records from {}", self.name(), records.len(), format_path_with_tilde(path));
            outputs.extend(records);
        }

        if opts.sort {
            outputs.sort(opts.descending);
        }
        Ok(outputs)
    }

    /// Fetch history of the named profiles
    pub fn fetch_history_profiles<S: AsRef<str>>(&self, profiles: &[S], opts: FetchOptions) -> Result<HistoryOutputs> {
        let paths: Vec<PathBuf> = profiles.iter().map(|p| self.history_path(p.as_ref())).collect();
        self.fetch_history(Some(paths.as_slice()), opts)
    }

    /// Fetch bookmarks from `paths`, or from every discovered profile when `None`
    ///
    /// # Errors
    ///
    /// Fails fast with [`Error::BookmarksNotSupported`] if the browser has no bookmark
    /// store. Nonexistent per-profile files are skipped.
    pub fn fetch_bookmarks(&self, paths: Option<&[PathBuf]>, opts: FetchOptions) -> Result<BookmarkOutputs> {
        let source = self.config.bookmarks.ok_or(Error::BookmarksNotSupported { browser: self.name() })?;
        let paths = match paths {
            Some(paths) => paths.to_vec(),
            None => self.profiles(source.file).iter().map(|p| self.profile_dir(p).join(source.file)).collect(),
        };

        let mut scratch = ScratchDir::new()?;
        let mut outputs = BookmarkOutputs::new();
        for path in &paths {
            if !path.exists() {
                debug!("no bookmarks at {}", format_path_with_tilde(path));
                continue;
            }
            let records = match source.parser {
                BookmarkParser::ChromiumJson => {
                    let Some(copy) = scratch.copy_store(path)? else { continue };
                    let text = fs::read_to_string(&copy)?;
                    extract::parse_chromium_bookmarks(&text, path)?
                }
                BookmarkParser::FirefoxSql => {
                    let Some(conn) = scratch.open_sqlite(path)? else { continue };
                    extract::read_firefox_bookmarks(&conn, path)?
                }
            };
            debug!("{}: {} bookmarks from {}", self.name(), records.len(), format_path_with_tilde(path));
            outputs.extend(records);
        }

        if opts.sort {
            outputs.sort(opts.descending);
        }
        Ok(outputs)
    }

    /// Fetch and decrypt cookies from `paths`, or from every discovered profile
    ///
    /// The platform key store is only consulted once a non-empty cookie store is
    /// found.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CookiesNotSupported`] for browsers outside the Chromium family,
    /// and [`Error::KeyringUnavailable`] or [`Error::Decryption`] when values cannot
    /// be decrypted.
    #[cfg(feature = "cookies")]
    pub fn fetch_cookies(&self, paths: Option<&[PathBuf]>, opts: FetchOptions) -> Result<CookieOutputs> {
        use crate::crypto::CookieDecryptor;

        let source = self.config.cookies.ok_or(Error::CookiesNotSupported { browser: self.name() })?;
        let paths = match paths {
            Some(paths) => paths.to_vec(),
            None => self.history_profiles().iter().map(|p| self.cookies_path(p)).collect::<Result<Vec<_>>>()?,
        };

        let mut scratch = ScratchDir::new()?;
        let mut decryptor: Option<CookieDecryptor> = None;
        let mut outputs = CookieOutputs::new();
        for path in &paths {
            let Some(conn) = scratch.open_sqlite(path)? else {
                debug!("no cookies at {}", format_path_with_tilde(path));
                continue;
            };
            if decryptor.is_none() {
                decryptor = Some(CookieDecryptor::for_platform(self.platform, &source, &self.install_dir)?);
            }
            let Some(decryptor) = decryptor.as_mut() else { continue };
            let records = extract::read_cookies(&conn, path, decryptor)?;
            debug!("{}: {} cookies from {}", self.name(), records.len(), format_path_with_tilde(path));
            outputs.extend(records);
        }

        if opts.sort {
            outputs.sort(opts.descending);
        }
        Ok(outputs)
    }

    /// Cookie decryption was compiled out; reports the crates it needs
    #[cfg(not(feature = "cookies"))]
    pub fn fetch_cookies(&self, _paths: Option<&[PathBuf]>, _opts: FetchOptions) -> Result<CookieOutputs> {
        if self.config.cookies.is_none() {
            return Err(Error::CookiesNotSupported { browser: self.name() });
        }
        Err(Error::MissingDecryptionDependency {
            platform: self.platform,
            packages: crate::crypto::required_packages(self.platform),
        })
    }
}
