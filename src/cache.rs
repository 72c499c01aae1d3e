//! On-disk page snapshot cache.
//!
//! Snapshots are keyed by a hash of the normalized URL. Every failure here is
//! logged and reported as a miss: the cache only ever short-circuits the live
//! path, it never fails it.
//!
//! Two processes writing the same key race and the last write wins. That is
//! acceptable because both writes are captures of the same page.

use sha2::{Digest, Sha256};
use std::{fs,
          io::ErrorKind,
          path::{Path, PathBuf},
          sync::OnceLock};

/// Environment switch that enables the cache for the whole process
pub const CACHE_ENV_VAR: &str = "USE_HTML_CACHE";

/// File holding the results page of the current search
const RESULTS_FILE: &str = "search-results.html";

static ENABLED_FROM_ENV: OnceLock<bool> = OnceLock::new();

/// Whether `USE_HTML_CACHE=true`; read once and fixed for the process lifetime
pub fn enabled_from_env() -> bool {
    *ENABLED_FROM_ENV.get_or_init(|| std::env::var(CACHE_ENV_VAR).map(|v| v == "true").unwrap_or(false))
}

/// Strip the scheme and a trailing slash
pub fn normalize_url(url: &str) -> &str {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    without_scheme.strip_suffix('/').unwrap_or(without_scheme)
}

/// Storage file name for a URL
pub fn cache_key(url: &str) -> String {
    let digest = Sha256::digest(normalize_url(url).as_bytes());
    format!("{}.html", hex::encode(digest))
}

/// Outcome of a cache read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    Hit(String),
    Miss,
    /// The entry exists but could not be read; treated as a miss
    Unavailable(String),
}

impl CacheLookup {
    pub fn into_snapshot(self) -> Option<String> {
        match self {
            CacheLookup::Hit(html) => Some(html),
            CacheLookup::Miss | CacheLookup::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageCache {
    enabled: bool,
    dir: PathBuf,
}

impl PageCache {
    pub fn new(dir: impl Into<PathBuf>, enabled: bool) -> Self {
        Self { enabled, dir: dir.into() }
    }

    /// Cache rooted at `dir`, switched by [`CACHE_ENV_VAR`]
    pub fn from_env(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, enabled_from_env())
    }

    /// A cache that never stores anything
    pub fn disabled() -> Self {
        Self::new(PathBuf::new(), false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, url: &str) -> PathBuf {
        self.dir.join(cache_key(url))
    }

    fn results_path(&self) -> PathBuf {
        self.dir.join(RESULTS_FILE)
    }

    pub fn lookup(&self, url: &str) -> CacheLookup {
        if !self.enabled {
            return CacheLookup::Miss;
        }
        let lookup = read_snapshot(&self.path_for(url));
        match &lookup {
            CacheLookup::Hit(_) => log::debug!("[cache] hit: {}", url),
            CacheLookup::Miss => log::debug!("[cache] miss: {}", url),
            CacheLookup::Unavailable(reason) => log::warn!("[cache] unreadable entry for {}: {}", url, reason),
        }
        lookup
    }

    pub fn get(&self, url: &str) -> Option<String> {
        self.lookup(url).into_snapshot()
    }

    pub fn put(&self, url: &str, html: &str) {
        if !self.enabled {
            return;
        }
        match self.write_snapshot(&self.path_for(url), html) {
            Ok(()) => log::debug!("[cache] saved: {}", url),
            Err(e) => log::warn!("[cache] failed to save {}: {}", url, e),
        }
    }

    pub fn exists(&self, url: &str) -> bool {
        self.enabled && self.path_for(url).is_file()
    }

    pub fn get_results(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }
        match read_snapshot(&self.results_path()) {
            CacheLookup::Hit(html) => Some(html),
            CacheLookup::Miss => None,
            CacheLookup::Unavailable(reason) => {
                log::warn!("[cache] unreadable results snapshot: {}", reason);
                None
            }
        }
    }

    pub fn put_results(&self, html: &str) {
        if !self.enabled {
            return;
        }
        match self.write_snapshot(&self.results_path(), html) {
            Ok(()) => log::info!("[cache] saved results page"),
            Err(e) => log::warn!("[cache] failed to save results page: {}", e),
        }
    }

    pub fn has_results(&self) -> bool {
        self.enabled && self.results_path().is_file()
    }

    fn write_snapshot(&self, path: &Path, html: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(path, html)
    }
}

fn read_snapshot(path: &Path) -> CacheLookup {
    match fs::read_to_string(path) {
        Ok(html) => CacheLookup::Hit(html),
        Err(e) if e.kind() == ErrorKind::NotFound => CacheLookup::Miss,
        Err(e) => CacheLookup::Unavailable(e.to_string()),
    }
}
