//! # court-calendar
//!
//! Drives the county clerk's court-records portal through headless Chrome,
//! collects the hearings of one attorney and renders them as a printable HTML
//! calendar.
//!
//! ## Pipeline
//!
//! 1. **Navigation**: walk the portal from its splash page to the search
//!    results (accept terms, pick the category, tab and judge, fill the date
//!    range, submit), or replay the results page from the page cache.
//! 2. **Extraction**: read the results table, open each case's detail page in
//!    its own tab and keep the cases the attorney appears on.
//! 3. **Calendar**: group the kept cases by date and time and write the HTML.
//!
//! ## Running
//!
//! ```bash
//! # Headless run with the config in ./config.json
//! cargo run -- --config config.json
//!
//! # Reuse page snapshots between runs
//! USE_HTML_CACHE=true cargo run -- --config config.json --headed
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use court_calendar::{BrowserSession, CalendarConfig, LaunchOptions, Navigator, PageCache};
//!
//! # fn main() -> court_calendar::Result<()> {
//! let config = CalendarConfig::load("config.json".as_ref())?;
//! let cache = PageCache::from_env("html-cache");
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//!
//! let records = Navigator::new(&cache, &config).scrape(&session, &session.main_page())?;
//! let html = court_calendar::calendar::render_document(records, &config);
//! court_calendar::calendar::save(&html, "output".as_ref(), &config)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Chrome session, launch options and the [`Page`] abstraction
//! - [`cache`]: on-disk page snapshots keyed by URL
//! - [`steps`]: the portal's interaction sequence
//! - [`navigation`]: cache-aware page opening and the run orchestrator
//! - [`extract`]: results-table and detail-page parsing
//! - [`calendar`]: grouping, rendering and saving the calendar
//! - [`config`]: run configuration
//! - [`error`]: error type and result alias

pub mod browser;
pub mod cache;
pub mod calendar;
pub mod config;
pub mod error;
pub mod extract;
pub mod navigation;
pub mod steps;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions, Page, PageSource, ScopedPage};
pub use cache::PageCache;
pub use config::{CalendarConfig, PortalConfig};
pub use error::{Result, ScrapeError};
pub use extract::{CaseRecord, RowOutcome, TableExtractor};
pub use navigation::{Navigator, SessionPointer};
pub use steps::Step;
