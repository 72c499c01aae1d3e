//! Gets the session to the search results, from the cache or live, and tracks
//! where the session logically is.

pub mod open;

pub use open::{PageOrigin, WaitUntil, open_with_cache};

use crate::{browser::{Page, PageSource},
            cache::PageCache,
            config::CalendarConfig,
            error::{Result, ScrapeError},
            extract::{CaseRecord, ResultsTable, TableExtractor},
            steps::{ClosePopupIfPresent, Step, run_steps, search_sequence}};
use url::Url;

/// The logical URL the session is positioned at.
///
/// After a cache replay the tab reports a placeholder location, so relative
/// links are always resolved against this instead of the tab's URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPointer(Url);

impl SessionPointer {
    pub fn new(url: &str) -> Result<Self> {
        Url::parse(url)
            .map(Self)
            .map_err(|e| ScrapeError::InvalidUrl { url: url.to_string(), reason: e.to_string() })
    }

    /// Resolve a link target; absolute targets pass through unchanged
    pub fn resolve(&self, href: &str) -> Result<Url> {
        self.0
            .join(href.trim())
            .map_err(|e| ScrapeError::InvalidUrl { url: href.to_string(), reason: e.to_string() })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Which way the results page is reached this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checkpoint {
    /// Results snapshot found; no live step runs
    ReplayFromCache(String),
    LiveTraversal,
}

/// The results page, however it was reached
#[derive(Debug, Clone)]
pub struct ResultsPage {
    pub pointer: SessionPointer,
    pub html: String,
    pub table: ResultsTable,
    pub origin: PageOrigin,
}

pub struct Navigator<'a> {
    cache: &'a PageCache,
    config: &'a CalendarConfig,
}

impl<'a> Navigator<'a> {
    pub fn new(cache: &'a PageCache, config: &'a CalendarConfig) -> Self {
        Self { cache, config }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        match self.cache.get_results() {
            Some(snapshot) => Checkpoint::ReplayFromCache(snapshot),
            None => Checkpoint::LiveTraversal,
        }
    }

    /// Position `page` on the search results.
    ///
    /// Fails with [`ScrapeError::ResultsTableMissing`] when the page holds no
    /// results table; such a page is never stored as the results snapshot.
    pub fn reach_results(&self, page: &dyn Page) -> Result<ResultsPage> {
        match self.checkpoint() {
            Checkpoint::ReplayFromCache(snapshot) => {
                log::info!("Replaying search results from cache");
                page.set_content(&snapshot)?;
                Ok(ResultsPage {
                    pointer: SessionPointer::new(&self.config.portal.results_url)?,
                    table: self.parse_table(&snapshot)?,
                    html: snapshot,
                    origin: PageOrigin::Cache,
                })
            }
            Checkpoint::LiveTraversal => {
                let (begin, end) = self.config.search_range()?;
                run_steps(page, &search_sequence(&self.config.portal, &begin, &end))?;
                ClosePopupIfPresent.run(page)?;

                let pointer = SessionPointer::new(&page.url())?;
                let html = page.content()?;
                let table = self.parse_table(&html)?;
                self.cache.put_results(&html);
                Ok(ResultsPage { pointer, html, table, origin: PageOrigin::Live })
            }
        }
    }

    /// Reach the results and extract every kept case, in table order
    pub fn scrape(&self, source: &dyn PageSource, page: &dyn Page) -> Result<Vec<CaseRecord>> {
        let results = self.reach_results(page)?;
        log::info!("{} rows in results table", results.table.rows.len());

        TableExtractor::new(source, self.cache, &self.config.portal).extract(&results.table, &results.pointer)
    }

    fn parse_table(&self, html: &str) -> Result<ResultsTable> {
        ResultsTable::parse(html, &self.config.portal.results_table_class)
    }
}
