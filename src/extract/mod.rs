//! Turns the results table, plus one detail page per case, into [`CaseRecord`]s.
//!
//! Detail pages are visited one at a time in table order, each in its own tab
//! that is closed before the next row is looked at.

pub mod detail;
pub mod record;
pub mod table;

pub use detail::{DetailPage, OfficerLookup};
pub use record::{CaseRecord, DetailFields};
pub use table::{ResultRow, ResultsTable};

use crate::{browser::{PageSource, ScopedPage},
            cache::PageCache,
            config::PortalConfig,
            error::Result,
            navigation::{SessionPointer, WaitUntil, open_with_cache}};

/// What became of one result row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Kept(CaseRecord),
    /// Not a case row
    NoLink,
    /// Link target could not be resolved against the session location
    BadLink(String),
    /// Detail page does not mention the attorney
    FilteredOut,
}

pub struct TableExtractor<'a> {
    source: &'a dyn PageSource,
    cache: &'a PageCache,
    portal: &'a PortalConfig,
}

impl<'a> TableExtractor<'a> {
    pub fn new(source: &'a dyn PageSource, cache: &'a PageCache, portal: &'a PortalConfig) -> Self {
        Self { source, cache, portal }
    }

    /// Records for the first `detail_row_limit` body rows, in table order
    pub fn extract(&self, table: &ResultsTable, pointer: &SessionPointer) -> Result<Vec<CaseRecord>> {
        let mut cases = Vec::new();

        for (i, row) in table.rows.iter().take(self.portal.detail_row_limit).enumerate() {
            match self.process_row(&table.headers, row, pointer)? {
                RowOutcome::Kept(record) => cases.push(record),
                RowOutcome::NoLink => log::debug!("Row {}: no case link", i + 1),
                RowOutcome::BadLink(href) => log::warn!("Row {}: unusable link '{}'", i + 1, href),
                RowOutcome::FilteredOut => log::debug!("Row {}: attorney not on case", i + 1),
            }
        }

        log::info!("Kept {} cases", cases.len());
        Ok(cases)
    }

    pub fn process_row(&self, headers: &[String], row: &ResultRow, pointer: &SessionPointer) -> Result<RowOutcome> {
        let Some(href) = row.link.as_deref().filter(|h| !h.trim().is_empty()) else {
            return Ok(RowOutcome::NoLink);
        };

        let url = match pointer.resolve(href) {
            Ok(url) => url,
            Err(_) => return Ok(RowOutcome::BadLink(href.to_string())),
        };

        let page = ScopedPage::open(self.source)?;
        open_with_cache(&*page, self.cache, url.as_str(), WaitUntil::NetworkIdle)?;
        log::debug!("Case page opened: {}", url);

        let detail = DetailPage::parse(&page.content()?)?;
        if !detail.mentions(&self.portal.attorney_filter) {
            return Ok(RowOutcome::FilteredOut);
        }

        Ok(RowOutcome::Kept(CaseRecord::assemble(headers, &row.cells, detail.fields())))
    }
}
