use crate::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};

/// A body row of the results table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub cells: Vec<String>,
    /// `href` of the row's first anchor that has one
    pub link: Option<String>,
}

/// Header names and body rows of the search results, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsTable {
    pub headers: Vec<String>,
    pub rows: Vec<ResultRow>,
}

impl ResultsTable {
    /// Parse the table with class `class` out of the results page.
    ///
    /// The first row supplies the headers (`th`); every later row is a body row (`td`).
    pub fn parse(html: &str, class: &str) -> Result<Self> {
        let document = Html::parse_document(html);
        let table_sel = selector(&format!("table.{}", class))?;
        let tr = selector("tr")?;
        let th = selector("th")?;
        let td = selector("td")?;
        let link = selector("a[href]")?;

        let table = document
            .select(&table_sel)
            .next()
            .ok_or_else(|| ScrapeError::ResultsTableMissing(class.to_string()))?;

        let mut rows = table.select(&tr);
        let headers = rows
            .next()
            .map(|header| header.select(&th).map(inner_text).collect())
            .unwrap_or_default();

        let rows = rows
            .map(|row| ResultRow {
                cells: row.select(&td).map(inner_text).collect(),
                link: row.select(&link).next().and_then(|a| a.value().attr("href")).map(str::to_string),
            })
            .collect();

        Ok(Self { headers, rows })
    }
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Config(format!("Invalid selector '{}': {}", css, e)))
}

/// Rendered-ish text of an element: all text nodes with whitespace collapsed
pub(crate) fn inner_text(element: ElementRef<'_>) -> String {
    collapse_ws(&element.text().collect::<String>())
}

pub(crate) fn collapse_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS: &str = r#"
        <html><body>
        <table class="layout"><tr><td>menu</td></tr></table>
        <table class="TFtable">
            <tr><th>Case #</th><th>Date</th><th>Time</th></tr>
            <tr><td><a href="case.cfm?id=1">2026-TR-001</a></td><td>01/13/2026</td><td> 8:30
                AM</td></tr>
            <tr><td>continued</td><td></td><td></td></tr>
            <tr><td><a>2026-TR-003</a></td><td>01/13/2026</td><td>9:00 AM</td></tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_parse_headers_and_rows() {
        let table = ResultsTable::parse(RESULTS, "TFtable").unwrap();

        assert_eq!(table.headers, vec!["Case #", "Date", "Time"]);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].cells, vec!["2026-TR-001", "01/13/2026", "8:30 AM"]);
        assert_eq!(table.rows[0].link.as_deref(), Some("case.cfm?id=1"));
    }

    #[test]
    fn test_rows_without_link() {
        let table = ResultsTable::parse(RESULTS, "TFtable").unwrap();
        assert_eq!(table.rows[1].link, None);
        // An anchor without href is not a usable link
        assert_eq!(table.rows[2].link, None);
    }

    #[test]
    fn test_link_skips_name_only_anchor() {
        let html = r#"
            <table class="TFtable">
                <tr><th>Case #</th></tr>
                <tr><td><a name="r1"></a><a href="case.cfm?id=1">2026-TR-001</a></td></tr>
            </table>
        "#;
        let table = ResultsTable::parse(html, "TFtable").unwrap();
        assert_eq!(table.rows[0].link.as_deref(), Some("case.cfm?id=1"));
    }

    #[test]
    fn test_missing_table() {
        let err = ResultsTable::parse("<table class=\"other\"></table>", "TFtable").unwrap_err();
        assert!(matches!(err, ScrapeError::ResultsTableMissing(_)));
    }

    #[test]
    fn test_empty_table() {
        let table = ResultsTable::parse("<table class=\"TFtable\"></table>", "TFtable").unwrap();
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }
}
