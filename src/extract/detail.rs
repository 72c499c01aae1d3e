use crate::{error::Result,
            extract::{record::{DetailFields, NOT_AVAILABLE},
                      table::{collapse_ws, inner_text, selector}}};
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

/// Row label that carries the defendant's name in its second cell
pub const DEFENDANT_LABEL: &str = "DEFENDANT (1)";

static OFFICER_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)officer").expect("valid officer regex"));

/// Runs of capitals and spaces; the longest one is taken as the officer's name
static UPPERCASE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z][A-Z ]*").expect("valid name regex"));

#[derive(Debug, Clone)]
struct DetailRow {
    text: String,
    cells: Vec<String>,
}

/// Result of the officer-name heuristic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfficerLookup {
    Found(String),
    /// No row is labeled as an officer row
    NoRow,
    /// The officer row has no upper-case name in its second cell
    NoName(String),
}

impl OfficerLookup {
    pub fn into_value(self) -> String {
        match self {
            OfficerLookup::Found(name) => name,
            OfficerLookup::NoRow | OfficerLookup::NoName(_) => NOT_AVAILABLE.to_string(),
        }
    }
}

/// A case detail page, reduced to its innermost table rows
#[derive(Debug, Clone)]
pub struct DetailPage {
    rows: Vec<DetailRow>,
}

impl DetailPage {
    pub fn parse(html: &str) -> Result<Self> {
        let document = Html::parse_document(html);
        let tr = selector("tr")?;
        let td = selector("td")?;

        // Rows that wrap another table are layout, not data
        let rows = document
            .select(&tr)
            .filter(|row| row.select(&tr).next().is_none())
            .map(|row| DetailRow {
                text: collapse_ws(&row.text().collect::<Vec<_>>().join(" ")),
                cells: row.select(&td).map(inner_text).collect(),
            })
            .collect();

        Ok(Self { rows })
    }

    /// Whether any row mentions `literal` (case-insensitive, whitespace-normalized)
    pub fn mentions(&self, literal: &str) -> bool {
        let needle = collapse_ws(literal).to_lowercase();
        self.rows.iter().any(|row| row.text.to_lowercase().contains(&needle))
    }

    pub fn defendant_name(&self) -> Option<String> {
        let needle = DEFENDANT_LABEL.to_lowercase();
        self.rows
            .iter()
            .find(|row| row.text.to_lowercase().contains(&needle))
            .and_then(|row| row.cells.get(1).cloned())
    }

    pub fn officer(&self) -> OfficerLookup {
        let Some(row) = self.rows.iter().find(|row| OFFICER_LABEL.is_match(&row.text)) else {
            return OfficerLookup::NoRow;
        };
        let cell = row.cells.get(1).map(String::as_str).unwrap_or_default();
        match officer_name_from(cell) {
            Some(name) => OfficerLookup::Found(name),
            None => OfficerLookup::NoName(cell.to_string()),
        }
    }

    pub fn fields(&self) -> DetailFields {
        DetailFields {
            defendant_name: self.defendant_name().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            officer_name: self.officer().into_value(),
        }
    }
}

/// Longest run of capitals and spaces in `text`, trimmed; the first wins a tie
pub fn officer_name_from(text: &str) -> Option<String> {
    UPPERCASE_RUN
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .fold(None, |best: Option<&str>, candidate| match best {
            Some(current) if current.len() >= candidate.len() => Some(current),
            _ => Some(candidate),
        })
        .map(str::to_string)
}
