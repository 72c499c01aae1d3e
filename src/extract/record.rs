use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const DEFENDANT_NAME: &str = "Defendant Name";
pub const OFFICER_NAME: &str = "Officer Name";
pub const PLACEHOLDER_ID: &str = "placeholderId";
pub const ANNOTATION: &str = "annotation";

pub const DEFAULT_PLACEHOLDER_ID: &str = "AXXXXX";
pub const DEFAULT_ANNOTATION: &str = "---";

/// Value used when a field could not be found
pub const NOT_AVAILABLE: &str = "N/A";

/// Fields scraped from a case's detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailFields {
    pub defendant_name: String,
    pub officer_name: String,
}

/// One hearing: the result-table columns in header order, then the detail fields
/// and the two annotation placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseRecord {
    fields: IndexMap<String, String>,
}

impl CaseRecord {
    /// Zip headers with the row's cells, then append the detail fields and placeholders.
    ///
    /// A repeated header keeps its first position and takes the later value.
    pub fn assemble(headers: &[String], cells: &[String], detail: DetailFields) -> Self {
        let mut fields: IndexMap<String, String> = headers.iter().cloned().zip(cells.iter().cloned()).collect();
        fields.insert(DEFENDANT_NAME.to_string(), detail.defendant_name);
        fields.insert(OFFICER_NAME.to_string(), detail.officer_name);
        fields.insert(PLACEHOLDER_ID.to_string(), DEFAULT_PLACEHOLDER_ID.to_string());
        fields.insert(ANNOTATION.to_string(), DEFAULT_ANNOTATION.to_string());
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// First alias with a non-empty value
    pub fn first_of(&self, aliases: &[&str]) -> Option<&str> {
        aliases.iter().filter_map(|alias| self.get(alias)).find(|value| !value.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CaseRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self { fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}
