use crate::{browser::Page,
            error::Result,
            steps::{Step, expect_true}};

/// Writes the begin/end dates straight into the form fields, bypassing the date pickers.
///
/// A `change` event is dispatched on each field so handlers bound to it still run.
pub struct SetDateRange {
    begin: String,
    end: String,
}

impl SetDateRange {
    /// Dates in the portal's `MM/DD/YYYY` format
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self { begin: begin.into(), end: end.into() }
    }

    fn script(&self) -> Result<String> {
        Ok(format!(
            r#"
            (function setDateRange(beginValue, endValue) {{
                const begin = document.querySelector('#begin_date');
                const end = document.querySelector('#end_date');
                if (!begin || !end) return false;
                begin.value = beginValue;
                end.value = endValue;
                begin.dispatchEvent(new Event('change', {{ bubbles: true }}));
                end.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})({}, {})
            "#,
            serde_json::to_string(&self.begin)?,
            serde_json::to_string(&self.end)?
        ))
    }
}

impl Step for SetDateRange {
    fn name(&self) -> &str {
        "set_date_range"
    }

    fn run(&self, page: &dyn Page) -> Result<()> {
        expect_true(page, &self.script()?, "#begin_date / #end_date")?;
        page.wait_until_settled()?;
        log::info!("Date range set: {} to {}", self.begin, self.end);
        Ok(())
    }
}
