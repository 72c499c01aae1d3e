use crate::{browser::Page,
            error::{Result, ScrapeError},
            steps::{STEP_TIMEOUT, Step, expect_true}};

/// Follows the search-category link on the landing page
pub struct SelectSearchCategory {
    link_text: String,
}

impl SelectSearchCategory {
    pub fn new(link_text: impl Into<String>) -> Self {
        Self { link_text: link_text.into() }
    }
}

impl Step for SelectSearchCategory {
    fn name(&self) -> &str {
        "select_search_category"
    }

    fn run(&self, page: &dyn Page) -> Result<()> {
        page.click_text(&self.link_text, STEP_TIMEOUT)?;
        page.wait_until_settled()?;
        log::info!("Reached search page");
        Ok(())
    }
}

/// Switches the search form to a tab
pub struct SelectTab {
    tab_text: String,
}

impl SelectTab {
    pub fn new(tab_text: impl Into<String>) -> Self {
        Self { tab_text: tab_text.into() }
    }
}

impl Step for SelectTab {
    fn name(&self) -> &str {
        "select_tab"
    }

    fn run(&self, page: &dyn Page) -> Result<()> {
        page.click_text(&self.tab_text, STEP_TIMEOUT)?;
        page.wait_until_settled()?;
        log::info!("{} tab selected", self.tab_text);
        Ok(())
    }
}

/// Picks the hearing officer from the judge dropdown by its visible label
pub struct SelectJudge {
    label: String,
}

impl SelectJudge {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }

    fn script(&self) -> Result<String> {
        Ok(format!(
            r#"
            (function selectJudge(label) {{
                const select = document.querySelector('select[name="judge"]');
                if (!select) return false;
                const option = Array.from(select.options).find(o => o.text.trim() === label);
                if (!option) return false;
                select.value = option.value;
                select.dispatchEvent(new Event('input', {{ bubbles: true }}));
                select.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})({})
            "#,
            serde_json::to_string(&self.label)?
        ))
    }
}

impl Step for SelectJudge {
    fn name(&self) -> &str {
        "select_judge"
    }

    fn run(&self, page: &dyn Page) -> Result<()> {
        if !page.wait_for("!!document.querySelector('select[name=\"judge\"]')", STEP_TIMEOUT)? {
            return Err(ScrapeError::ElementNotFound("select[name=\"judge\"]".to_string()));
        }
        expect_true(page, &self.script()?, &format!("judge option '{}'", self.label))?;
        page.wait_until_settled()?;
        log::info!("Judge selected: {}", self.label);
        Ok(())
    }
}
