use crate::{browser::Page,
            error::Result,
            steps::{Step, expect_true}};
use std::time::Duration;

/// The search form's submit control
pub const SUBMIT_SELECTOR: &str = r#"input[value="Submit"]"#;

/// Structural fallback: the submit control is the third input on the page
const CLICK_THIRD_INPUT_JS: &str = r#"
    (function clickThirdInput() {
        const inputs = document.querySelectorAll('input');
        if (inputs.length < 3) return false;
        inputs[2].click();
        return true;
    })()
"#;

const CLICK_TIMEOUT: Duration = Duration::from_secs(10);

/// Submits the search form.
///
/// Tries a real click first. Overlays sometimes leave the control unreachable,
/// in which case the click is dispatched from script instead.
pub struct SubmitSearch;

impl Step for SubmitSearch {
    fn name(&self) -> &str {
        "submit_search"
    }

    fn run(&self, page: &dyn Page) -> Result<()> {
        match page.click(SUBMIT_SELECTOR, CLICK_TIMEOUT) {
            Ok(()) => log::info!("Clicked submit"),
            Err(e) => {
                log::warn!("Submit click failed, dispatching click from script: {}", e);
                expect_true(page, CLICK_THIRD_INPUT_JS, "third input on the search form")?;
            }
        }
        page.wait_until_settled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fake::FakeBrowser;
    use serde_json::json;

    const RESULTS: &str = "https://portal.test/beca/results.cfm";

    #[test]
    fn test_direct_click() {
        let browser = FakeBrowser::new();
        browser.on_click(SUBMIT_SELECTOR, RESULTS, "<table class=\"TFtable\"></table>");
        let page = browser.page();

        SubmitSearch.run(&page).unwrap();

        assert_eq!(page.url(), RESULTS);
        assert!(!browser.actions().iter().any(|a| a.contains("clickThirdInput")));
    }

    #[test]
    fn test_falls_back_to_script_click() {
        let browser = FakeBrowser::new();
        browser
            .break_click(SUBMIT_SELECTOR)
            .on_eval("clickThirdInput", RESULTS, "<table class=\"TFtable\"></table>")
            .answer("clickThirdInput", json!(true));
        let page = browser.page();

        SubmitSearch.run(&page).unwrap();

        assert_eq!(page.url(), RESULTS);
        assert!(browser.actions().iter().any(|a| a.contains("clickThirdInput")));
    }

    #[test]
    fn test_both_paths_fail() {
        let browser = FakeBrowser::new();
        browser.break_click(SUBMIT_SELECTOR).answer("clickThirdInput", json!(false));
        let page = browser.page();

        assert!(SubmitSearch.run(&page).is_err());
    }
}
