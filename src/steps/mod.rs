//! The fixed interaction sequence that takes a fresh tab to the search results.
//!
//! Each step drives one page transition and returns with the page settled.
//! Steps never retry: the portal keeps search state on the server, so a failed
//! step aborts the run.

pub mod date_range;
pub mod popup;
pub mod search;
pub mod splash;
pub mod submit;

pub use date_range::SetDateRange;
pub use popup::{ClosePopupIfPresent, PopupOutcome};
pub use search::{SelectJudge, SelectSearchCategory, SelectTab};
pub use splash::OpenSplash;
pub use submit::SubmitSearch;

use crate::{browser::Page,
            config::PortalConfig,
            error::{Result, ScrapeError}};
use std::time::Duration;

/// How long a step waits for its DOM target
pub const STEP_TIMEOUT: Duration = Duration::from_secs(30);

/// One labeled transition of the portal workflow
pub trait Step {
    fn name(&self) -> &str;

    fn run(&self, page: &dyn Page) -> Result<()>;
}

/// The canonical search sequence, in the only order the portal accepts
pub fn search_sequence(portal: &PortalConfig, begin: &str, end: &str) -> Vec<Box<dyn Step>> {
    vec![
        Box::new(OpenSplash::new(&portal.entry_url)),
        Box::new(SelectSearchCategory::new(&portal.category_link_text)),
        Box::new(SelectTab::new(&portal.tab_text)),
        Box::new(SelectJudge::new(&portal.judge_label)),
        Box::new(SetDateRange::new(begin, end)),
        Box::new(SubmitSearch),
    ]
}

/// Run steps in order, stopping at the first failure
pub fn run_steps(page: &dyn Page, steps: &[Box<dyn Step>]) -> Result<()> {
    for step in steps {
        log::info!("Step {}", step.name());
        step.run(page).map_err(|e| match e {
            ScrapeError::StepFailed { .. } => e,
            other => ScrapeError::step(step.name(), other),
        })?;
    }
    Ok(())
}

/// Evaluate a script that reports success as `true`
pub(crate) fn expect_true(page: &dyn Page, script: &str, what: &str) -> Result<()> {
    match page.evaluate(script)? {
        Some(serde_json::Value::Bool(true)) => Ok(()),
        _ => Err(ScrapeError::ElementNotFound(what.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fake::FakePage;

    struct Failing;

    impl Step for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn run(&self, _page: &dyn Page) -> Result<()> {
            Err(ScrapeError::ElementNotFound("#missing".to_string()))
        }
    }

    struct Recording(&'static str);

    impl Step for Recording {
        fn name(&self) -> &str {
            self.0
        }

        fn run(&self, page: &dyn Page) -> Result<()> {
            page.evaluate(self.0)?;
            Ok(())
        }
    }

    #[test]
    fn test_search_sequence_order() {
        let steps = search_sequence(&PortalConfig::default(), "01/12/2026", "01/18/2026");
        let names: Vec<&str> = steps.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec!["open_splash", "select_search_category", "select_tab", "select_judge", "set_date_range", "submit_search"]
        );
    }

    #[test]
    fn test_run_steps_stops_at_failure() {
        let page = FakePage::new();
        let steps: Vec<Box<dyn Step>> = vec![Box::new(Recording("first")), Box::new(Failing), Box::new(Recording("third"))];

        let err = run_steps(&page, &steps).unwrap_err();
        match err {
            ScrapeError::StepFailed { step, reason } => {
                assert_eq!(step, "failing");
                assert!(reason.contains("#missing"));
            }
            other => panic!("Expected StepFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_expect_true() {
        let page = FakePage::new();
        page.answer("ok()", serde_json::json!(true));
        page.answer("nope()", serde_json::json!(false));

        assert!(expect_true(&page, "ok()", "ok").is_ok());
        assert!(expect_true(&page, "nope()", "nope").is_err());
        assert!(expect_true(&page, "unknown()", "unknown").is_err());
    }
}
