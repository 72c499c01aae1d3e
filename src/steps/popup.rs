use crate::{browser::Page,
            error::Result,
            steps::Step};
use std::time::Duration;

const POPUP_VISIBLE_JS: &str = r#"
    (function popupVisible() {
        const popup = document.querySelector('#signup-popup');
        if (!popup) return false;
        const style = window.getComputedStyle(popup);
        return style.display !== 'none' && style.visibility !== 'hidden' && popup.offsetParent !== null;
    })()
"#;

const CLOSE_CONTROL_SELECTOR: &str = "#signup-popup button.close, #signup-popup .close";

const HAS_CLOSE_CONTROL_JS: &str =
    "!!document.querySelector('#signup-popup button.close, #signup-popup .close')";

const MASK_HIDDEN_JS: &str = r#"
    (function maskHidden() {
        const mask = document.querySelector('#screenMask');
        return !mask || window.getComputedStyle(mask).display === 'none';
    })()
"#;

const HIDE_POPUP_JS: &str = r#"
    (function hidePopup() {
        const popup = document.querySelector('#signup-popup');
        const mask = document.querySelector('#screenMask');
        if (popup) popup.style.display = 'none';
        if (mask) mask.style.display = 'none';
        return true;
    })()
"#;

const APPEAR_TIMEOUT: Duration = Duration::from_secs(2);
const MASK_TIMEOUT: Duration = Duration::from_secs(5);

/// What happened to the signup overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupOutcome {
    /// Closed with its own close control
    Dismissed,
    /// Had no close control; popup and backdrop were hidden from script
    Hidden,
    /// Never appeared
    Absent,
    /// Something went wrong while dealing with it; the run carries on
    Ignored(String),
}

/// Best-effort dismissal of the interstitial signup overlay
pub struct ClosePopupIfPresent;

impl ClosePopupIfPresent {
    pub fn dismiss(&self, page: &dyn Page) -> PopupOutcome {
        match self.try_dismiss(page) {
            Ok(outcome) => outcome,
            Err(e) => PopupOutcome::Ignored(e.to_string()),
        }
    }

    fn try_dismiss(&self, page: &dyn Page) -> Result<PopupOutcome> {
        if !page.wait_for(POPUP_VISIBLE_JS, APPEAR_TIMEOUT)? {
            return Ok(PopupOutcome::Absent);
        }

        let has_close = matches!(page.evaluate(HAS_CLOSE_CONTROL_JS)?, Some(serde_json::Value::Bool(true)));
        if has_close {
            page.click(CLOSE_CONTROL_SELECTOR, APPEAR_TIMEOUT)?;
            if !page.wait_for(MASK_HIDDEN_JS, MASK_TIMEOUT)? {
                log::debug!("Popup backdrop still visible after close");
            }
            Ok(PopupOutcome::Dismissed)
        } else {
            page.evaluate(HIDE_POPUP_JS)?;
            Ok(PopupOutcome::Hidden)
        }
    }
}

impl Step for ClosePopupIfPresent {
    fn name(&self) -> &str {
        "close_popup"
    }

    fn run(&self, page: &dyn Page) -> Result<()> {
        match self.dismiss(page) {
            PopupOutcome::Dismissed => log::info!("Popup closed"),
            PopupOutcome::Hidden => log::info!("Popup hidden via script"),
            PopupOutcome::Absent => log::debug!("No popup detected"),
            PopupOutcome::Ignored(reason) => log::info!("Popup handling skipped: {}", reason),
        }
        Ok(())
    }
}
