use crate::{browser::Page,
            error::Result,
            steps::{Step, expect_true}};

/// Clicks the terms-of-use control, which is an input on some revisions of the page and a button on others
const ACCEPT_TERMS_JS: &str = r#"
    (function acceptTerms() {
        const control = document.querySelector('input[type="submit"], input[type="Submit"], button');
        if (!control) return false;
        control.click();
        return true;
    })()
"#;

/// Loads the splash page and accepts the terms of use
pub struct OpenSplash {
    url: String,
}

impl OpenSplash {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Step for OpenSplash {
    fn name(&self) -> &str {
        "open_splash"
    }

    fn run(&self, page: &dyn Page) -> Result<()> {
        page.navigate(&self.url)?;
        page.wait_until_settled()?;

        expect_true(page, ACCEPT_TERMS_JS, "terms acceptance control")?;
        log::info!("Accepted terms");

        page.wait_until_settled()
    }
}
