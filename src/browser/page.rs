use crate::error::{Result, ScrapeError};
use headless_chrome::Tab;
use serde_json::Value;
use std::{ops::Deref,
          sync::Arc,
          thread,
          time::{Duration, Instant}};

/// Interval between polls while waiting on a page condition
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Quiet period after the document reports complete, standing in for network idle
const SETTLE_GRACE: Duration = Duration::from_millis(300);

/// A single browsing surface (one tab).
///
/// Everything the pipeline does to a page goes through this trait, so the
/// navigation and extraction logic can run against a scripted page in tests.
pub trait Page {
    /// Load `url` and wait for the navigation to finish
    fn navigate(&self, url: &str) -> Result<()>;

    /// Replace the document with `html` without any network navigation.
    /// The reported location is left as whatever the surface had before.
    fn set_content(&self, html: &str) -> Result<()>;

    /// Current document markup
    fn content(&self) -> Result<String>;

    /// Location as reported by the surface (may be a placeholder like `about:blank`)
    fn url(&self) -> String;

    /// Block until the page has no pending load activity
    fn wait_until_settled(&self) -> Result<()>;

    /// Evaluate a JavaScript expression and return its JSON value, if any
    fn evaluate(&self, script: &str) -> Result<Option<Value>>;

    /// Click the element matching a CSS selector once it is available
    fn click(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Click the first element whose own text contains `text`
    fn click_text(&self, text: &str, timeout: Duration) -> Result<()>;

    fn close(&self) -> Result<()>;

    /// Poll a boolean expression until it is true or `timeout` elapses
    fn wait_for(&self, script: &str, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(Value::Bool(true)) = self.evaluate(script)? {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Something that can hand out fresh pages within the shared browsing context
pub trait PageSource {
    fn new_page(&self) -> Result<Box<dyn Page>>;
}

/// A page that is closed when it goes out of scope, on every exit path
pub struct ScopedPage {
    page: Box<dyn Page>,
}

impl ScopedPage {
    pub fn open(source: &dyn PageSource) -> Result<Self> {
        Ok(Self { page: source.new_page()? })
    }
}

impl Deref for ScopedPage {
    type Target = dyn Page;

    fn deref(&self) -> &Self::Target {
        self.page.as_ref()
    }
}

impl Drop for ScopedPage {
    fn drop(&mut self) {
        if let Err(e) = self.page.close() {
            log::warn!("Failed to close page: {}", e);
        }
    }
}

/// [`Page`] backed by a headless_chrome tab
pub struct ChromePage {
    tab: Arc<Tab>,
    timeout: Duration,
}

impl ChromePage {
    pub fn new(tab: Arc<Tab>, timeout: Duration) -> Self {
        tab.set_default_timeout(timeout);
        Self { tab, timeout }
    }
}

/// XPath for the first element whose own text contains `text`
fn text_xpath(text: &str) -> String {
    if text.contains('\'') {
        format!("//*[contains(normalize-space(text()), \"{}\")]", text)
    } else {
        format!("//*[contains(normalize-space(text()), '{}')]", text)
    }
}

impl Page for ChromePage {
    fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| ScrapeError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| ScrapeError::NavigationFailed(format!("Navigation to {} did not complete: {}", url, e)))?;
        Ok(())
    }

    fn set_content(&self, html: &str) -> Result<()> {
        let script = format!("(function(html) {{ document.open(); document.write(html); document.close(); return true; }})({})", serde_json::to_string(html)?);
        self.evaluate(&script)?;
        Ok(())
    }

    fn content(&self) -> Result<String> {
        self.tab
            .get_content()
            .map_err(|e| ScrapeError::TabOperationFailed(format!("Failed to read page content: {}", e)))
    }

    fn url(&self) -> String {
        self.tab.get_url()
    }

    fn wait_until_settled(&self) -> Result<()> {
        self.tab
            .wait_until_navigated()
            .map_err(|e| ScrapeError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        if !self.wait_for("document.readyState === 'complete'", self.timeout)? {
            return Err(ScrapeError::NavigationFailed("Document never reached readyState 'complete'".to_string()));
        }

        thread::sleep(SETTLE_GRACE);
        Ok(())
    }

    fn evaluate(&self, script: &str) -> Result<Option<Value>> {
        let remote = self
            .tab
            .evaluate(script, false)
            .map_err(|e| ScrapeError::EvaluationFailed(e.to_string()))?;
        Ok(remote.value)
    }

    fn click(&self, selector: &str, timeout: Duration) -> Result<()> {
        let element = self
            .tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map_err(|e| ScrapeError::ElementNotFound(format!("Element '{}' not found: {}", selector, e)))?;
        element
            .scroll_into_view()
            .and_then(|el| el.click())
            .map_err(|e| ScrapeError::TabOperationFailed(format!("Failed to click '{}': {}", selector, e)))?;
        Ok(())
    }

    fn click_text(&self, text: &str, timeout: Duration) -> Result<()> {
        let xpath = text_xpath(text);
        let element = self
            .tab
            .wait_for_xpath_with_custom_timeout(&xpath, timeout)
            .map_err(|e| ScrapeError::ElementNotFound(format!("No element with text '{}': {}", text, e)))?;
        element
            .scroll_into_view()
            .and_then(|el| el.click())
            .map_err(|e| ScrapeError::TabOperationFailed(format!("Failed to click '{}': {}", text, e)))?;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.tab
            .close(true)
            .map_err(|e| ScrapeError::TabOperationFailed(format!("Failed to close tab: {}", e)))?;
        Ok(())
    }
}
