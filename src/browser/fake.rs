//! Scripted in-memory browsing surface used by unit tests.

use super::page::{Page, PageSource};
use crate::error::{Result, ScrapeError};
use serde_json::Value;
use std::{cell::RefCell,
          collections::{HashMap, HashSet},
          rc::Rc,
          time::Duration};

#[derive(Default)]
struct Site {
    pages: HashMap<String, String>,
    clicks: HashMap<String, (String, String)>,
    evals: Vec<(String, String, String)>,
    broken: HashSet<String>,
    answers: Vec<(String, Value)>,
    actions: Vec<String>,
    opened: usize,
    closed: usize,
}

/// Hands out [`FakePage`]s that share one scripted site
#[derive(Clone, Default)]
pub struct FakeBrowser {
    site: Rc<RefCell<Site>>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page on this site, starting at `about:blank`
    pub fn page(&self) -> FakePage {
        FakePage { site: self.site.clone(), url: RefCell::new("about:blank".to_string()), html: RefCell::new(String::new()) }
    }

    pub fn serve(&self, url: &str, html: &str) -> &Self {
        self.site.borrow_mut().pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Clicking `target` (selector or text) moves the page to `url` showing `html`
    pub fn on_click(&self, target: &str, url: &str, html: &str) -> &Self {
        self.site
            .borrow_mut()
            .clicks
            .insert(target.to_string(), (url.to_string(), html.to_string()));
        self
    }

    /// Evaluating a script containing `fragment` moves the page to `url` showing `html`
    pub fn on_eval(&self, fragment: &str, url: &str, html: &str) -> &Self {
        self.site
            .borrow_mut()
            .evals
            .push((fragment.to_string(), url.to_string(), html.to_string()));
        self
    }

    /// Clicking `target` fails as if the element never became available
    pub fn break_click(&self, target: &str) -> &Self {
        self.site.borrow_mut().broken.insert(target.to_string());
        self
    }

    /// Evaluating a script containing `fragment` yields `value`
    pub fn answer(&self, fragment: &str, value: Value) -> &Self {
        self.site.borrow_mut().answers.push((fragment.to_string(), value));
        self
    }

    pub fn actions(&self) -> Vec<String> {
        self.site.borrow().actions.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.actions()
            .into_iter()
            .filter_map(|a| a.strip_prefix("navigate:").map(str::to_string))
            .collect()
    }

    pub fn opened_pages(&self) -> usize {
        self.site.borrow().opened
    }

    pub fn closed_pages(&self) -> usize {
        self.site.borrow().closed
    }
}

impl PageSource for FakeBrowser {
    fn new_page(&self) -> Result<Box<dyn Page>> {
        self.site.borrow_mut().opened += 1;
        Ok(Box::new(self.page()))
    }
}

pub struct FakePage {
    site: Rc<RefCell<Site>>,
    url: RefCell<String>,
    html: RefCell<String>,
}

impl FakePage {
    pub fn new() -> Self {
        FakeBrowser::new().page()
    }

    pub fn answer(&self, fragment: &str, value: Value) {
        self.site.borrow_mut().answers.push((fragment.to_string(), value));
    }

    fn record(&self, action: String) {
        self.site.borrow_mut().actions.push(action);
    }

    fn show(&self, url: &str, html: &str) {
        *self.url.borrow_mut() = url.to_string();
        *self.html.borrow_mut() = html.to_string();
    }

    fn activate(&self, target: &str) -> Result<()> {
        if self.site.borrow().broken.contains(target) {
            return Err(ScrapeError::ElementNotFound(format!("Element '{}' not found", target)));
        }
        let next = self.site.borrow().clicks.get(target).cloned();
        if let Some((url, html)) = next {
            self.show(&url, &html);
        }
        Ok(())
    }
}

impl Page for FakePage {
    fn navigate(&self, url: &str) -> Result<()> {
        self.record(format!("navigate:{}", url));
        let html = self.site.borrow().pages.get(url).cloned();
        match html {
            Some(html) => {
                self.show(url, &html);
                Ok(())
            }
            None => Err(ScrapeError::NavigationFailed(format!("Failed to navigate to {}: 404", url))),
        }
    }

    fn set_content(&self, html: &str) -> Result<()> {
        self.record("set_content".to_string());
        *self.html.borrow_mut() = html.to_string();
        Ok(())
    }

    fn content(&self) -> Result<String> {
        Ok(self.html.borrow().clone())
    }

    fn url(&self) -> String {
        self.url.borrow().clone()
    }

    fn wait_until_settled(&self) -> Result<()> {
        self.record("settle".to_string());
        Ok(())
    }

    fn evaluate(&self, script: &str) -> Result<Option<Value>> {
        self.record(format!("eval:{}", script));
        let transition = self
            .site
            .borrow()
            .evals
            .iter()
            .find(|(fragment, _, _)| script.contains(fragment.as_str()))
            .map(|(_, url, html)| (url.clone(), html.clone()));
        if let Some((url, html)) = transition {
            self.show(&url, &html);
        }
        let site = self.site.borrow();
        Ok(site
            .answers
            .iter()
            .find(|(fragment, _)| script.contains(fragment.as_str()))
            .map(|(_, value)| value.clone()))
    }

    fn click(&self, selector: &str, _timeout: Duration) -> Result<()> {
        self.record(format!("click:{}", selector));
        self.activate(selector)
    }

    fn click_text(&self, text: &str, _timeout: Duration) -> Result<()> {
        self.record(format!("click_text:{}", text));
        self.activate(text)
    }

    fn close(&self) -> Result<()> {
        self.site.borrow_mut().closed += 1;
        Ok(())
    }
}
