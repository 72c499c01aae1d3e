use crate::{browser::{config::{ConnectionOptions, LaunchOptions},
                      page::{ChromePage, Page, PageSource}},
            error::{Result, ScrapeError}};
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// How the session came by its browser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Started by this session; every tab is ours
    Launched,
    /// Someone else's running browser; only the tabs opened here are ours
    Attached,
}

impl Ownership {
    pub fn closes_foreign_tabs(self) -> bool {
        self == Ownership::Launched
    }
}

/// Browser session that owns the Chrome instance and the shared browsing context
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    /// Tab the portal is driven in; detail pages get their own tabs
    main_tab: Arc<Tab>,

    /// Element and load timeout applied to every page
    timeout: Duration,

    ownership: Ownership,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // A full run walks every detail page; the 30s default idle timeout is too short
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| ScrapeError::LaunchFailed(e.to_string()))?;

        let main_tab = browser
            .new_tab()
            .map_err(|e| ScrapeError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser, main_tab, timeout: Duration::from_millis(options.timeout_ms), ownership: Ownership::Launched })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect(options.ws_url).map_err(|e| ScrapeError::ConnectionFailed(e.to_string()))?;

        let main_tab = browser
            .new_tab()
            .map_err(|e| ScrapeError::ConnectionFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser, main_tab, timeout: Duration::from_millis(options.timeout), ownership: Ownership::Attached })
    }

    /// The page the search workflow runs in
    pub fn main_page(&self) -> ChromePage {
        ChromePage::new(self.main_tab.clone(), self.timeout)
    }

    /// Get all tabs
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| ScrapeError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// Close the tabs this session owns.
    ///
    /// A launched browser loses every tab and exits when the session is dropped.
    /// An attached browser only loses the main tab; detail pages close themselves.
    pub fn close(&self) -> Result<()> {
        let tabs = if self.ownership.closes_foreign_tabs() { self.get_tabs()? } else { vec![self.main_tab.clone()] };
        for tab in tabs {
            if let Err(e) = tab.close(false) {
                log::debug!("Ignoring tab close failure: {}", e);
            }
        }
        Ok(())
    }
}

impl PageSource for BrowserSession {
    fn new_page(&self) -> Result<Box<dyn Page>> {
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| ScrapeError::TabOperationFailed(format!("Failed to create tab: {}", e)))?;
        Ok(Box::new(ChromePage::new(tab, self.timeout)))
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::warn!("Browser teardown incomplete: {}", e);
        }
    }
}
