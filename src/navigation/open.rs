use crate::{browser::Page, cache::PageCache, error::Result};

/// How settled a page must be before [`open_with_cache`] returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    /// Navigation finished
    Load,
    /// Navigation finished and load activity has died down
    NetworkIdle,
}

/// Where the page content came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOrigin {
    Live,
    Cache,
}

/// Open `url` in `page`, replaying a cached snapshot when there is one.
///
/// On a miss the page is loaded live and its markup stored for next time;
/// a failed capture or write only costs a warning.
pub fn open_with_cache(page: &dyn Page, cache: &PageCache, url: &str, wait: WaitUntil) -> Result<PageOrigin> {
    if !cache.is_enabled() {
        load_live(page, url, wait)?;
        return Ok(PageOrigin::Live);
    }

    if let Some(snapshot) = cache.get(url) {
        page.set_content(&snapshot)?;
        // Injected markup triggers no requests, so this returns at once
        if wait == WaitUntil::NetworkIdle {
            page.wait_until_settled()?;
        }
        return Ok(PageOrigin::Cache);
    }

    load_live(page, url, wait)?;
    match page.content() {
        Ok(html) => cache.put(url, &html),
        Err(e) => log::warn!("[cache] could not capture {}: {}", url, e),
    }
    Ok(PageOrigin::Live)
}

fn load_live(page: &dyn Page, url: &str, wait: WaitUntil) -> Result<()> {
    page.navigate(url)?;
    if wait == WaitUntil::NetworkIdle {
        page.wait_until_settled()?;
    }
    Ok(())
}
