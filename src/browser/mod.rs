//! Browser session management and the page abstraction the pipeline drives

pub mod config;
pub mod page;
pub mod session;

#[cfg(test)]
pub(crate) mod fake;

pub use config::{ConnectionOptions, LaunchOptions};
pub use page::{ChromePage, Page, PageSource, ScopedPage};
pub use session::{BrowserSession, Ownership};
