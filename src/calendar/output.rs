use crate::{config::CalendarConfig, error::Result};
use chrono::NaiveDate;
use std::{fs,
          path::{Path, PathBuf}};

const PREFIX: &str = "court-calendar";
const EXTENSION: &str = "html";

/// `court-calendar-20260112-to-20260118.html` for a configured range,
/// otherwise `court-calendar-<today>.html`
pub fn output_filename(config: &CalendarConfig, today: NaiveDate) -> String {
    match (&config.start_date, &config.end_date) {
        (Some(start), Some(end)) => {
            format!("{}-{}-to-{}.{}", PREFIX, start.replace('-', ""), end.replace('-', ""), EXTENSION)
        }
        _ => format!("{}-{}.{}", PREFIX, today.format("%Y-%m-%d"), EXTENSION),
    }
}

/// Write the document under `dir`, creating the directory if needed
pub fn save(html: &str, dir: &Path, config: &CalendarConfig) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(output_filename(config, chrono::Local::now().date_naive()));
    fs::write(&path, html)?;
    log::info!("Calendar written to {}", path.display());
    Ok(path)
}
