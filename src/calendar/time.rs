use regex::Regex;
use std::sync::LazyLock;

/// `H:MM`, `HH:MM` or `HH:MM:SS`, optionally followed by AM/PM
static TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{1,2}):(\d{2})(?::\d{2})?\s*(AM|PM)?").expect("valid time regex"));

/// Length of a hearing block
pub const BLOCK_MINUTES: u32 = 30;

/// A time of day on the 24-hour clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    /// Parse the first time found in `text`. Without AM/PM the hour is read as 24-hour.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = TIME.captures(text)?;
        let mut hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;

        match caps.get(3).map(|m| m.as_str().to_ascii_uppercase()).as_deref() {
            Some("PM") if hour != 12 => hour += 12,
            Some("AM") if hour == 12 => hour = 0,
            _ => {}
        }

        Some(Self { hour, minute })
    }

    /// Shift forward, wrapping past midnight
    pub fn plus_minutes(self, minutes: u32) -> Self {
        let total = (self.hour * 60 + self.minute + minutes) % (24 * 60);
        Self { hour: total / 60, minute: total % 60 }
    }

    /// `H:MM AM` / `H:MM PM`
    pub fn to_12h(self) -> String {
        let hour = self.hour % 24;
        let meridiem = if hour >= 12 { "PM" } else { "AM" };
        let display = match hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", display, self.minute, meridiem)
    }
}

/// `start - start+30m` on the 12-hour clock; unparseable input is returned unchanged
pub fn format_time_block(text: &str) -> String {
    match ClockTime::parse(text) {
        Some(start) => format!("{} - {}", start.to_12h(), start.plus_minutes(BLOCK_MINUTES).to_12h()),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        assert_eq!(ClockTime::parse("8:30 AM"), Some(ClockTime { hour: 8, minute: 30 }));
        assert_eq!(ClockTime::parse("08:30"), Some(ClockTime { hour: 8, minute: 30 }));
        assert_eq!(ClockTime::parse("13:05:00"), Some(ClockTime { hour: 13, minute: 5 }));
        assert_eq!(ClockTime::parse("1:00pm"), Some(ClockTime { hour: 13, minute: 0 }));
        assert_eq!(ClockTime::parse("12:15 AM"), Some(ClockTime { hour: 0, minute: 15 }));
        assert_eq!(ClockTime::parse("12:15 PM"), Some(ClockTime { hour: 12, minute: 15 }));
        assert_eq!(ClockTime::parse("TBA"), None);
    }

    #[test]
    fn test_time_block() {
        assert_eq!(format_time_block("8:30 AM"), "8:30 AM - 9:00 AM");
        assert_eq!(format_time_block("11:45 AM"), "11:45 AM - 12:15 PM");
        assert_eq!(format_time_block("14:00"), "2:00 PM - 2:30 PM");
    }

    #[test]
    fn test_time_block_wraps_midnight() {
        assert_eq!(format_time_block("11:45 PM"), "11:45 PM - 12:15 AM");
    }

    #[test]
    fn test_time_block_unparseable() {
        assert_eq!(format_time_block("Afternoon"), "Afternoon");
        assert_eq!(format_time_block(""), "");
    }
}
