use crate::{calendar::{schedule::{DateGroup, GroupedSchedule, TimeSlot},
                       time::format_time_block},
            config::CalendarConfig,
            extract::{CaseRecord,
                      record::{DEFAULT_ANNOTATION, NOT_AVAILABLE}}};
use chrono::NaiveDate;

const CASE_NUMBER_FIELDS: &[&str] = &["Case Number", "Case #", "caseNumber"];
const DEFENDANT_FIELDS: &[&str] = &["Defendant Name", "defendantName"];
const OFFICER_FIELDS: &[&str] = &["Officer Name", "officerName"];
const ANNOTATION_FIELDS: &[&str] = &["annotation"];

/// Heading for the unknown-time block
pub const TIME_TBD: &str = "Time TBD";

/// Printed under every time heading
const HEARING_TYPE: &str = "Tr Hrg -- Viera";

/// Marker heading of the empty document
pub const NO_CASES_FOUND: &str = "No cases found";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];

const STYLE: &str = r#"
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body { font-family: Arial, Helvetica, sans-serif; font-size: 12pt; line-height: 1.5; color: #000; background: #fff; padding: 0.5in; }
    .date-section { margin-bottom: 30px; page-break-inside: avoid; }
    .date-header { font-size: 14pt; font-weight: normal; background-color: #d3d3d3; padding: 8px 12px; margin-bottom: 5px; }
    .day-of-week { font-size: 12pt; font-weight: normal; margin-bottom: 15px; }
    .time-block { margin-bottom: 15px; page-break-inside: avoid; }
    .time-header { font-weight: bold; margin-bottom: 5px; }
    .hearing-type { margin-left: 15px; margin-bottom: 5px; font-size: 11pt; }
    .case-entry { margin-left: 30px; margin-bottom: 4px; font-size: 11pt; white-space: pre; }
    .defendant-name { display: inline-block; min-width: 200px; }
    .case-id { display: inline-block; min-width: 120px; }
    .charge-status { display: inline-block; min-width: 80px; }
    .officer-name { display: inline-block; text-align: right; float: right; min-width: 180px; }
    @media print {
      @page { size: letter; margin: 0.75in; }
      body { padding: 0; }
      .date-section { page-break-after: always; margin-bottom: 0; }
      .date-section:last-child { page-break-after: auto; }
      .time-block { page-break-inside: avoid; }
    }
"#;

/// Render the calendar document for `records`
pub fn render_document(records: Vec<CaseRecord>, config: &CalendarConfig) -> String {
    if records.is_empty() {
        return render_empty(config);
    }
    render_schedule(&GroupedSchedule::from_records(records), config)
}

pub fn render_schedule(schedule: &GroupedSchedule, config: &CalendarConfig) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"UTF-8\">\n  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n  <title>{}</title>\n  <style>{}  </style>\n</head>\n<body>\n",
        escape_html(&title(config)),
        STYLE
    ));

    for group in &schedule.dates {
        render_date(&mut html, group);
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// The document produced when no case survived extraction
pub fn render_empty(config: &CalendarConfig) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"UTF-8\">\n  <title>{}</title>\n  <style>\n    body {{ font-family: 'Times New Roman', serif; padding: 2in; text-align: center; }}\n  </style>\n</head>\n<body>\n  <h1>{}</h1>\n  <p>No cases were found for the specified criteria.</p>\n</body>\n</html>\n",
        escape_html(&title(config)),
        NO_CASES_FOUND
    )
}

fn title(config: &CalendarConfig) -> String {
    let who = if config.attorney.trim().is_empty() { "Cases" } else { config.attorney.trim() };
    format!("Court Calendar - {}", who)
}

fn render_date(html: &mut String, group: &DateGroup) {
    let (date_only, weekday) = match long_date(&group.date) {
        Some(long) => split_long_date(&long),
        None => (group.date.clone(), String::new()),
    };

    html.push_str(&format!(
        "  <div class=\"date-section\">\n    <div class=\"date-header\">{}</div>\n    <div class=\"day-of-week\">{}</div>\n",
        escape_html(&date_only),
        escape_html(&weekday)
    ));
    for slot in &group.slots {
        render_slot(html, slot);
    }
    html.push_str("  </div>\n");
}

fn render_slot(html: &mut String, slot: &TimeSlot) {
    let heading = if slot.is_unknown() { TIME_TBD.to_string() } else { format_time_block(&slot.time) };
    html.push_str(&format!(
        "    <div class=\"time-block\">\n      <div class=\"time-header\">{}</div>\n      <div class=\"hearing-type\">{}</div>\n",
        escape_html(&heading),
        HEARING_TYPE
    ));
    for case in &slot.cases {
        html.push_str(&render_case_line(case));
    }
    html.push_str("    </div>\n");
}

/// One case: defendant, case number, annotation, officer (right-aligned)
pub fn render_case_line(case: &CaseRecord) -> String {
    format!(
        "      <div class=\"case-entry\">\n        <span class=\"defendant-name\">{}</span><span class=\"case-id\">{}</span><span class=\"charge-status\">{}</span><span class=\"officer-name\">{}</span>\n      </div>\n",
        escape_html(case.first_of(DEFENDANT_FIELDS).unwrap_or(NOT_AVAILABLE)),
        escape_html(case.first_of(CASE_NUMBER_FIELDS).unwrap_or(NOT_AVAILABLE)),
        escape_html(case.first_of(ANNOTATION_FIELDS).unwrap_or(DEFAULT_ANNOTATION)),
        escape_html(case.first_of(OFFICER_FIELDS).unwrap_or(NOT_AVAILABLE)),
    )
}

/// `Tuesday, January 13, 2026` for any of the date formats the portal uses
pub fn long_date(date: &str) -> Option<String> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date.trim(), fmt).ok())
        .map(|d| d.format("%A, %B %-d, %Y").to_string())
}

/// Split a long date into (month-day-year, weekday).
///
/// Three parts are `weekday, month day, year`; two parts are taken as
/// `month day, year` with the first part doubling as the weekday line.
pub fn split_long_date(long: &str) -> (String, String) {
    let parts: Vec<&str> = long.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [weekday, month_day, year, ..] => (format!("{}, {}", month_day, year), weekday.to_string()),
        [first, second] => (format!("{}, {}", first, second), first.to_string()),
        _ => (long.trim().to_string(), String::new()),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(pairs: &[(&str, &str)]) -> CaseRecord {
        pairs.iter().copied().collect()
    }

    fn config() -> CalendarConfig {
        CalendarConfig { attorney: "Rodney Kernan".to_string(), ..Default::default() }
    }

    #[test]
    fn test_long_date() {
        assert_eq!(long_date("2026-01-13").as_deref(), Some("Tuesday, January 13, 2026"));
        assert_eq!(long_date("01/13/2026").as_deref(), Some("Tuesday, January 13, 2026"));
        assert_eq!(long_date("soon"), None);
    }

    #[test]
    fn test_split_long_date() {
        assert_eq!(
            split_long_date("Tuesday, January 13, 2026"),
            ("January 13, 2026".to_string(), "Tuesday".to_string())
        );
        assert_eq!(split_long_date("January 13, 2026"), ("January 13, 2026".to_string(), "January 13".to_string()));
        assert_eq!(split_long_date("soon"), ("soon".to_string(), String::new()));
    }

    #[test]
    fn test_case_number_alias() {
        let by_hash = case(&[("Case #", "2026-TR-001"), ("Defendant Name", "DOE JOHN")]);
        let by_name = case(&[("Case Number", "2026-TR-001"), ("Defendant Name", "DOE JOHN")]);
        assert_eq!(render_case_line(&by_hash), render_case_line(&by_name));
        assert!(render_case_line(&by_hash).contains("<span class=\"case-id\">2026-TR-001</span>"));
    }

    #[test]
    fn test_case_line_fallbacks() {
        let line = render_case_line(&case(&[]));
        assert!(line.contains("<span class=\"defendant-name\">N/A</span>"));
        assert!(line.contains("<span class=\"case-id\">N/A</span>"));
        assert!(line.contains("<span class=\"charge-status\">---</span>"));
        assert!(line.contains("<span class=\"officer-name\">N/A</span>"));
    }

    #[test]
    fn test_empty_document() {
        let html = render_document(Vec::new(), &config());
        assert!(html.contains(NO_CASES_FOUND));
        assert!(html.contains("<title>Court Calendar - Rodney Kernan</title>"));
        assert!(!html.contains("date-section"));
    }

    #[test]
    fn test_document_sections() {
        let html = render_document(
            vec![
                case(&[("Date", "2026-01-13"), ("Time", "8:30 AM"), ("Case #", "A"), ("Defendant Name", "DOE JOHN")]),
                case(&[("Date", "2026-01-13"), ("Case #", "B")]),
                case(&[("Date", "2026-01-12"), ("Time", "1:00 PM"), ("Case #", "C")]),
            ],
            &config(),
        );

        assert_eq!(html.matches("<div class=\"date-section\">").count(), 2);
        assert!(html.contains("<div class=\"date-header\">January 13, 2026</div>"));
        assert!(html.contains("<div class=\"day-of-week\">Tuesday</div>"));
        assert!(html.contains("<div class=\"time-header\">8:30 AM - 9:00 AM</div>"));
        assert!(html.contains("<div class=\"time-header\">Time TBD</div>"));
        assert!(html.contains(HEARING_TYPE));
        assert!(html.find("January 12, 2026").unwrap() < html.find("January 13, 2026").unwrap());
        assert!(html.find("8:30 AM - 9:00 AM").unwrap() < html.find("Time TBD").unwrap());
    }

    #[test]
    fn test_values_are_escaped() {
        let line = render_case_line(&case(&[("Defendant Name", "O'NEIL <JR>")]));
        assert!(line.contains("O&#39;NEIL &lt;JR&gt;"));
    }

    #[test]
    fn test_blank_attorney_title() {
        let html = render_empty(&CalendarConfig::default());
        assert!(html.contains("<title>Court Calendar - Cases</title>"));
    }
}
