use crate::{calendar::time::ClockTime, extract::CaseRecord};
use std::{cmp::Ordering, collections::BTreeMap};

/// Column names a hearing date may appear under, in preference order
pub const DATE_FIELDS: &[&str] = &["Date", "Court Date", "Hearing Date", "date"];

/// Column names a hearing time may appear under, in preference order
pub const TIME_FIELDS: &[&str] = &["Time", "Court Time", "Hearing Time", "time"];

/// Time key for records without a time
pub const UNKNOWN_TIME: &str = "Unknown";

/// Records sharing one time key within a date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    /// The raw time string, or [`UNKNOWN_TIME`]
    pub time: String,
    pub cases: Vec<CaseRecord>,
}

impl TimeSlot {
    pub fn is_unknown(&self) -> bool {
        self.time == UNKNOWN_TIME
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup {
    pub date: String,
    pub slots: Vec<TimeSlot>,
}

/// Records grouped by date (ascending) and time (chronological, unknown last)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedSchedule {
    pub dates: Vec<DateGroup>,
}

impl GroupedSchedule {
    /// Group records; those without any recognised date field are dropped
    pub fn from_records(records: Vec<CaseRecord>) -> Self {
        let mut by_date: BTreeMap<String, Vec<TimeSlot>> = BTreeMap::new();

        for record in records {
            let Some(date) = record.first_of(DATE_FIELDS).map(str::to_string) else {
                log::debug!("Dropping case without a date: {:?}", record.first_of(&["Case Number", "Case #"]));
                continue;
            };
            let time = record.first_of(TIME_FIELDS).unwrap_or(UNKNOWN_TIME).to_string();

            let slots = by_date.entry(date).or_default();
            match slots.iter_mut().find(|slot| slot.time == time) {
                Some(slot) => slot.cases.push(record),
                None => slots.push(TimeSlot { time, cases: vec![record] }),
            }
        }

        let dates = by_date
            .into_iter()
            .map(|(date, mut slots)| {
                stable_sort_by(&mut slots, |a, b| compare_times(&a.time, &b.time));
                DateGroup { date, slots }
            })
            .collect();

        Self { dates }
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn case_count(&self) -> usize {
        self.dates
            .iter()
            .flat_map(|d| &d.slots)
            .map(|s| s.cases.len())
            .sum()
    }

    /// All records in schedule order
    pub fn into_records(self) -> Vec<CaseRecord> {
        self.dates
            .into_iter()
            .flat_map(|d| d.slots)
            .flat_map(|s| s.cases)
            .collect()
    }
}

/// Chronological when both parse, lexical otherwise; [`UNKNOWN_TIME`] sorts last
pub fn compare_times(a: &str, b: &str) -> Ordering {
    match (a == UNKNOWN_TIME, b == UNKNOWN_TIME) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }
    match (ClockTime::parse(a), ClockTime::parse(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

/// Stable insertion sort. `compare_times` is not a total order when parseable
/// and unparseable times mix, and the std sorts may panic on such comparators.
fn stable_sort_by<T>(items: &mut [T], mut compare: impl FnMut(&T, &T) -> Ordering) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
