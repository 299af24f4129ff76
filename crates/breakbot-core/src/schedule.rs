//! The break schedule data structure.
//!
//! A [`BreakSet`] is an ordered collection of upcoming breaks keyed by start
//! time. It is a plain data structure with no notion of waiting or
//! concurrency; the [`scheduler`](crate::scheduler) owns one behind a lock.
//!
//! When the set drains (every break fired or removed), the scheduler
//! regenerates it from a fixed daily default: 10:00 and 11:00 five-minute
//! pauses, a 12:00 half-hour lunch, and a 14:00 five-minute pause.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime};

/// The default daily breaks as (hour, minute, length in minutes).
const DEFAULT_BREAKS: [(u32, u32, i64); 4] = [
    (10, 0, 5),
    (11, 0, 5),
    (12, 0, 30),
    (14, 0, 5),
];

/// One scheduled break: a start instant plus a length.
///
/// The length is display-only. A break's end time never blocks scheduling;
/// the next break can start before the previous one "ends".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakEntry {
    pub start: DateTime<Local>,
    pub duration: Duration,
}

impl BreakEntry {
    /// Computed end of the break.
    pub fn end(&self) -> DateTime<Local> {
        self.start + self.duration
    }
}

/// Ordered collection of upcoming breaks, keyed by start time.
///
/// Start times are unique: inserting a second break at an occupied instant
/// fails rather than overwriting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakSet {
    entries: BTreeMap<DateTime<Local>, Duration>,
}

impl BreakSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The four default breaks anchored to the given day.
    pub fn defaults_for(day: NaiveDate) -> Self {
        let mut entries = BTreeMap::new();
        for (hour, minute, length_min) in DEFAULT_BREAKS {
            let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) else {
                continue;
            };
            // `earliest` picks the first wall-clock occurrence on DST-ambiguous
            // days and skips times a DST jump removed entirely.
            if let Some(start) = day.and_time(time).and_local_timezone(Local).earliest() {
                entries.insert(start, Duration::minutes(length_min));
            }
        }
        Self { entries }
    }

    /// Replace the contents with the defaults anchored to the day after `now`.
    pub fn regenerate(&mut self, now: DateTime<Local>) {
        let day = now.date_naive();
        *self = Self::defaults_for(day.succ_opt().unwrap_or(day));
    }

    /// Insert a break. Fails (returns false) if a break already starts at
    /// that exact instant; the existing entry is left untouched.
    pub fn insert(&mut self, start: DateTime<Local>, duration: Duration) -> bool {
        match self.entries.entry(start) {
            Entry::Vacant(slot) => {
                slot.insert(duration);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Remove the break starting at exactly `start`. Returns false if there
    /// is no such break.
    pub fn remove(&mut self, start: DateTime<Local>) -> bool {
        self.entries.remove(&start).is_some()
    }

    /// Drop every break whose start is already behind `now`.
    pub fn purge_passed(&mut self, now: DateTime<Local>) {
        self.entries.retain(|start, _| *start >= now);
    }

    /// The soonest break, if any.
    pub fn next_break(&self) -> Option<BreakEntry> {
        self.entries
            .first_key_value()
            .map(|(start, duration)| BreakEntry {
                start: *start,
                duration: *duration,
            })
    }

    pub fn contains(&self, start: DateTime<Local>) -> bool {
        self.entries.contains_key(&start)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Breaks in ascending start order.
    pub fn iter(&self) -> impl Iterator<Item = BreakEntry> + '_ {
        self.entries.iter().map(|(start, duration)| BreakEntry {
            start: *start,
            duration: *duration,
        })
    }

    /// Render the schedule as a fenced chat block, one break per line,
    /// ascending: `YYYY-MM-DD HH:mm - HH:mm`.
    pub fn render(&self) -> String {
        let mut out = String::from("```\n");
        for entry in self.iter() {
            let _ = writeln!(
                out,
                "{} - {}",
                entry.start.format("%Y-%m-%d %H:%M"),
                entry.end().format("%H:%M")
            );
        }
        out.push_str("```");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn defaults_have_four_breaks() {
        let day = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
        let set = BreakSet::defaults_for(day);
        assert_eq!(set.len(), 4);

        let entries: Vec<_> = set.iter().collect();
        assert_eq!(entries[0].start, local(2021, 3, 1, 10, 0));
        assert_eq!(entries[0].duration, Duration::minutes(5));
        assert_eq!(entries[1].start, local(2021, 3, 1, 11, 0));
        assert_eq!(entries[2].start, local(2021, 3, 1, 12, 0));
        assert_eq!(entries[2].duration, Duration::minutes(30));
        assert_eq!(entries[3].start, local(2021, 3, 1, 14, 0));
    }

    #[test]
    fn iteration_is_ascending_regardless_of_insert_order() {
        let mut set = BreakSet::new();
        assert!(set.insert(local(2021, 3, 1, 14, 0), Duration::minutes(5)));
        assert!(set.insert(local(2021, 3, 1, 10, 0), Duration::minutes(5)));
        assert!(set.insert(local(2021, 3, 1, 12, 0), Duration::minutes(30)));

        let starts: Vec<_> = set.iter().map(|e| e.start).collect();
        assert_eq!(
            starts,
            vec![
                local(2021, 3, 1, 10, 0),
                local(2021, 3, 1, 12, 0),
                local(2021, 3, 1, 14, 0),
            ]
        );
        assert_eq!(set.next_break().unwrap().start, local(2021, 3, 1, 10, 0));
    }

    #[test]
    fn duplicate_start_is_rejected_without_overwrite() {
        let mut set = BreakSet::new();
        assert!(set.insert(local(2021, 3, 1, 10, 0), Duration::minutes(5)));
        assert!(!set.insert(local(2021, 3, 1, 10, 0), Duration::minutes(30)));

        assert_eq!(set.len(), 1);
        assert_eq!(set.next_break().unwrap().duration, Duration::minutes(5));
    }

    #[test]
    fn remove_missing_start_fails() {
        let mut set = BreakSet::new();
        set.insert(local(2021, 3, 1, 10, 0), Duration::minutes(5));

        assert!(!set.remove(local(2021, 3, 1, 11, 0)));
        assert_eq!(set.len(), 1);
        assert!(set.remove(local(2021, 3, 1, 10, 0)));
        assert!(set.is_empty());
    }

    #[test]
    fn purge_drops_only_passed_breaks() {
        let mut set = BreakSet::new();
        set.insert(local(2021, 3, 1, 9, 0), Duration::minutes(5));
        set.insert(local(2021, 3, 1, 10, 0), Duration::minutes(5));
        set.insert(local(2021, 3, 1, 11, 0), Duration::minutes(5));

        set.purge_passed(local(2021, 3, 1, 10, 0));

        let starts: Vec<_> = set.iter().map(|e| e.start).collect();
        // A break starting exactly "now" is kept; it fires immediately.
        assert_eq!(
            starts,
            vec![local(2021, 3, 1, 10, 0), local(2021, 3, 1, 11, 0)]
        );
    }

    #[test]
    fn regenerate_anchors_to_the_following_day() {
        let mut set = BreakSet::new();
        set.regenerate(local(2021, 3, 1, 23, 30));

        assert_eq!(set.len(), 4);
        let expected = BreakSet::defaults_for(NaiveDate::from_ymd_opt(2021, 3, 2).unwrap());
        assert_eq!(set, expected);
        assert!(set.iter().all(|e| e.start.date_naive()
            == NaiveDate::from_ymd_opt(2021, 3, 2).unwrap()));
    }

    #[test]
    fn render_lists_start_and_end() {
        let mut set = BreakSet::new();
        set.insert(local(2021, 3, 1, 12, 0), Duration::minutes(30));
        set.insert(local(2021, 3, 1, 10, 0), Duration::minutes(5));

        assert_eq!(
            set.render(),
            "```\n2021-03-01 10:00 - 10:05\n2021-03-01 12:00 - 12:30\n```"
        );
    }

    #[test]
    fn render_of_empty_set_is_an_empty_block() {
        assert_eq!(BreakSet::new().render(), "```\n```");
    }

    #[test]
    fn end_can_roll_past_midnight() {
        let entry = BreakEntry {
            start: local(2021, 3, 1, 23, 50),
            duration: Duration::minutes(30),
        };
        assert_eq!(entry.end(), local(2021, 3, 2, 0, 20));
    }
}
