use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime, Utc};
use ::ics::{
    escape_text,
    properties::{Categories, Description, DtEnd, DtStart, Summary},
    Event, ICalendar,
};
use regex::Regex;
use tracing::warn;

use crate::{
    error::Result,
    timetable::models::{Entry, TimeSlot},
};

/// Floating local time, the timetable doesn't carry any timezone
const DATETIME_FORMAT: &str = "%Y%m%dT%H%M%S";

// h1 => start hour | m1 => start minute
// h2 => end hour   | m2 => end minute
static SLOT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<h1>\d{1,2}):(?P<m1>\d{2})\s*to\s*(?P<h2>\d{1,2}):(?P<m2>\d{2})\s*(?P<meridiem>AM|PM)",
    )
    .expect("slot regex is valid")
});

/// Start and end time of a slot
///
/// Only the end carries the AM/PM marker: the start shares it, unless that
/// would put the start after the end (`11:40 to 12:40 PM`).
pub fn slot_times(slot: TimeSlot) -> Option<(NaiveTime, NaiveTime)> {
    let captures = SLOT_RE.captures(slot.label())?;
    let number = |name: &str| captures.name(name)?.as_str().parse::<u32>().ok();

    let offset = if &captures["meridiem"] == "PM" { 12 } else { 0 };
    let end_hour = number("h2")? % 12 + offset;
    let mut start_hour = number("h1")? % 12 + offset;

    let end = NaiveTime::from_hms_opt(end_hour, number("m2")?, 0)?;
    let mut start = NaiveTime::from_hms_opt(start_hour, number("m1")?, 0)?;
    if start > end && start_hour >= 12 {
        start_hour -= 12;
        start = NaiveTime::from_hms_opt(start_hour, number("m1")?, 0)?;
    }

    Some((start, end))
}

/// Export the entries to an iCalendar file, returns how many events were written
pub fn export(entries: &[&Entry], filename: &mut String) -> Result<usize> {
    let mut calendar = ICalendar::new("2.0", "-//slot7view//EN");
    let dtstamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

    let mut count = 0;
    for entry in entries {
        let Some(event) = event(entry, &dtstamp) else {
            warn!(date = %entry.date, code = %entry.code, "no usable date, not exported");
            continue;
        };
        calendar.add_event(event);
        count += 1;
    }

    if !filename.ends_with(".ics") {
        filename.push_str(".ics");
    }

    calendar.save_file(filename.as_str())?;

    Ok(count)
}

/// Build the event of an entry
fn event<'a>(entry: &'a Entry, dtstamp: &str) -> Option<Event<'a>> {
    let date = NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d").ok()?;
    let (start, end) = slot_times(entry.time)?;

    let mut event = Event::new(uuid::Uuid::new_v4().to_string(), dtstamp.to_owned());
    event.push(DtStart::new(date.and_time(start).format(DATETIME_FORMAT).to_string()));
    event.push(DtEnd::new(date.and_time(end).format(DATETIME_FORMAT).to_string()));
    event.push(Summary::new(escape_text(format!("{} - {}", entry.code, entry.name))));
    event.push(Categories::new(escape_text(entry.code.as_str())));

    if !entry.departments_sections.is_empty() {
        event.push(Description::new(escape_text(
            entry.departments_sections.join(", "),
        )));
    }

    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn every_slot_parses() {
        let times: Vec<_> = TimeSlot::all().map(|slot| slot_times(slot).unwrap()).collect();

        assert_eq!(
            times,
            vec![
                (time(9, 0), time(10, 0)),
                (time(10, 20), time(11, 20)),
                (time(11, 40), time(12, 40)),
                (time(13, 0), time(14, 0)),
                (time(14, 30), time(15, 30)),
                (time(15, 40), time(16, 40)),
                (time(17, 0), time(18, 0)),
                (time(18, 20), time(19, 20)),
            ]
        );
    }

    #[test]
    fn writes_calendar() {
        let dir = tempfile::tempdir().unwrap();
        let mut filename = dir.path().join("exams").to_string_lossy().into_owned();

        let entries = [
            Entry {
                date: "2024-03-10".into(),
                time: TimeSlot::all().nth(2).unwrap(),
                code: "CS101".into(),
                name: "Intro".into(),
                departments_sections: vec!["DeptA".into(), "DeptB".into()],
            },
            Entry {
                date: "Monday".into(),
                time: TimeSlot::all().next().unwrap(),
                code: "MA201".into(),
                name: "Algebra".into(),
                departments_sections: vec![],
            },
        ];
        let selected: Vec<&Entry> = entries.iter().collect();

        let count = export(&selected, &mut filename).unwrap();
        let content = std::fs::read_to_string(&filename).unwrap();

        assert_eq!(count, 1);
        assert!(filename.ends_with("exams.ics"));
        assert_eq!(content.matches("BEGIN:VEVENT").count(), 1);
        assert!(content.contains("DTSTART:20240310T114000"));
        assert!(content.contains("DTEND:20240310T124000"));
        assert!(content.contains("SUMMARY:CS101 - Intro"));
        assert!(content.contains("DESCRIPTION:DeptA\\, DeptB"));
    }
}
