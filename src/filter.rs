use std::{collections::HashSet, fmt};

use dialoguer::MultiSelect;

use crate::timetable::models::Entry;

const DISCLAIMER: &str = "(select with SPACE, ENTER to confirm)";

/// A course as shown to the user
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CourseKey {
    pub code: String,
    pub name: String,
}

impl CourseKey {
    pub fn of(entry: &Entry) -> Self {
        Self {
            code: entry.code.clone(),
            name: entry.name.clone(),
        }
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code, self.name)
    }
}

/// Every distinct course of the timetable, in order of appearance
pub fn course_options(entries: &[Entry]) -> Vec<CourseKey> {
    let mut seen = HashSet::new();
    let mut options = vec![];
    for entry in entries {
        let key = CourseKey::of(entry);
        if seen.insert(key.clone()) {
            options.push(key);
        }
    }

    options
}

/// Keep the entries of the selected courses, only the code is compared
pub fn courses<'a>(entries: &'a [Entry], selections: &[CourseKey]) -> Vec<&'a Entry> {
    entries
        .iter()
        .filter(|entry| selections.iter().any(|key| key.code == entry.code))
        .collect()
}

/// Ask the user which courses to show, nothing to ask for an empty timetable
pub fn select(
    options: &[CourseKey],
    previous: &[CourseKey],
) -> dialoguer::Result<Vec<CourseKey>> {
    if options.is_empty() {
        return Ok(vec![]);
    }

    let defaults: Vec<bool> = options.iter().map(|key| previous.contains(key)).collect();
    let selections = MultiSelect::new()
        .with_prompt(format!("Choose your courses {DISCLAIMER}"))
        .items(options)
        .defaults(&defaults[..])
        .interact()?;

    Ok(selections
        .into_iter()
        .map(|i| options[i].clone())
        .collect())
}

/// Match courses given by code, unknown codes are kept so they show nothing
pub fn by_codes(options: &[CourseKey], codes: &[String]) -> Vec<CourseKey> {
    codes
        .iter()
        .map(|code| {
            options
                .iter()
                .find(|key| key.code == *code)
                .cloned()
                .unwrap_or_else(|| CourseKey {
                    code: code.clone(),
                    name: String::new(),
                })
        })
        .collect()
}
