use crate::{
    filter::{self, CourseKey},
    timetable::models::Entry,
    utils::{self, models::Position},
};

/// Number of cards per line
pub const COLUMNS: usize = 3;

/// Courses of the same day
#[derive(Debug, PartialEq, Eq)]
pub struct DateGroup<'a> {
    pub date: &'a str,
    pub entries: Vec<&'a Entry>,
}

impl<'a> DateGroup<'a> {
    /// Entries spread over the columns, entry `i` goes in column `i % COLUMNS`
    pub fn columns(&self) -> [Vec<&'a Entry>; COLUMNS] {
        let mut columns: [Vec<&'a Entry>; COLUMNS] = Default::default();
        for (i, entry) in self.entries.iter().copied().enumerate() {
            columns[i % COLUMNS].push(entry);
        }

        columns
    }
}

/// What is shown for a selection, days in order of first appearance
#[derive(Debug, Default, PartialEq, Eq)]
pub struct View<'a> {
    pub groups: Vec<DateGroup<'a>>,
}

impl View<'_> {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Filter the entries of the selected courses and group them by date
pub fn present<'a>(entries: &'a [Entry], selections: &[CourseKey]) -> View<'a> {
    group(filter::courses(entries, selections))
}

/// Group entries by exact date, keeping the order of first appearance
fn group(entries: Vec<&Entry>) -> View<'_> {
    let mut groups: Vec<DateGroup> = vec![];
    for entry in entries {
        match groups.iter_mut().find(|group| group.date == entry.date) {
            Some(group) => group.entries.push(entry),
            None => groups.push(DateGroup {
                date: &entry.date,
                entries: vec![entry],
            }),
        }
    }

    View { groups }
}

/// Draw the view, cards of `width` chars
pub fn render(view: &View, width: usize) -> String {
    if view.is_empty() {
        return String::from("No course selected.\n");
    }

    let mut out = String::new();
    for group in &view.groups {
        out.push_str(&format!("\n{}\n", group.date));

        let columns = group.columns();
        for k in 0..columns[0].len() {
            let line: Vec<&Entry> = columns
                .iter()
                .filter_map(|column| column.get(k).copied())
                .collect();
            let titles: Vec<String> = line
                .iter()
                .map(|entry| CourseKey::of(entry).to_string())
                .collect();
            let times: Vec<String> = line
                .iter()
                .map(|entry| format!("Time: {}", entry.time))
                .collect();

            out.push_str(&utils::line_cards(width, line.len(), &Position::Top));
            out.push('\n');
            out.push_str(&utils::content_cards(width, &titles));
            out.push('\n');
            out.push_str(&utils::content_cards(width, &times));
            out.push('\n');
            out.push_str(&utils::line_cards(width, line.len(), &Position::Bottom));
            out.push('\n');
        }
    }

    out
}

/// Display the view
pub fn display(view: &View, width: usize) {
    print!("{}", render(view, width));
}
