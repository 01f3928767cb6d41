use std::{borrow::Cow, fmt};

use chrono::NaiveDateTime;

/// Labels of the daily time slots, in column order
pub const TIME_SLOTS: [&str; 8] = [
    "9:00 to 10:00 AM",
    "10:20 to 11:20 AM",
    "11:40 to 12:40 PM",
    "01:00 to 02:00 PM",
    "02:30 to 03:30 PM",
    "03:40 to 04:40 PM",
    "5:00 to 6:00 PM",
    "6:20 to 7:20 PM",
];

/// Number of time slots in a day
pub const SLOT_COUNT: usize = TIME_SLOTS.len();

/// One of the fixed class periods of a day
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeSlot(usize);

impl TimeSlot {
    /// Every slot of the day, in order
    pub fn all() -> impl Iterator<Item = Self> {
        (0..SLOT_COUNT).map(Self)
    }

    /// Position of the slot in the day
    pub fn index(self) -> usize {
        self.0
    }

    /// Label as written in the timetable header
    pub fn label(self) -> &'static str {
        TIME_SLOTS[self.0]
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Value of a single cell of the grid
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// True when the cell holds nothing worth reading
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) | Self::DateTime(_) => false,
        }
    }

    /// Textual content of the cell
    pub fn text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Empty => None,
            Self::Text(text) => Some(Cow::Borrowed(text)),
            Self::Number(n) => Some(Cow::Owned(n.to_string())),
            Self::DateTime(dt) => Some(Cow::Owned(dt.to_string())),
        }
    }
}

/// A line of the timetable
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    /// Date header, empty when the row continues the previous date
    pub date: Cell,

    /// One cell per time slot, same order as [`TIME_SLOTS`]
    pub slots: [Cell; SLOT_COUNT],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Day of the course, `YYYY-MM-DD` when the sheet stores a real date
    pub date: String,

    /// When the course takes place during the day
    pub time: TimeSlot,

    /// Course's code
    pub code: String,

    /// Course's name
    pub name: String,

    /// Departments and sections attending, may be empty
    pub departments_sections: Vec<String>,
}

/// Result of an extraction over a whole grid
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    /// Entries, in row then slot order
    pub entries: Vec<Entry>,

    /// Number of non-empty slot cells that could not become an entry
    pub skipped: usize,
}
