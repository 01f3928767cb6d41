use std::path::{Path, PathBuf};

use tracing::warn;

use crate::{
    error::Result,
    timetable::{self, models::Entry},
};

/// Where the workbook is read from
#[derive(Clone, Debug)]
pub struct Source {
    pub sheet: Option<String>,
    pub skip_rows: usize,
}

/// Summary of a successful load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loaded {
    pub entries: usize,
    pub skipped: usize,
}

#[derive(Debug)]
enum State {
    Empty,
    Loaded {
        path: PathBuf,
        entries: Vec<Entry>,
    },
}

/// Timetable currently shown to the user
#[derive(Debug)]
pub struct Session {
    source: Source,
    state: State,
}

impl Session {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            state: State::Empty,
        }
    }

    /// Read a workbook, the current timetable is only replaced on success
    pub fn load(&mut self, path: &Path) -> Result<Loaded> {
        let extraction =
            timetable::timetable(path, self.source.sheet.as_deref(), self.source.skip_rows)
                .inspect_err(|e| warn!(path = %path.display(), error = %e, "load failed"))?;

        let loaded = Loaded {
            entries: extraction.entries.len(),
            skipped: extraction.skipped,
        };
        self.state = State::Loaded {
            path: path.to_path_buf(),
            entries: extraction.entries,
        };

        Ok(loaded)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, State::Loaded { .. })
    }

    /// Entries of the current timetable, empty when nothing is loaded
    pub fn entries(&self) -> &[Entry] {
        match &self.state {
            State::Empty => &[],
            State::Loaded { entries, .. } => entries,
        }
    }

    /// File of the current timetable
    pub fn path(&self) -> Option<&Path> {
        match &self.state {
            State::Empty => None,
            State::Loaded { path, .. } => Some(path),
        }
    }

    #[cfg(test)]
    fn with_entries(path: &Path, entries: Vec<Entry>) -> Self {
        Self {
            source: Source {
                sheet: None,
                skip_rows: 3,
            },
            state: State::Loaded {
                path: path.to_path_buf(),
                entries,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, sheet::fixture, timetable::models::TimeSlot};

    fn source() -> Source {
        Source {
            sheet: None,
            skip_rows: 3,
        }
    }

    #[test]
    fn starts_empty() {
        let session = Session::new(source());

        assert!(!session.is_loaded());
        assert!(session.entries().is_empty());
        assert!(session.path().is_none());
    }

    #[test]
    fn failed_load_keeps_state() {
        let entry = Entry {
            date: "2024-01-01".into(),
            time: TimeSlot::all().next().unwrap(),
            code: "CS101".into(),
            name: "Intro".into(),
            departments_sections: vec![],
        };
        let mut session = Session::with_entries(Path::new("first.xlsx"), vec![entry.clone()]);

        let err = session.load(Path::new("second.pdf")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFile(_)));

        let err = session.load(Path::new("missing-timetable.xlsx")).unwrap_err();
        assert!(!matches!(err, Error::UnsupportedFile(_)));

        assert!(session.is_loaded());
        assert_eq!(session.entries(), &[entry]);
        assert_eq!(session.path(), Some(Path::new("first.xlsx")));
    }

    #[test]
    fn load_replaces_everything() {
        let march: &[(u32, u32, &str)] = &[
            (3, 0, "2024-03-10"),
            (3, 1, "CS101\nIntro to CS"),
            (4, 3, "MA201\nAlgebra"),
        ];
        let april: &[(u32, u32, &str)] = &[
            (3, 0, "2024-04-02"),
            (3, 5, "PH110\nMechanics\nSec A"),
            (3, 7, "oops"),
        ];
        let dir = tempfile::tempdir().unwrap();
        let first = fixture::workbook(dir.path(), "first.xlsx", &[("Exams", march)]);
        let second = fixture::workbook(dir.path(), "second.xlsx", &[("Exams", april)]);
        let mut session = Session::new(source());

        let loaded = session.load(&first).unwrap();
        assert_eq!(loaded, Loaded { entries: 2, skipped: 0 });
        assert_eq!(session.entries()[1].date, "2024-03-10");

        let loaded = session.load(&second).unwrap();
        assert_eq!(loaded, Loaded { entries: 1, skipped: 1 });

        assert!(session.is_loaded());
        assert_eq!(session.path(), Some(second.as_path()));
        assert_eq!(
            session.entries(),
            &[Entry {
                date: "2024-04-02".into(),
                time: TimeSlot::all().nth(2).unwrap(),
                code: "PH110".into(),
                name: "Mechanics".into(),
                departments_sections: vec!["Sec A".into()],
            }]
        );
    }
}
