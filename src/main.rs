use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::{Input, Select};
use tracing::{debug, info};

mod error;
mod filter;
mod ics;
mod present;
mod session;
mod sheet;
mod timetable;
mod utils;

use filter::CourseKey;
use session::{Session, Source};

#[derive(Parser)]
#[clap(version, about, long_about = None)]
struct Args {
    /// The timetable workbook, i.e.: exams.xlsx
    #[clap(value_parser)]
    file: PathBuf,

    /// Sheet to read, default to the first one
    #[clap(short, long, value_name = "SHEET NAME")]
    sheet: Option<String>,

    /// Number of title rows before the data
    #[clap(long, value_name = "ROWS", default_value_t = 3)]
    skip_rows: usize,

    /// Course code to show, skip the interactive selection (repeatable)
    #[clap(short, long, value_name = "CODE")]
    course: Vec<String>,

    /// Export the selected courses to iCalendar format (.ics)
    #[clap(short, long, value_name = "FILE NAME")]
    export: Option<String>,

    /// Width of the course cards
    #[clap(short, long, value_name = "CHARS", default_value_t = 32)]
    width: usize,
}

/// What to do after showing the timetable
const ACTIONS: [&str; 3] = ["Change the selection", "Load another timetable", "Quit"];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let args = Args::parse();

    let mut session = Session::new(Source {
        sheet: args.sheet.clone(),
        skip_rows: args.skip_rows,
    });

    println!("Reading the timetable...");
    load(&mut session, &args.file)
        .with_context(|| format!("can't load `{}`", args.file.display()))?;

    // Non-interactive when the courses are given
    if !args.course.is_empty() {
        let options = filter::course_options(session.entries());
        let selections = filter::by_codes(&options, &args.course);
        show(&session, &selections, &args)?;
        return Ok(());
    }

    let mut selections: Vec<CourseKey> = vec![];
    loop {
        selections = filter::select(&filter::course_options(session.entries()), &selections)?;
        show(&session, &selections, &args)?;

        let prompt = match session.path() {
            Some(path) => format!("What next? ({})", path.display()),
            None => String::from("What next?"),
        };
        match Select::new()
            .with_prompt(prompt)
            .items(&ACTIONS[..])
            .default(0)
            .interact()?
        {
            1 => {
                let path: String = Input::new()
                    .with_prompt("Timetable workbook")
                    .interact_text()?;
                // A bad file keeps the current timetable
                if let Err(e) = load(&mut session, Path::new(&path)) {
                    eprintln!("Can't load `{path}`: {e}");
                    continue;
                }
                selections.clear();
            }
            2 => break,
            _ => (),
        }
    }

    Ok(())
}

/// Load a workbook in the session and tell the user
fn load(session: &mut Session, path: &Path) -> error::Result<()> {
    let loaded = session.load(path)?;
    info!(path = %path.display(), entries = loaded.entries, "timetable loaded");

    if loaded.skipped > 0 {
        println!(
            "{} courses found, {} cells ignored",
            loaded.entries, loaded.skipped
        );
    } else {
        println!("{} courses found", loaded.entries);
    }

    Ok(())
}

/// Show the selected courses, and export them if asked
fn show(session: &Session, selections: &[CourseKey], args: &Args) -> Result<()> {
    if !session.is_loaded() {
        return Ok(());
    }

    let view = present::present(session.entries(), selections);
    debug!(days = view.groups.len(), "view built");
    present::display(&view, args.width);

    if let Some(filename) = &args.export {
        let mut filename = filename.clone();
        let selected = filter::courses(session.entries(), selections);
        let count = ics::export(&selected, &mut filename)
            .with_context(|| format!("can't export to `{filename}`"))?;

        println!("ICS file built and exported ({count} events) => {filename}");
    }

    Ok(())
}
