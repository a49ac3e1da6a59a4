//! CLI maintenance entry point.
//!
//! # Responsibility
//! - Verify `timetrack_core` linkage without starting the HTTP server.
//! - Seed sample data or export the CSV report against a database file.

use chrono::{Local, Utc};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use timetrack_core::export::{export_time_entries_csv, report_file_name};
use timetrack_core::{open_db, seed_sample_data, SeedOutcome, UnitOfWork};

const USAGE: &str = "usage: timetrack_cli [ping | seed <db> | export <db> [out.csv]]";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] | ["ping"] => {
            println!("timetrack_core ping={}", timetrack_core::ping());
            println!("timetrack_core version={}", timetrack_core::core_version());
            Ok(())
        }
        ["seed", db] => seed(Path::new(db)),
        ["export", db] => export(Path::new(db), None),
        ["export", db, out] => export(Path::new(db), Some(PathBuf::from(out))),
        _ => Err(USAGE.to_string()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn seed(db: &Path) -> Result<(), String> {
    let mut conn = open_db(db).map_err(|err| err.to_string())?;
    match seed_sample_data(&mut conn, Utc::now()).map_err(|err| err.to_string())? {
        SeedOutcome::Seeded(summary) => println!(
            "seeded users={} projects={} tasks={} time_entries={}",
            summary.users, summary.projects, summary.tasks, summary.time_entries
        ),
        SeedOutcome::AlreadyPresent => println!("skipped: data already present"),
    }
    Ok(())
}

fn export(db: &Path, out: Option<PathBuf>) -> Result<(), String> {
    let conn = open_db(db).map_err(|err| err.to_string())?;
    let bytes = export_time_entries_csv(&UnitOfWork::new(&conn)).map_err(|err| err.to_string())?;
    let out = out.unwrap_or_else(|| PathBuf::from(report_file_name(Local::now())));
    std::fs::write(&out, &bytes)
        .map_err(|err| format!("failed to write `{}`: {err}", out.display()))?;
    println!("exported bytes={} path={}", bytes.len(), out.display());
    Ok(())
}
