//! Interactive dataset picker.
//!
//! Used when no path was given on the command line or in `FUEL_PRICES_CSV`.
//! Every `*.csv` under the working directory is listed, and files whose
//! header already carries the configured price columns are listed first and
//! marked, so the likely dataset is usually entry 1.

use std::fs::{self, File};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::AppError;
use crate::io::ingest::{DatasetColumns, has_required_columns};

/// How many directory levels below the working directory are searched.
const SEARCH_DEPTH: usize = 4;

const SKIPPED_DIRS: [&str; 3] = [".git", "target", "node_modules"];

/// A CSV found on disk, and whether its header fits the configured columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub has_price_columns: bool,
}

/// What the user typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Answer {
    Quit,
    /// Zero-based index into the candidate list.
    Pick(usize),
    OutOfRange(usize),
    Path(PathBuf),
}

/// Ask the user which dataset to load.
pub fn prompt_for_csv_path(columns: &DatasetColumns) -> Result<PathBuf, AppError> {
    let candidates = discover_candidates(Path::new("."), columns);
    if candidates.is_empty() {
        return Err(AppError::input(
            "No .csv files found. Provide one with `fuel -f <prices.csv>` or FUEL_PRICES_CSV.",
        ));
    }

    let mut stdout = io::stdout();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    print_candidates(&mut stdout, &candidates)
        .map_err(|e| AppError::input(format!("Failed to write prompt: {e}")))?;

    loop {
        write!(
            stdout,
            "Dataset number (1-{}), a path, or q to quit: ",
            candidates.len()
        )
        .and_then(|()| stdout.flush())
        .map_err(|e| AppError::input(format!("Failed to write prompt: {e}")))?;

        let Some(line) = lines.next() else {
            return Err(AppError::input(
                "No input received. Provide a CSV path with `fuel -f <prices.csv>`.",
            ));
        };
        let line = line.map_err(|e| AppError::input(format!("Failed to read input: {e}")))?;

        match parse_answer(&line, candidates.len()) {
            Answer::Quit => return Err(AppError::input("Canceled.")),
            Answer::Pick(idx) => return validate_csv_path(&candidates[idx].path),
            Answer::OutOfRange(n) => {
                println!("There is no entry {n}; pick 1-{}.", candidates.len());
            }
            Answer::Path(path) => match validate_csv_path(&path) {
                Ok(path) => return Ok(path),
                Err(err) => println!("{err}"),
            },
        }
    }
}

fn print_candidates<W: Write>(out: &mut W, candidates: &[Candidate]) -> io::Result<()> {
    writeln!(out, "CSV files under {}:", display_dir())?;
    for (idx, c) in candidates.iter().enumerate() {
        let mark = if c.has_price_columns { "*" } else { " " };
        writeln!(out, "{:>3}) {mark} {}", idx + 1, relative(&c.path))?;
    }
    if candidates.iter().any(|c| c.has_price_columns) {
        writeln!(out, "(* header has the expected price columns)")?;
    }
    Ok(())
}

fn display_dir() -> String {
    std::env::current_dir()
        .map(|d| d.display().to_string())
        .unwrap_or_else(|_| ".".to_string())
}

fn parse_answer(input: &str, count: usize) -> Answer {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") {
        return Answer::Quit;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Answer::Pick(n - 1),
        Ok(n) => Answer::OutOfRange(n),
        Err(_) => Answer::Path(PathBuf::from(input)),
    }
}

/// Check that `path` names an existing file with a `.csv` extension.
pub fn validate_csv_path(path: &Path) -> Result<PathBuf, AppError> {
    let meta = fs::metadata(path)
        .map_err(|_| AppError::input(format!("CSV file not found: {}", path.display())))?;
    if meta.is_dir() {
        return Err(AppError::input(format!(
            "Expected a file, got a directory: {}",
            path.display()
        )));
    }
    if !is_csv(path) {
        return Err(AppError::input(format!(
            "Expected a .csv file (got: {}). Use -f to pass a CSV path.",
            path.display()
        )));
    }
    Ok(path.to_path_buf())
}

/// CSV files under `root`, matching datasets first, then by path.
pub fn discover_candidates(root: &Path, columns: &DatasetColumns) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = walk_csv_files(root)
        .into_iter()
        .map(|path| {
            let has_price_columns = File::open(&path)
                .map(|file| has_required_columns(file, columns))
                .unwrap_or(false);
            Candidate {
                path,
                has_price_columns,
            }
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.has_price_columns
            .cmp(&a.has_price_columns)
            .then_with(|| relative(&a.path).cmp(&relative(&b.path)))
    });
    debug!(found = candidates.len(), "Discovered CSV candidates");
    candidates
}

fn walk_csv_files(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut pending = vec![(root.to_path_buf(), 0_usize)];

    while let Some((dir, depth)) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            match entry.file_type() {
                Ok(kind) if kind.is_dir() => {
                    if depth < SEARCH_DEPTH && !is_skipped_dir(&path) {
                        pending.push((path, depth + 1));
                    }
                }
                Ok(kind) if kind.is_file() && is_csv(&path) => found.push(path),
                _ => {}
            }
        }
    }
    found
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn is_skipped_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn relative(path: &Path) -> String {
    path.strip_prefix("./").unwrap_or(path).display().to_string()
}
