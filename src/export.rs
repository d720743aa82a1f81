use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::bench::{MatrixResult, TrialResult};
use crate::error::{Error, Result};

const SUMMARY_HEADER: [&str; 5] = [
    "Table Size",
    "Number of Elements",
    "Total Insertion Time",
    "Total Collisions",
    "Total Search Time",
];

const GRID_CORNER: &str = "Table Size x Number of Elements";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Insert,
    Collisions,
    Search,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Insert, Metric::Collisions, Metric::Search];

    fn suffix(&self) -> &'static str {
        match self {
            Metric::Insert => "insert",
            Metric::Collisions => "collisions",
            Metric::Search => "search",
        }
    }

    fn cell(&self, result: &TrialResult) -> String {
        match self {
            Metric::Insert => seconds(result.insert_secs),
            Metric::Collisions => result.collisions.to_string(),
            Metric::Search => seconds(result.search_secs),
        }
    }
}

/// `1.0s`, `0.125s`: always at least one decimal place.
fn seconds(secs: f64) -> String {
    if secs.fract() == 0.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{}s", secs)
    }
}

fn write_row<W: Write, S: AsRef<str>>(w: &mut W, row: &[S]) -> io::Result<()> {
    let mut first: bool = true;
    for field in row {
        if !first {
            w.write_all(b",")?;
        }
        w.write_all(field.as_ref().as_bytes())?;
        first = false;
    }
    w.write_all(b"\n")
}

/// One row per (table size, element count) cell, in sweep order.
pub fn write_summary<W: Write>(w: &mut W, result: &MatrixResult) -> io::Result<()> {
    write_row(w, &SUMMARY_HEADER)?;
    for (size, count, cell) in result.iter() {
        write_row(
            w,
            &[
                size.to_string(),
                count.to_string(),
                seconds(cell.insert_secs),
                cell.collisions.to_string(),
                seconds(cell.search_secs),
            ],
        )?;
    }
    Ok(())
}

/// Table sizes down the first column, element counts across the first row.
pub fn write_grid<W: Write>(w: &mut W, result: &MatrixResult, metric: Metric) -> io::Result<()> {
    let mut header: Vec<String> = Vec::with_capacity(result.element_counts.len() + 1);
    header.push(GRID_CORNER.to_string());
    header.extend(result.element_counts.iter().map(|c| c.to_string()));
    write_row(w, &header)?;

    for (size, row) in result.table_sizes.iter().zip(&result.cells) {
        let mut line: Vec<String> = Vec::with_capacity(row.len() + 1);
        line.push(size.to_string());
        line.extend(row.iter().map(|cell| metric.cell(cell)));
        write_row(w, &line)?;
    }
    Ok(())
}

fn write_file<F>(path: PathBuf, write: F) -> Result<PathBuf>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let io_err = |source: io::Error| Error::Io {
        path: path.clone(),
        source,
    };
    let file: File = File::create(&path).map_err(io_err)?;
    let mut w: BufWriter<File> = BufWriter::new(file);
    write(&mut w).map_err(io_err)?;
    w.flush().map_err(io_err)?;
    Ok(path)
}

/// Writes `NAME.csv` plus `NAME_insert.csv`, `NAME_collisions.csv` and
/// `NAME_search.csv` into `dir`, creating it when missing. Returns the paths
/// written.
pub fn export(dir: &Path, result: &MatrixResult) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|source| Error::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let name: &str = result.hash_function.name();
    let mut written: Vec<PathBuf> = Vec::with_capacity(1 + Metric::ALL.len());

    written.push(write_file(dir.join(format!("{}.csv", name)), |w| {
        write_summary(w, result)
    })?);
    for metric in Metric::ALL {
        let path: PathBuf = dir.join(format!("{}_{}.csv", name, metric.suffix()));
        written.push(write_file(path, |w| write_grid(w, result, metric))?);
    }

    info!("wrote {} result files to {}", written.len(), dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_table::HashFunction;

    fn sample() -> MatrixResult {
        let cell = |insert_secs, collisions, search_secs| TrialResult {
            insert_secs,
            collisions,
            search_secs,
        };
        MatrixResult {
            hash_function: HashFunction::Folding,
            table_sizes: vec![1000, 100],
            element_counts: vec![10, 20],
            cells: vec![
                vec![cell(0.001, 0, 0.0), cell(0.002, 1, 0.001)],
                vec![cell(0.0, 2, 0.0), cell(1.0, 9, 0.25)],
            ],
        }
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf: Vec<u8> = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn seconds_format() {
        assert_eq!(seconds(0.0), "0.0s");
        assert_eq!(seconds(2.0), "2.0s");
        assert_eq!(seconds(0.125), "0.125s");
    }

    #[test]
    fn summary_layout() {
        let out = render(|w| write_summary(w, &sample()));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines[0],
            "Table Size,Number of Elements,Total Insertion Time,Total Collisions,Total Search Time"
        );
        assert_eq!(lines[1], "1000,10,0.001s,0,0.0s");
        assert_eq!(lines[4], "100,20,1.0s,9,0.25s");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn grid_layout() {
        let out = render(|w| write_grid(w, &sample(), Metric::Collisions));
        assert_eq!(out, "Table Size x Number of Elements,10,20\n1000,0,1\n100,2,9\n");
        let out = render(|w| write_grid(w, &sample(), Metric::Search));
        assert_eq!(out.lines().nth(2), Some("100,0.0s,0.25s"));
    }

    #[test]
    fn export_writes_four_files() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("results");
        let written = export(&target, &sample()).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "FOLDING.csv",
                "FOLDING_insert.csv",
                "FOLDING_collisions.csv",
                "FOLDING_search.csv"
            ]
        );

        let insert = fs::read_to_string(target.join("FOLDING_insert.csv")).unwrap();
        assert_eq!(
            insert,
            "Table Size x Number of Elements,10,20\n1000,0.001s,0.002s\n100,0.0s,1.0s\n"
        );
    }

    #[test]
    fn export_reports_unwritable_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();
        let err = export(&blocker.join("results"), &sample()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
