use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};

use super::model::{Columns, ErrorLog, ExperimentGroup, PointSet, RunBucket, RunLog};
use crate::error::{PlotError, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load every experiment group below `root`, sorted by directory name.
///
/// Non-directory entries are skipped (and logged). A missing or unreadable
/// root fails before anything else is read.
pub fn load_experiment_root(root: &Path) -> Result<Vec<ExperimentGroup>> {
    let dirs = list_groups(root)?;
    let mut groups = Vec::with_capacity(dirs.len());
    for dir in dirs {
        groups.push(load_group(&dir)?);
    }
    let runs: usize = groups.iter().map(|g| g.runs.len()).sum();
    log::info!(
        "Loaded {} experiment groups ({runs} run logs) from {}",
        groups.len(),
        root.display()
    );
    Ok(groups)
}

/// Directories directly below `root`, in lexicographic order.
pub fn list_groups(root: &Path) -> Result<Vec<PathBuf>> {
    let mut groups = Vec::new();
    for path in sorted_entries(root)? {
        if path.is_dir() {
            groups.push(path);
        } else {
            log::warn!("Skipping non-directory entry {}", path.display());
        }
    }
    Ok(groups)
}

/// Read all run logs of one group. Files with one line or fewer are ignored.
pub fn load_group(dir: &Path) -> Result<ExperimentGroup> {
    let name = file_name_of(dir);
    let mut runs = Vec::new();

    for path in sorted_entries(dir)? {
        if !path.is_file() {
            log::debug!("Ignoring {} inside group {name}", path.display());
            continue;
        }
        if !should_read(&path)? {
            log::debug!("Skipping empty run log {}", path.display());
            continue;
        }
        let columns = read_three_columns(&path)?;
        runs.push(RunLog::new(file_name_of(&path), columns));
    }

    let group = ExperimentGroup {
        name,
        path: dir.to_path_buf(),
        runs,
    };
    log::debug!(
        "{}: {} training, {} validation runs",
        group.path.display(),
        group.count(RunBucket::Training),
        group.count(RunBucket::Validation)
    );
    Ok(group)
}

/// Load a training or test error log (`epoch, error, accuracy`).
pub fn load_error_log(path: &Path) -> Result<ErrorLog> {
    let columns = read_three_columns(path)?;
    log::info!("Loaded {} rows from {}", columns.len(), path.display());
    Ok(ErrorLog {
        name: file_name_of(path),
        columns,
    })
}

/// Load predicted/true points (`px, py, tx, ty`).
pub fn load_points(path: &Path) -> Result<PointSet> {
    let mut points = PointSet::default();
    for row in read_table(path, 4)? {
        points.predicted.push([row[0], row[1]]);
        points.truth.push([row[2], row[3]]);
    }
    log::info!("Loaded {} points from {}", points.len(), path.display());
    Ok(points)
}

/// True when the file holds more than one line. A single line is taken to
/// be a header with no data behind it.
pub fn should_read(path: &Path) -> Result<bool> {
    let file = File::open(path).map_err(|e| PlotError::io(path, e))?;
    let mut lines = 0;
    for line in BufReader::new(file).lines().take(2) {
        line.map_err(|e| PlotError::io(path, e))?;
        lines += 1;
    }
    Ok(lines > 1)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

fn read_three_columns(path: &Path) -> Result<Columns> {
    let mut columns = Columns::default();
    for row in read_table(path, 3)? {
        columns.push(row[0], row[1], row[2]);
    }
    if columns.is_empty() {
        log::warn!("{} has no data rows", path.display());
    }
    Ok(columns)
}

/// Parse a headerless, comma-separated numeric table with exactly `width`
/// fields per row.
///
/// There is no header contract: if the first record does not parse as
/// numbers it is dropped as a header. Any later bad record is an error.
fn read_table(path: &Path, width: usize) -> Result<Vec<Vec<f64>>> {
    let file = File::open(path).map_err(|e| PlotError::io(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(file);

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            PlotError::malformed(path, line, e.to_string())
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(i as u64 + 1);

        let parsed = parse_record(&record);
        if i == 0 && parsed.is_err() {
            log::debug!("Treating first line of {} as a header", path.display());
            continue;
        }
        if record.len() != width {
            return Err(PlotError::malformed(
                path,
                line,
                format!("expected {width} columns, found {}", record.len()),
            ));
        }
        rows.push(parsed.map_err(|reason| PlotError::malformed(path, line, reason))?);
    }
    Ok(rows)
}

fn parse_record(record: &StringRecord) -> std::result::Result<Vec<f64>, String> {
    record
        .iter()
        .enumerate()
        .map(|(j, field)| {
            field
                .parse::<f64>()
                .map_err(|_| format!("column {j}: '{field}' is not a number"))
        })
        .collect()
}

// -- filesystem helpers --

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)
        .map_err(|e| PlotError::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| PlotError::io(dir, e))?;
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(path: &Path, contents: &str) {
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_single_line_log_is_skipped() {
        let dir = tempdir().unwrap();
        let group = dir.path().join("g");
        fs::create_dir(&group).unwrap();
        write(&group.join("0.csv"), "0,0.5,0.1\n");
        write(&group.join("1.csv"), "");

        let loaded = load_group(&group).unwrap();
        assert_eq!(loaded.name, "g");
        assert!(loaded.runs.is_empty());
    }

    #[test]
    fn test_runs_are_parsed_and_classified() {
        let dir = tempdir().unwrap();
        write(&dir.path().join("0.csv"), "0,1.0,0.2\n1,0.8,0.4\n2,0.5,0.6\n");
        write(&dir.path().join("0.vd.csv"), "0,1.1,0.1\n1,0.9,0.3\n");

        let group = load_group(dir.path()).unwrap();
        assert_eq!(group.runs.len(), 2);
        assert_eq!(group.runs[0].file_name, "0.csv");
        assert_eq!(group.runs[0].bucket, RunBucket::Training);
        assert_eq!(group.runs[0].columns.metric, vec![1.0, 0.8, 0.5]);
        assert_eq!(group.runs[1].bucket, RunBucket::Validation);
        assert_eq!(group.runs[1].columns.secondary, vec![0.1, 0.3]);
    }

    #[test]
    fn test_header_line_is_tolerated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");
        write(&path, "epoch,error,accuracy\n0, 0.5, 0.1\n1, 0.4, 0.2\n");

        let log = load_error_log(&path).unwrap();
        assert_eq!(log.columns.epoch, vec![0.0, 1.0]);
        assert_eq!(log.columns.metric, vec![0.5, 0.4]);
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        write(&path, "0,0.5,0.1\n1,0.4\n");

        match load_error_log(&path) {
            Err(PlotError::MalformedData { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected malformed data, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_row_after_first_is_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        write(&path, "0,0.5,0.1\n1,oops,0.2\n");

        assert!(matches!(
            load_error_log(&path),
            Err(PlotError::MalformedData { .. })
        ));
    }

    #[test]
    fn test_malformed_run_aborts_whole_root() {
        let dir = tempdir().unwrap();
        let group = dir.path().join("g");
        fs::create_dir(&group).unwrap();
        write(&group.join("0.csv"), "0,1,2\n1,2\n");

        assert!(load_experiment_root(dir.path()).is_err());
    }

    #[test]
    fn test_groups_sorted_and_files_skipped() {
        let dir = tempdir().unwrap();
        for name in ["b", "a", "c"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        write(&dir.path().join("notes.txt"), "not a group\n");

        let groups = list_groups(dir.path()).unwrap();
        let names: Vec<String> = groups.iter().map(|p| file_name_of(p)).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        assert!(matches!(
            load_experiment_root(&missing),
            Err(PlotError::Io { .. })
        ));
    }

    #[test]
    fn test_points_have_four_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("points.csv");
        write(&path, "0.1,0.2,0.15,0.25\n0.3,0.4,0.35,0.45\n");

        let points = load_points(&path).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points.predicted[1], [0.3, 0.4]);
        assert_eq!(points.truth[0], [0.15, 0.25]);
    }
}
