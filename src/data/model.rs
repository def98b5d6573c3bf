use std::fmt;
use std::path::PathBuf;

/// Substring that marks a run log as computed on the validation set.
pub const VALIDATION_MARKER: &str = ".vd";

// ---------------------------------------------------------------------------
// RunBucket – two-way classification of a run log
// ---------------------------------------------------------------------------

/// Which series a run log belongs to. Only affects colour, never data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RunBucket {
    /// Bucket A: any file without the marker.
    Training,
    /// Bucket B: file name contains [`VALIDATION_MARKER`].
    Validation,
}

impl RunBucket {
    pub fn classify(file_name: &str) -> Self {
        if file_name.contains(VALIDATION_MARKER) {
            RunBucket::Validation
        } else {
            RunBucket::Training
        }
    }
}

impl fmt::Display for RunBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunBucket::Training => write!(f, "training"),
            RunBucket::Validation => write!(f, "validation"),
        }
    }
}

// ---------------------------------------------------------------------------
// Columns – three parallel numeric columns parsed from one CSV file
// ---------------------------------------------------------------------------

/// `(epoch, metric, secondary)` rows stored column-wise.
/// All three vectors always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Columns {
    pub epoch: Vec<f64>,
    pub metric: Vec<f64>,
    pub secondary: Vec<f64>,
}

impl Columns {
    pub fn push(&mut self, epoch: f64, metric: f64, secondary: f64) {
        self.epoch.push(epoch);
        self.metric.push(metric);
        self.secondary.push(secondary);
    }

    pub fn len(&self) -> usize {
        self.epoch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epoch.is_empty()
    }
}

// ---------------------------------------------------------------------------
// RunLog / ExperimentGroup
// ---------------------------------------------------------------------------

/// One training run's log inside an experiment group.
#[derive(Debug, Clone)]
pub struct RunLog {
    pub file_name: String,
    pub bucket: RunBucket,
    pub columns: Columns,
}

impl RunLog {
    pub fn new(file_name: String, columns: Columns) -> Self {
        let bucket = RunBucket::classify(&file_name);
        RunLog {
            file_name,
            bucket,
            columns,
        }
    }
}

/// A subdirectory of the experiment root. Its name titles the subplot.
#[derive(Debug, Clone)]
pub struct ExperimentGroup {
    pub name: String,
    pub path: PathBuf,
    /// Only run logs with more than one line end up here.
    pub runs: Vec<RunLog>,
}

impl ExperimentGroup {
    pub fn count(&self, bucket: RunBucket) -> usize {
        self.runs.iter().filter(|r| r.bucket == bucket).count()
    }
}

// ---------------------------------------------------------------------------
// Supplementary inputs
// ---------------------------------------------------------------------------

/// Training or test error log: epoch, error, accuracy.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    pub name: String,
    pub columns: Columns,
}

/// Predicted vs. true points, one row per sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    pub predicted: Vec<[f64; 2]>,
    pub truth: Vec<[f64; 2]>,
}

impl PointSet {
    pub fn len(&self) -> usize {
        self.predicted.len()
    }
}
