use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::data::layout::GridSizing;

/// Rows rendered per run log when no cutoff is given.
pub const DEFAULT_LAST_EPOCH: u64 = 2_000_000;
/// Rows rendered per error log when no size is given.
pub const DEFAULT_ERROR_ROWS: u64 = 200_000;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Directory holding the CSV files written by training runs
    #[arg(long, global = true, default_value = "../files")]
    pub files_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Grid of per-experiment validation curves, one subplot per directory
    Validation {
        /// Number of windows to split the experiment groups across,
        /// at most one per group
        #[arg(default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        figures: u64,

        /// Render at most this many leading rows of each run log
        #[arg(
            default_value_t = DEFAULT_LAST_EPOCH,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        last_epoch: u64,

        /// Experiment root (defaults to <FILES_DIR>/validation)
        #[arg(long)]
        root: Option<PathBuf>,

        /// How each figure's grid side is computed
        #[arg(long, value_enum, default_value_t = GridSizing::Legacy)]
        grid_sizing: GridSizing,

        /// Overlay the mean curve of every group
        #[arg(long, default_value_t = false)]
        mean: bool,
    },

    /// Training (and optional test) error and accuracy curves
    Errors {
        /// Training log name, without the .csv extension
        #[arg(value_name = "TRAIN")]
        train: String,

        /// Test log name, without the .csv extension
        #[arg(value_name = "TEST")]
        test: Option<String>,

        /// Render at most this many leading rows
        #[arg(
            default_value_t = DEFAULT_ERROR_ROWS,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        size: u64,
    },

    /// Predicted vs. true points
    Points {
        /// Points file inside FILES_DIR
        #[arg(default_value = "points.csv")]
        file: String,
    },
}

// ---------------------------------------------------------------------------
// Resolved view requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationConfig {
    pub root: PathBuf,
    pub figures: usize,
    pub last_epoch: usize,
    pub grid_sizing: GridSizing,
    pub show_mean: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorsConfig {
    pub train: PathBuf,
    pub test: Option<PathBuf>,
    pub size: usize,
}

/// What the user asked to see, with every path resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewRequest {
    Validation(ValidationConfig),
    Errors(ErrorsConfig),
    Points(PathBuf),
}

impl Args {
    pub fn into_request(self) -> ViewRequest {
        let files = self.files_dir;
        match self.command {
            Command::Validation {
                figures,
                last_epoch,
                root,
                grid_sizing,
                mean,
            } => ViewRequest::Validation(ValidationConfig {
                root: root.unwrap_or_else(|| files.join("validation")),
                figures: figures as usize,
                last_epoch: last_epoch as usize,
                grid_sizing,
                show_mean: mean,
            }),
            Command::Errors { train, test, size } => ViewRequest::Errors(ErrorsConfig {
                train: files.join(format!("{train}.csv")),
                test: test.map(|t| files.join(format!("{t}.csv"))),
                size: size as usize,
            }),
            Command::Points { file } => ViewRequest::Points(files.join(file)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ViewRequest, clap::Error> {
        Args::try_parse_from(std::iter::once("runplot").chain(args.iter().copied()))
            .map(Args::into_request)
    }

    #[test]
    fn test_validation_defaults() {
        let req = parse(&["validation"]).unwrap();
        assert_eq!(
            req,
            ViewRequest::Validation(ValidationConfig {
                root: PathBuf::from("../files/validation"),
                figures: 1,
                last_epoch: 2_000_000,
                grid_sizing: GridSizing::Legacy,
                show_mean: false,
            })
        );
    }

    #[test]
    fn test_validation_positionals_and_flags() {
        let req = parse(&[
            "validation",
            "3",
            "500",
            "--root",
            "runs",
            "--grid-sizing",
            "per-figure",
            "--mean",
        ])
        .unwrap();
        let ViewRequest::Validation(cfg) = req else {
            panic!("expected validation request");
        };
        assert_eq!(cfg.figures, 3);
        assert_eq!(cfg.last_epoch, 500);
        assert_eq!(cfg.root, PathBuf::from("runs"));
        assert_eq!(cfg.grid_sizing, GridSizing::PerFigure);
        assert!(cfg.show_mean);
    }

    #[test]
    fn test_zero_and_negative_counts_rejected() {
        assert!(parse(&["validation", "0"]).is_err());
        assert!(parse(&["validation", "2", "0"]).is_err());
        assert!(parse(&["validation", "-1"]).is_err());
        assert!(parse(&["validation", "two"]).is_err());
    }

    #[test]
    fn test_errors_requires_training_log() {
        assert!(parse(&["errors"]).is_err());
        let req = parse(&["--files-dir", "out", "errors", "train", "test", "10"]).unwrap();
        assert_eq!(
            req,
            ViewRequest::Errors(ErrorsConfig {
                train: PathBuf::from("out/train.csv"),
                test: Some(PathBuf::from("out/test.csv")),
                size: 10,
            })
        );
    }

    #[test]
    fn test_points_default_file() {
        assert_eq!(
            parse(&["points"]).unwrap(),
            ViewRequest::Points(PathBuf::from("../files/points.csv"))
        );
    }
}
