use std::path::PathBuf;

use anyhow::{Context, Result};
use eframe::egui::Color32;

use crate::cli::{ErrorsConfig, ValidationConfig, ViewRequest};
use crate::color::SeriesColors;
use crate::data::layout::{layout_figures, FigureLayout, FigureSpacing};
use crate::data::loader;
use crate::data::model::{ErrorLog, ExperimentGroup, PointSet, RunBucket};
use crate::data::series;
use crate::error::PlotError;

// ---------------------------------------------------------------------------
// Curves – what one subplot draws
// ---------------------------------------------------------------------------

/// A single line in a subplot.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub color: Color32,
    /// `None` for the mean overlay.
    pub bucket: Option<RunBucket>,
}

/// Curves of one group, clamped and coloured once when the view loads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupCurves {
    pub runs: Vec<Curve>,
    pub mean: Option<Curve>,
}

impl GroupCurves {
    pub fn build(group: &ExperimentGroup, last_epoch: usize, colors: &SeriesColors) -> Self {
        let runs = group
            .runs
            .iter()
            .map(|run| Curve {
                name: run.file_name.clone(),
                points: series::run_curve(run, last_epoch),
                color: colors.for_bucket(run.bucket),
                bucket: Some(run.bucket),
            })
            .collect();
        let mean = series::mean_curve(&group.runs, last_epoch).map(|points| Curve {
            name: "mean".to_string(),
            points,
            color: colors.mean,
            bucket: None,
        });
        GroupCurves { runs, mean }
    }

    /// Run curves, followed by the mean when `show_mean` is set.
    pub fn visible(&self, show_mean: bool) -> impl Iterator<Item = &Curve> {
        self.runs
            .iter()
            .chain(self.mean.iter().filter(move |_| show_mean))
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// A figure and whether its window is still open.
#[derive(Debug, Clone)]
pub struct FigureWindow {
    pub layout: FigureLayout,
    pub open: bool,
}

/// Experiment groups laid out over one or more figures.
#[derive(Debug, Clone)]
pub struct ValidationView {
    pub config: ValidationConfig,
    pub groups: Vec<ExperimentGroup>,
    pub figures: Vec<FigureWindow>,
    /// Parallel to `groups`.
    pub curves: Vec<GroupCurves>,
    pub spacing: FigureSpacing,
}

impl ValidationView {
    pub fn load(config: ValidationConfig, colors: &SeriesColors) -> crate::error::Result<Self> {
        if config.figures == 0 || config.last_epoch == 0 {
            return Err(PlotError::Configuration(format!(
                "figure count and last epoch must be positive (got {} and {})",
                config.figures, config.last_epoch
            )));
        }
        let groups = loader::load_experiment_root(&config.root)?;
        let max_figures = groups.len().max(1);
        if config.figures > max_figures {
            return Err(PlotError::Configuration(format!(
                "{} figures requested but {} holds only {} experiment group(s)",
                config.figures,
                config.root.display(),
                groups.len()
            )));
        }
        let curves = groups
            .iter()
            .map(|g| GroupCurves::build(g, config.last_epoch, colors))
            .collect();
        let figures = layout_figures(groups.len(), config.figures, config.grid_sizing)
            .into_iter()
            .map(|layout| FigureWindow { layout, open: true })
            .collect();
        Ok(ValidationView {
            config,
            groups,
            figures,
            curves,
            spacing: FigureSpacing::default(),
        })
    }

    /// The group shown at `(row, col)` of figure `figure`, with its curves.
    pub fn cell(
        &self,
        figure: usize,
        row: usize,
        col: usize,
    ) -> Option<(&ExperimentGroup, &GroupCurves)> {
        let index = *self.figures.get(figure)?.layout.cells.get(row, col)?;
        Some((self.groups.get(index)?, self.curves.get(index)?))
    }

    pub fn run_count(&self) -> usize {
        self.groups.iter().map(|g| g.runs.len()).sum()
    }
}

/// Training and optional test error logs.
#[derive(Debug, Clone)]
pub struct ErrorView {
    pub train: ErrorLog,
    pub test: Option<ErrorLog>,
    pub size: usize,
}

impl ErrorView {
    pub fn load(config: &ErrorsConfig) -> crate::error::Result<Self> {
        let train = loader::load_error_log(&config.train)?;
        let test = config
            .test
            .as_deref()
            .map(loader::load_error_log)
            .transpose()?;
        Ok(ErrorView {
            train,
            test,
            size: config.size,
        })
    }
}

#[derive(Debug, Clone)]
pub enum View {
    Validation(ValidationView),
    Errors(ErrorView),
    Points(PointSet),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub view: View,

    pub colors: SeriesColors,

    /// Whether the mean overlay is drawn in validation subplots.
    pub show_mean: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load everything the request needs. Any failure here is fatal.
    pub fn from_request(request: ViewRequest) -> Result<Self> {
        let colors = SeriesColors::default();
        let (view, show_mean) = match request {
            ViewRequest::Validation(config) => {
                let root = config.root.clone();
                let show_mean = config.show_mean;
                let view = ValidationView::load(config, &colors).with_context(|| {
                    format!("loading experiment root {}", root.display())
                })?;
                (View::Validation(view), show_mean)
            }
            ViewRequest::Errors(config) => {
                let view = ErrorView::load(&config).context("loading error logs")?;
                (View::Errors(view), false)
            }
            ViewRequest::Points(path) => {
                let points = loader::load_points(&path)
                    .with_context(|| format!("loading points from {}", path.display()))?;
                (View::Points(points), false)
            }
        };

        Ok(AppState {
            view,
            colors,
            show_mean,
            status_message: None,
        })
    }

    /// Replace the experiment root of a validation view, keeping the old
    /// view if the new root fails to load.
    pub fn reload_root(&mut self, root: PathBuf) {
        let View::Validation(current) = &self.view else {
            return;
        };
        let config = ValidationConfig {
            root: root.clone(),
            ..current.config.clone()
        };
        match ValidationView::load(config, &self.colors) {
            Ok(view) => {
                log::info!(
                    "Switched to {} ({} groups)",
                    root.display(),
                    view.groups.len()
                );
                self.view = View::Validation(view);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load experiment root: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Short description of what is loaded, for the top bar.
    pub fn summary(&self) -> String {
        match &self.view {
            View::Validation(v) => format!(
                "{} groups, {} runs across {} figure(s)",
                v.groups.len(),
                v.run_count(),
                v.figures.len()
            ),
            View::Errors(e) => match &e.test {
                Some(test) => format!("{} / {}", e.train.name, test.name),
                None => e.train.name.clone(),
            },
            View::Points(p) => format!("{} points", p.len()),
        }
    }
}
