use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, Points};

use crate::data::model::{Columns, PointSet};
use crate::data::series;
use crate::state::{ErrorView, ValidationView};

const TITLE_HEIGHT: f32 = 14.0;

// ---------------------------------------------------------------------------
// Validation grid
// ---------------------------------------------------------------------------

/// Render figure `figure` of a validation view: one subplot per group,
/// every run of the group overlaid in its bucket colour.
pub fn validation_figure(
    ui: &mut Ui,
    view: &ValidationView,
    figure: usize,
    show_mean: bool,
) {
    let Some(window) = view.figures.get(figure) else {
        return;
    };
    let cells = &window.layout.cells;
    if window.layout.groups.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(format!(
                "Figure {} has no experiment groups from {}",
                window.layout.index + 1,
                view.config.root.display()
            ));
        });
        return;
    }

    let size = ui.available_size();
    let geometry = view
        .spacing
        .geometry(size.x, size.y, cells.rows(), cells.cols());
    let plot_height = (geometry.cell_height - TITLE_HEIGHT).max(20.0);

    ui.add_space(geometry.margin_top);
    ui.horizontal(|ui: &mut Ui| {
        ui.add_space(geometry.margin_left);
        egui::Grid::new(("figure_grid", figure))
            .spacing([geometry.gap_x, geometry.gap_y])
            .show(ui, |ui: &mut Ui| {
                for row in 0..cells.rows() {
                    for col in 0..cells.cols() {
                        let cell_size = egui::vec2(geometry.cell_width, geometry.cell_height);
                        let Some((group, curves)) = view.cell(figure, row, col) else {
                            ui.allocate_space(cell_size);
                            continue;
                        };

                        ui.vertical(|ui: &mut Ui| {
                            ui.set_width(geometry.cell_width);
                            ui.label(RichText::new(&group.name).size(10.0));
                            Plot::new(("cell", figure, row, col))
                                .width(geometry.cell_width)
                                .height(plot_height)
                                .allow_scroll(false)
                                .show(ui, |plot_ui| {
                                    for curve in curves.visible(show_mean) {
                                        let points: PlotPoints =
                                            curve.points.iter().copied().collect();
                                        let width = if curve.bucket.is_some() { 1.0 } else { 2.0 };
                                        plot_ui.line(
                                            Line::new(points)
                                                .name(&curve.name)
                                                .color(curve.color)
                                                .width(width),
                                        );
                                    }
                                });
                        });
                    }
                    ui.end_row();
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Error / accuracy curves
// ---------------------------------------------------------------------------

/// Error curve above, accuracy curve below; training solid red, test dashed blue.
pub fn error_curves(ui: &mut Ui, view: &ErrorView) {
    let half = (ui.available_height() / 2.0 - 2.0 * TITLE_HEIGHT).max(60.0);

    ui.strong("Error curve");
    metric_plot(ui, "error_curve", view, half, "Error", |c| &c.metric);
    ui.separator();
    ui.strong("Accuracy curve");
    metric_plot(ui, "accuracy_curve", view, half, "Accuracy", |c| &c.secondary);
}

fn metric_plot(
    ui: &mut Ui,
    id: &str,
    view: &ErrorView,
    height: f32,
    label: &str,
    column: impl Fn(&Columns) -> &Vec<f64>,
) {
    Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Epoch")
        .y_axis_label(label)
        .show(ui, |plot_ui| {
            let train = &view.train.columns;
            let points: PlotPoints = series::clamp(&train.epoch, column(train), view.size)
                .into_iter()
                .collect();
            plot_ui.line(
                Line::new(points)
                    .name(format!("Training {}", label.to_lowercase()))
                    .color(Color32::RED)
                    .width(1.5),
            );

            if let Some(test) = &view.test {
                let test = &test.columns;
                let points: PlotPoints = series::clamp(&test.epoch, column(test), view.size)
                    .into_iter()
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(format!("Test {}", label.to_lowercase()))
                        .color(Color32::BLUE)
                        .style(LineStyle::dashed_dense())
                        .width(1.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Predicted vs. true points
// ---------------------------------------------------------------------------

pub fn point_scatter(ui: &mut Ui, points: &PointSet) {
    Plot::new("points")
        .legend(Legend::default())
        .x_axis_label("x")
        .y_axis_label("y")
        .show(ui, |plot_ui| {
            let predicted: PlotPoints = points.predicted.iter().copied().collect();
            let truth: PlotPoints = points.truth.iter().copied().collect();
            plot_ui.points(
                Points::new(predicted)
                    .name("My result")
                    .color(Color32::RED)
                    .radius(2.5),
            );
            plot_ui.points(
                Points::new(truth)
                    .name("True result")
                    .color(Color32::BLUE)
                    .radius(2.5),
            );
        });
}
