use eframe::egui::{self, ViewportBuilder, ViewportClass, ViewportId};

use crate::state::{AppState, View};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RunplotApp {
    pub state: AppState,
}

impl RunplotApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for RunplotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: first figure / single view ----
        let state = &self.state;
        egui::CentralPanel::default().show(ctx, |ui| match &state.view {
            View::Validation(view) => plot::validation_figure(ui, view, 0, state.show_mean),
            View::Errors(view) => plot::error_curves(ui, view),
            View::Points(points) => plot::point_scatter(ui, points),
        });

        // ---- Remaining figures: one native window each ----
        show_secondary_figures(ctx, &mut self.state);
    }
}

fn show_secondary_figures(ctx: &egui::Context, state: &mut AppState) {
    let View::Validation(view) = &mut state.view else {
        return;
    };
    let show_mean = state.show_mean;

    for index in 1..view.figures.len() {
        if !view.figures[index].open {
            continue;
        }
        let title = format!("Figure {}", index + 1);
        let closed = ctx.show_viewport_immediate(
            ViewportId::from_hash_of(("figure", index)),
            ViewportBuilder::default()
                .with_title(&title)
                .with_inner_size([1200.0, 800.0]),
            |ctx, class| {
                if class == ViewportClass::Embedded {
                    // backend without multi-viewport support
                    let mut open = true;
                    egui::Window::new(&title).open(&mut open).show(ctx, |ui| {
                        plot::validation_figure(ui, view, index, show_mean);
                    });
                    return !open;
                }
                egui::CentralPanel::default().show(ctx, |ui| {
                    plot::validation_figure(ui, view, index, show_mean);
                });
                ctx.input(|i| i.viewport().close_requested())
            },
        );
        if closed {
            log::debug!("{title} closed");
            view.figures[index].open = false;
        }
    }
}
