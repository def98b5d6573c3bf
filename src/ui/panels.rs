use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        let validation = matches!(state.view, View::Validation(_));

        if validation {
            let mut picked = None;
            ui.menu_button("File", |ui: &mut Ui| {
                if ui.button("Open experiment root…").clicked() {
                    ui.close_menu();
                    picked = pick_root_dialog();
                }
            });
            if let Some(root) = picked {
                state.reload_root(root);
            }
        }

        if let View::Validation(view) = &mut state.view {
            if view.figures.len() > 1 {
                ui.menu_button("Figures", |ui: &mut Ui| {
                    // figure 1 is the main window and cannot be closed on its own
                    for (i, window) in view.figures.iter_mut().enumerate().skip(1) {
                        ui.checkbox(&mut window.open, format!("Figure {}", i + 1));
                    }
                });
            }
        }

        ui.separator();
        ui.label(state.summary());

        if validation {
            ui.separator();
            if ui.selectable_label(state.show_mean, "Mean curve").clicked() {
                state.show_mean = !state.show_mean;
            }

            ui.separator();
            for (label, color) in state.colors.legend_entries() {
                ui.label(RichText::new(format!("━ {label}")).color(color));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn pick_root_dialog() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open experiment root")
        .pick_folder()
}
