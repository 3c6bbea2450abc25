//! Projection profile pane: the most recent detector row as a line plot

use egui::Ui;
use egui_plot::{Line, Plot, PlotPoints};

/// Render the projection profile pane
pub fn render(profile: Option<&[f64]>, ui: &mut Ui) {
    ui.heading("Projection Profile");
    ui.separator();

    let Some(values) = profile else {
        ui.centered_and_justified(|ui| {
            ui.label("Waiting for data...");
        });
        return;
    };

    let points: Vec<[f64; 2]> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| [i as f64, v])
        .collect();

    Plot::new("projection_profile")
        .x_axis_label("detector position")
        .y_axis_label("signal")
        .show(ui, |plot_ui| {
            let line = Line::new("Projection", PlotPoints::from(points)).width(1.5);
            plot_ui.line(line);
        });
}
