use eframe::egui::{self, Color32, RichText, Ui};

use launch_dash::binding::Dashboard;
use launch_dash::data::model::{LaunchSite, SiteFilter};
use launch_dash::state::InputEvent;

use crate::app::Controls;

// ---------------------------------------------------------------------------
// Left side panel – selector widgets
// ---------------------------------------------------------------------------

/// Render the selector panel. Returns the input event produced this frame, if any.
///
/// Only one widget can change per frame, so one event is enough.
pub fn side_panel(ui: &mut Ui, controls: &mut Controls) -> Option<InputEvent> {
    let mut event = None;

    ui.heading("Filters");
    ui.separator();

    // ---- Site dropdown ----
    ui.strong("Launch site");
    let previous_site = controls.site_label.clone();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(display_name(&controls.site_label))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(
                &mut controls.site_label,
                SiteFilter::ALL_LABEL.to_string(),
                "All Sites",
            );
            for site in LaunchSite::ALL {
                ui.selectable_value(&mut controls.site_label, site.label().to_string(), site.label());
            }
        });
    if controls.site_label != previous_site {
        event = Some(InputEvent::SiteFilter(controls.site_label.clone()));
    }

    ui.add_space(12.0);

    // ---- Payload range ----
    ui.strong("Payload range (kg)");
    // The seeded bounds may sit off the step grid; snap only what the user moved.
    let slider = &controls.slider;
    let mut changed = false;
    for (value, label) in controls.range.iter_mut().zip(["Low", "High"]) {
        let response = ui.add(
            egui::Slider::new(value, slider.min..=slider.max)
                .clamping(egui::SliderClamping::Never)
                .text(label),
        );
        if response.changed() {
            *value = slider.snap(*value);
            changed = true;
        }
    }

    ui.horizontal(|ui: &mut Ui| {
        for mark in &slider.marks {
            ui.small(format!("{mark:.0}"));
        }
    });

    if controls.range[0] > controls.range[1] {
        ui.label(RichText::new("Low is above high").color(Color32::RED));
    }

    if changed {
        event = Some(InputEvent::PayloadRange(controls.range));
    }
    event
}

fn display_name(site_label: &str) -> &str {
    if site_label == SiteFilter::ALL_LABEL {
        "All Sites"
    } else {
        site_label
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with row counts and the status line.
pub fn top_bar(ui: &mut Ui, dashboard: &Dashboard, status_message: Option<&str>) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("SpaceX Launch Records Dashboard");

        ui.separator();

        let selectors = dashboard.selectors();
        ui.label(format!(
            "{} launches loaded, {} shown ({}, {:.0}–{:.0} kg)",
            dashboard.dataset().len(),
            dashboard.scatter().points.len(),
            selectors.site_filter,
            selectors.payload_range.low,
            selectors.payload_range.high
        ));

        if let Some(msg) = status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

#[cfg(test)]
mod tests {
    use launch_dash::config::SliderConfig;

    use super::*;

    fn controls(range: [f64; 2]) -> Controls {
        Controls {
            site_label: SiteFilter::ALL_LABEL.to_string(),
            range,
            slider: SliderConfig::default().covering(range[0], range[1]),
        }
    }

    /// Run one headless egui frame over the selector panel.
    fn run_frame(ctx: &egui::Context, controls: &mut Controls) -> Option<InputEvent> {
        let mut event = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                if let Some(e) = side_panel(ui, controls) {
                    event = Some(e);
                }
            });
        });
        event
    }

    #[test]
    fn untouched_panel_keeps_the_observed_bounds() {
        let ctx = egui::Context::default();
        // 500 is off the 1000 kg step grid
        let mut controls = controls([500.0, 9000.0]);
        for _ in 0..3 {
            assert_eq!(run_frame(&ctx, &mut controls), None);
        }
        assert_eq!(controls.range, [500.0, 9000.0]);
        assert_eq!(controls.site_label, "ALL");
    }

    #[test]
    fn bounds_wider_than_the_slider_are_left_alone() {
        let ctx = egui::Context::default();
        let mut controls = controls([0.0, 15600.0]);
        assert_eq!(run_frame(&ctx, &mut controls), None);
        assert_eq!(controls.range, [0.0, 15600.0]);
    }
}
