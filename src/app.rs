use eframe::egui;

use launch_dash::binding::Dashboard;
use launch_dash::config::SliderConfig;
use launch_dash::data::model::{LaunchSite, Outcome};
use launch_dash::state::InputEvent;

use crate::color::ColorMap;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// Widget values
// ---------------------------------------------------------------------------

/// Raw widget values. These may run ahead of the dashboard's selectors when
/// an event is rejected.
pub struct Controls {
    pub site_label: String,
    pub range: [f64; 2],
    pub slider: SliderConfig,
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub dashboard: Dashboard,
    pub controls: Controls,
    /// Colours for booster categories (scatter).
    pub booster_colors: ColorMap,
    /// Colours for pie slices: sites and outcomes.
    pub slice_colors: ColorMap,
    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl LaunchDashApp {
    pub fn new(dashboard: Dashboard, slider: SliderConfig) -> Self {
        let selectors = dashboard.selectors();
        let bounds = dashboard.dataset().bounds();
        let booster_colors = ColorMap::new(dashboard.dataset().booster_categories());
        let slice_labels = LaunchSite::ALL
            .iter()
            .map(|s| s.label())
            .chain([Outcome::Success.label(), Outcome::Failure.label()]);

        Self {
            controls: Controls {
                site_label: selectors.site_filter.label().to_string(),
                range: [selectors.payload_range.low, selectors.payload_range.high],
                slider: slider.covering(bounds.min, bounds.max),
            },
            booster_colors,
            slice_colors: ColorMap::new(slice_labels),
            status_message: None,
            dashboard,
        }
    }

    /// Run one event through the dashboard. Rejections only touch the status line.
    pub fn dispatch(&mut self, event: InputEvent) {
        match self.dashboard.dispatch(&event) {
            Ok(recomputed) => {
                if !recomputed.is_empty() {
                    self.status_message = None;
                }
            }
            Err(e) => self.status_message = Some(format!("Ignored input: {e}")),
        }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.dashboard, self.status_message.as_deref());
        });

        // ---- Left side panel: selectors ----
        let event = egui::SidePanel::left("selector_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| panels::side_panel(ui, &mut self.controls))
            .inner;

        // Outputs are recomputed before the central panel reads them.
        if let Some(event) = event {
            self.dispatch(event);
        }

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let half = (ui.available_height() / 2.0 - 30.0).max(120.0);
            plot::proportion_chart(ui, self.dashboard.proportion(), &self.slice_colors, half);
            ui.separator();
            plot::scatter_chart(ui, self.dashboard.scatter(), &self.booster_colors, half);
        });
    }
}
