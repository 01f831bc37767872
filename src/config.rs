use std::env;
use std::path::PathBuf;

/// Dataset used when neither a CLI argument nor `LAUNCH_DASH_DATA` is given.
pub const DEFAULT_DATASET: &str = "spacex_launch_dash.csv";
pub const DATASET_ENV: &str = "LAUNCH_DASH_DATA";
pub const HEADLESS_ENV: &str = "LAUNCH_DASH_HEADLESS";
pub const HEADLESS_FLAG: &str = "--headless";

/// Configuration loaded from the command line and environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct DashConfig {
    pub dataset_path: PathBuf,
    /// Print the initial chart specs as JSON instead of opening a window.
    pub headless: bool,
    pub slider: SliderConfig,
}

impl DashConfig {
    /// Load configuration from the process arguments and environment.
    ///
    /// The first non-flag argument wins over `LAUNCH_DASH_DATA`.
    pub fn from_env() -> Self {
        Self::from_sources(env::args().skip(1), |key| env::var(key).ok())
    }

    pub fn from_sources(
        args: impl IntoIterator<Item = String>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let mut headless = var(HEADLESS_ENV)
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let mut path_arg = None;

        for arg in args {
            if arg == HEADLESS_FLAG {
                headless = true;
            } else if path_arg.is_none() {
                path_arg = Some(arg);
            } else {
                log::warn!("Ignoring extra argument '{arg}'");
            }
        }

        let dataset_path = path_arg
            .or_else(|| var(DATASET_ENV))
            .unwrap_or_else(|| DEFAULT_DATASET.to_string())
            .into();

        Self {
            dataset_path,
            headless,
            slider: SliderConfig::default(),
        }
    }
}

/// Layout of the payload range slider, in kg.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<f64>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10000.0,
            step: 1000.0,
            marks: vec![0.0, 2500.0, 5000.0, 7500.0, 10000.0],
        }
    }
}

impl SliderConfig {
    /// Widen the slider so the dataset's observed bounds are reachable.
    pub fn covering(mut self, min: f64, max: f64) -> Self {
        self.min = self.min.min(min);
        self.max = self.max.max(max);
        self
    }

    /// Round a dragged value to the nearest step, staying inside `min..=max`.
    pub fn snap(&self, value: f64) -> f64 {
        if self.step <= 0.0 {
            return value.clamp(self.min, self.max);
        }
        let snapped = self.min + ((value - self.min) / self.step).round() * self.step;
        snapped.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(args: &[&str], vars: &[(&str, &str)]) -> DashConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DashConfig::from_sources(args.iter().map(|a| a.to_string()), |k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_to_the_launch_csv() {
        let cfg = config(&[], &[]);
        assert_eq!(cfg.dataset_path, PathBuf::from(DEFAULT_DATASET));
        assert!(!cfg.headless);
        assert_eq!(cfg.slider.step, 1000.0);
    }

    #[test]
    fn argument_overrides_environment() {
        let cfg = config(&["launches.parquet"], &[(DATASET_ENV, "env.csv")]);
        assert_eq!(cfg.dataset_path, PathBuf::from("launches.parquet"));
        let cfg = config(&[], &[(DATASET_ENV, "env.csv")]);
        assert_eq!(cfg.dataset_path, PathBuf::from("env.csv"));
    }

    #[test]
    fn headless_from_flag_or_env() {
        assert!(config(&["--headless", "a.csv"], &[]).headless);
        assert!(config(&[], &[(HEADLESS_ENV, "1")]).headless);
        assert!(!config(&[], &[(HEADLESS_ENV, "0")]).headless);
    }

    #[test]
    fn slider_widens_to_cover_the_data() {
        let slider = SliderConfig::default().covering(0.0, 15600.0);
        assert_eq!(slider.max, 15600.0);
        assert_eq!(slider.min, 0.0);
    }

    #[test]
    fn snap_rounds_to_step_within_bounds() {
        let slider = SliderConfig::default().covering(0.0, 15600.0);
        assert_eq!(slider.snap(1400.0), 1000.0);
        assert_eq!(slider.snap(1600.0), 2000.0);
        // the top step would overshoot the widened max
        assert_eq!(slider.snap(15590.0), 15600.0);
        assert_eq!(slider.snap(-50.0), 0.0);
    }
}
