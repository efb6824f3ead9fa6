use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "launch-dash.toml";

/// Dashboard settings. Every field has a default so a partial TOML file
/// (or none at all) works.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashConfig {
    #[serde(default = "DashConfig::default_data_path")]
    pub data_path: PathBuf,
    #[serde(default = "DashConfig::default_slider_min")]
    pub slider_min: f64,
    #[serde(default = "DashConfig::default_slider_max")]
    pub slider_max: f64,
    #[serde(default = "DashConfig::default_slider_step")]
    pub slider_step: f64,
    #[serde(default = "DashConfig::default_window_width")]
    pub window_width: f32,
    #[serde(default = "DashConfig::default_window_height")]
    pub window_height: f32,
}

impl DashConfig {
    fn default_data_path() -> PathBuf {
        PathBuf::from("spacex_launch_dash.csv")
    }
    fn default_slider_min() -> f64 {
        0.0
    }
    fn default_slider_max() -> f64 {
        10_000.0
    }
    fn default_slider_step() -> f64 {
        1_000.0
    }
    fn default_window_width() -> f32 {
        1200.0
    }
    fn default_window_height() -> f32 {
        900.0
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("parsing config TOML")
    }

    /// Read `path` if given; otherwise read [`DEFAULT_CONFIG_PATH`] when it
    /// exists and fall back to defaults when it does not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if !default_path.exists() {
                    log::debug!("no {DEFAULT_CONFIG_PATH}, using default settings");
                    return Ok(Self::default());
                }
                default_path
            }
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in config {}", path.display()))
    }
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            data_path: Self::default_data_path(),
            slider_min: Self::default_slider_min(),
            slider_max: Self::default_slider_max(),
            slider_step: Self::default_slider_step(),
            window_width: Self::default_window_width(),
            window_height: Self::default_window_height(),
        }
    }
}
