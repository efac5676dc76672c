use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::data::model::GroupingColumn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Workbook loaded at startup.
    pub dataset_path: PathBuf,
    /// Initial proposed-order coefficient.
    pub default_coefficient: f64,
    /// Initial grouping column.
    pub default_category: GroupingColumn,
    pub window_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("./input/FinalOutput230520.xlsx"),
            default_coefficient: 75.0,
            default_category: GroupingColumn::Category1,
            window_title: "El Calcetines: Dashboard".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional `dashboard.toml`, and
    /// `DASHBOARD_*` environment variables (a `.env` file is honoured).
    pub fn load() -> anyhow::Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                log::warn!("Ignoring unreadable .env file: {e}");
            }
        }

        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        // Add config file if it exists
        config = config.add_source(config::File::with_name("dashboard").required(false));

        // Add environment variables with prefix "DASHBOARD_"
        config = config.add_source(
            config::Environment::with_prefix("DASHBOARD").prefix_separator("_"),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    /// Replace the dataset path with the first command-line argument, if any.
    pub fn with_args(mut self, mut args: impl Iterator<Item = String>) -> Self {
        if let Some(path) = args.next() {
            self.dataset_path = PathBuf::from(path);
        }
        self
    }

    /// Default coefficient clamped into the slider's range.
    pub fn initial_coefficient(&self) -> f64 {
        let range = crate::report::COEFFICIENT_RANGE;
        if self.default_coefficient.is_finite() {
            self.default_coefficient.clamp(*range.start(), *range.end())
        } else {
            *range.start()
        }
    }
}
