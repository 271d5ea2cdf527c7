pub mod schema;

pub use schema::{
    DashboardConfig, MetricConfig, MetricsConfig, OutputMode, TeleConfig, ThemeConfig,
};

use chrono::format::{Item, StrftimeItems};
use std::path::{Path, PathBuf};
use tele_core::{Result, TeleError};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "TELE_CONFIG";

/// Load configuration from a TOML file.  Returns `TeleConfig::default()` if
/// the file doesn't exist so the dashboard always has sensible defaults.
///
/// The result is validated; see [`validate`].
pub fn load(path: impl AsRef<Path>) -> Result<TeleConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(TeleConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| TeleError::Config(format!("cannot read '{}': {e}", path.display())))?;

    let config: TeleConfig =
        toml::from_str(&raw).map_err(|e| TeleError::Config(format!("TOML parse error: {e}")))?;

    validate(&config)?;
    tracing::info!("Loaded config from '{}'", path.display());
    Ok(config)
}

/// Reject settings the scheduler cannot run with.
pub fn validate(config: &TeleConfig) -> Result<()> {
    let dash = &config.dashboard;
    if dash.capacity == 0 {
        return Err(TeleError::Config("dashboard.capacity must be at least 1".into()));
    }
    if dash.interval_ms == 0 {
        return Err(TeleError::Config("dashboard.interval_ms must be at least 1".into()));
    }
    if dash.label_format.is_empty()
        || StrftimeItems::new(&dash.label_format).any(|item| matches!(item, Item::Error))
    {
        return Err(TeleError::Config(format!(
            "dashboard.label_format '{}' is not a valid strftime format",
            dash.label_format
        )));
    }

    for metric in config.metric_definitions() {
        if !metric.has_drawable_range() {
            return Err(TeleError::Config(format!(
                "metrics.{}: range [{}, {}) is empty or too wide",
                metric.id, metric.min, metric.max
            )));
        }
    }

    Ok(())
}

/// Return the config path: `$TELE_CONFIG` if set, otherwise [`default_path`].
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(default_path)
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("tele").join("tele.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tele_core::MetricId;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load(dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.dashboard.capacity, 20);
        assert_eq!(cfg.dashboard.interval_ms, 2_000);
        assert_eq!(cfg.dashboard.output, OutputMode::Log);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_config(
            r##"
            [dashboard]
            capacity = 4
            output = "json"

            [metrics.rpm]
            max = 8000.0
            color = "#f38ba8"
            "##,
        );

        let cfg = load(file.path()).unwrap();
        assert_eq!(cfg.dashboard.capacity, 4);
        assert_eq!(cfg.dashboard.interval_ms, 2_000);
        assert_eq!(cfg.dashboard.output, OutputMode::Json);

        let defs = cfg.metric_definitions();
        let rpm = defs.iter().find(|m| m.id == MetricId::Rpm).unwrap();
        assert_eq!((rpm.min, rpm.max), (500.0, 8000.0));
        assert_eq!(rpm.label, "RPM");
        assert_eq!(cfg.metric_color(MetricId::Rpm), Some("#f38ba8"));
        assert_eq!(cfg.metric_color(MetricId::Fuel), None);
    }

    #[test]
    fn rejects_empty_range() {
        let file = write_config("[metrics.fuel]\nmin = 50.0\nmax = 50.0\n");
        let err = load(file.path()).unwrap_err();
        assert!(err.to_string().contains("metrics.fuel"));
    }

    #[test]
    fn rejects_range_wider_than_f64() {
        let file = write_config("[metrics.speed]\nmin = -1e308\nmax = 1e308\n");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, TeleError::Config(_)));
        assert!(err.to_string().contains("metrics.speed"));
    }

    #[test]
    fn rejects_zero_capacity_and_interval() {
        let file = write_config("[dashboard]\ncapacity = 0\n");
        assert!(matches!(load(file.path()), Err(TeleError::Config(_))));

        let file = write_config("[dashboard]\ninterval_ms = 0\n");
        assert!(matches!(load(file.path()), Err(TeleError::Config(_))));
    }

    #[test]
    fn rejects_bad_label_format() {
        let mut cfg = TeleConfig::default();
        cfg.dashboard.label_format = "%Q".to_string();
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn reports_toml_errors() {
        let file = write_config("[dashboard\ncapacity = ");
        let err = load(file.path()).unwrap_err();
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn default_path_ends_with_tele_toml() {
        assert!(default_path().ends_with("tele/tele.toml"));
    }
}
