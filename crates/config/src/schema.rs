use serde::{Deserialize, Serialize};
use tele_core::{Metric, MetricId};

/// Root configuration structure parsed from `tele.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleConfig {
    /// Buffer, timer and output settings.
    pub dashboard: DashboardConfig,
    /// Per-metric overrides (`[metrics.speed]`, `[metrics.rpm]`, …).
    pub metrics: MetricsConfig,
    /// Theme / visual settings for the chart window.
    pub theme: ThemeConfig,
}

impl TeleConfig {
    /// Resolve the metric definitions, falling back to built-in values for
    /// anything not overridden.  Always returns every metric, in display order.
    pub fn metric_definitions(&self) -> Vec<Metric> {
        MetricId::ALL
            .into_iter()
            .map(|id| {
                let base = Metric::default_for(id);
                match self.metrics.get(id) {
                    Some(over) => over.apply(base),
                    None       => base,
                }
            })
            .collect()
    }

    /// Configured line colour for `id` (`None` = pick one at random).
    pub fn metric_color(&self, id: MetricId) -> Option<&str> {
        self.metrics
            .get(id)
            .and_then(|m| m.color.as_deref())
            .filter(|c| !c.is_empty())
    }
}

/// Core dashboard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Maximum number of points kept per chart.
    pub capacity: usize,
    /// Delay between periodic updates, in milliseconds.
    pub interval_ms: u64,
    /// `strftime` format for the per-tick timestamp label.
    pub label_format: String,
    /// Fixed RNG seed for reproducible runs.  Unset = seeded from entropy.
    pub seed: Option<u64>,
    /// Where the headless runner sends rendered series.
    pub output: OutputMode,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            capacity:     20,
            interval_ms:  2_000,
            label_format: "%H:%M:%S".to_string(),
            seed:         None,
            output:       OutputMode::Log,
        }
    }
}

/// Headless output target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// One log line per metric with a sparkline of the series.
    #[default]
    Log,
    /// One JSON object per metric per tick on stdout.
    Json,
}

/// One optional override block per metric.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MetricsConfig {
    pub speed:       Option<MetricConfig>,
    pub rpm:         Option<MetricConfig>,
    pub temperature: Option<MetricConfig>,
    pub fuel:        Option<MetricConfig>,
}

impl MetricsConfig {
    pub fn get(&self, id: MetricId) -> Option<&MetricConfig> {
        match id {
            MetricId::Speed       => self.speed.as_ref(),
            MetricId::Rpm         => self.rpm.as_ref(),
            MetricId::Temperature => self.temperature.as_ref(),
            MetricId::Fuel        => self.fuel.as_ref(),
        }
    }
}

/// Per-metric overrides; unset fields fall back to the built-in definition.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MetricConfig {
    pub label: Option<String>,
    pub unit:  Option<String>,
    pub min:   Option<f64>,
    pub max:   Option<f64>,
    /// Line colour (hex, e.g. `"#f38ba8"`).
    pub color: Option<String>,
}

impl MetricConfig {
    fn apply(&self, mut base: Metric) -> Metric {
        if let Some(label) = &self.label {
            base.label = label.clone();
        }
        if let Some(unit) = &self.unit {
            base.unit = unit.clone();
        }
        base.min = self.min.unwrap_or(base.min);
        base.max = self.max.unwrap_or(base.max);
        base
    }
}

/// Theme / styling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Window background color (hex, e.g. `"#1e1e2e"`).
    pub background: String,
    /// Primary text/foreground color.
    pub foreground: String,
    /// Accent / highlight color (newest value readout).
    pub accent: String,
    /// Chart card background.
    pub card_bg: String,
    /// Axis and grid line color.
    pub grid: String,
    /// Font size in points.
    pub font_size: f32,
    /// Corner radius for chart cards (pixels).
    pub border_radius: f32,
    /// Inner padding of each chart card (pixels).
    pub padding: u16,
    /// Gap between chart cards (pixels).
    pub gap: u16,
    /// Stroke width of the series line.
    pub line_width: f32,
    /// Radius of the per-sample point markers.
    pub point_radius: f32,
    /// Height of each chart's plot area.
    pub chart_height: f32,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background:    "#1e1e2e".to_string(), // Catppuccin Mocha — base
            foreground:    "#cdd6f4".to_string(), // Catppuccin Mocha — text
            accent:        "#cba6f7".to_string(), // Catppuccin Mocha — mauve
            card_bg:       "#181825".to_string(), // Catppuccin Mocha — mantle
            grid:          "#45475a".to_string(), // Catppuccin Mocha — surface1
            font_size:     14.0,
            border_radius: 6.0,
            padding:       12,
            gap:           12,
            line_width:    2.0,
            point_radius:  2.0,
            chart_height:  180.0,
        }
    }
}
