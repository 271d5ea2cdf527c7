pub mod colors;
pub mod style;

pub use colors::Color;
pub use style::{CardStyle, ChartStyle};

use tele_config::ThemeConfig;

/// Compiled theme derived from [`ThemeConfig`].
///
/// All colors are pre-parsed from hex strings into normalised `[0, 1]` RGBA.
/// Calling [`Theme::from_config`] is infallible — invalid color strings fall
/// back to safe defaults.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background:    Color,
    pub foreground:    Color,
    pub accent:        Color,
    pub card_bg:       Color,
    pub grid:          Color,
    pub font_size:     f32,
    pub border_radius: f32,
    pub padding:       u16,
    pub gap:           u16,
    pub line_width:    f32,
    pub point_radius:  f32,
    pub chart_height:  f32,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        Self {
            background:    Color::from_hex(&cfg.background).unwrap_or(Color::DARK),
            foreground:    Color::from_hex(&cfg.foreground).unwrap_or(Color::WHITE),
            accent:        Color::from_hex(&cfg.accent).unwrap_or(Color::PURPLE),
            card_bg:       Color::from_hex(&cfg.card_bg).unwrap_or(Color::MANTLE),
            grid:          Color::from_hex(&cfg.grid).unwrap_or(Color::SURFACE),
            font_size:     cfg.font_size.max(1.0),
            border_radius: cfg.border_radius,
            padding:       cfg.padding,
            gap:           cfg.gap,
            line_width:    cfg.line_width.max(0.5),
            point_radius:  cfg.point_radius.max(0.0),
            chart_height:  cfg.chart_height.max(40.0),
        }
    }

    /// Font size shifted by `delta` points, never below one point.
    pub fn font_size_offset(&self, delta: f32) -> f32 {
        (self.font_size + delta).max(1.0)
    }

    pub fn card_style(&self) -> CardStyle {
        CardStyle {
            background:    self.card_bg,
            foreground:    self.foreground,
            accent:        self.accent,
            border_radius: self.border_radius,
            padding:       self.padding,
        }
    }

    pub fn chart_style(&self) -> ChartStyle {
        ChartStyle {
            grid:         self.grid,
            line_width:   self.line_width,
            point_radius: self.point_radius,
            height:       self.chart_height,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}
