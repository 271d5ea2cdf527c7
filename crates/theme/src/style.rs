use crate::colors::Color;

/// Visual settings for a chart card (title row + plot).
#[derive(Debug, Clone)]
pub struct CardStyle {
    pub background:    Color,
    pub foreground:    Color,
    /// Colour of the newest-value readout.
    pub accent:        Color,
    pub border_radius: f32,
    pub padding:       u16,
}

/// Visual settings for the plot area itself.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub grid:         Color,
    pub line_width:   f32,
    pub point_radius: f32,
    pub height:       f32,
}
