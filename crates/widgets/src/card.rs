use crate::chart::LineChart;
use iced::{
    widget::{canvas::Canvas, column, container, row, text, Space},
    Alignment, Element, Length,
};
use tele_core::{Metric, SeriesSnapshot};
use tele_theme::{Color, Theme};

/// One dashboard tile: title, newest reading and the scrolling line chart.
#[derive(Debug, Clone)]
pub struct ChartCard {
    metric: Metric,
    color:  Color,
}

impl ChartCard {
    pub fn new(metric: Metric, color: Color) -> Self {
        Self { metric, color }
    }

    pub fn metric(&self) -> &Metric {
        &self.metric
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn view<'a, Message: 'a>(
        &'a self,
        series: &'a SeriesSnapshot,
        theme: &'a Theme,
    ) -> Element<'a, Message> {
        let card = theme.card_style();

        let reading = match series.latest() {
            Some((label, value)) => format!("{}  ·  {label}", format_reading(value, &self.metric.unit)),
            None                 => "—".to_string(),
        };

        let header = row![
            text(self.metric.label.as_str())
                .size(theme.font_size + 2.0)
                .color(self.color.to_iced()),
            Space::new().width(Length::Fill),
            text(reading)
                .size(theme.font_size)
                .color(card.accent.to_iced()),
        ]
        .align_y(Alignment::Center);

        let chart = Canvas::new(LineChart {
            series,
            y_max: self.metric.max,
            color: self.color,
            style: theme.chart_style(),
        })
        .width(Length::Fill)
        .height(Length::Fixed(theme.chart_height));

        let scale = text(format!(
            "0 – {} {}",
            format_axis(self.metric.max),
            self.metric.unit
        ))
        .size(theme.font_size_offset(-3.0));

        let bg = card.background.to_iced();
        let fg = card.foreground.to_iced();
        let radius = card.border_radius;

        container(column![header, chart, scale].spacing(6))
            .padding(card.padding)
            .width(Length::Fill)
            .style(move |_: &iced::Theme| iced::widget::container::Style {
                background: Some(iced::Background::Color(bg)),
                text_color: Some(fg),
                border: iced::Border { radius: radius.into(), ..Default::default() },
                ..Default::default()
            })
            .into()
    }
}

/// Newest value with one decimal, except RPM-sized values which read better whole.
pub fn format_reading(value: f64, unit: &str) -> String {
    if value.abs() >= 1_000.0 {
        format!("{value:.0} {unit}")
    } else {
        format!("{value:.1} {unit}")
    }
}

fn format_axis(max: f64) -> String {
    if max.fract() == 0.0 {
        format!("{max:.0}")
    } else {
        format!("{max:.1}")
    }
}
