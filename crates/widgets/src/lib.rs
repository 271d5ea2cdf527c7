pub mod card;
pub mod chart;

pub use card::ChartCard;
pub use chart::LineChart;
