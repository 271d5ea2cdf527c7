pub mod error;
pub mod event;
pub mod sink;
pub mod state;

pub use error::{Result, TeleError};
pub use event::{Frame, Message, Phase, TickInfo};
pub use sink::RenderSink;
pub use state::{Metric, MetricId, Sample, SampleSet, SeriesSnapshot, SeriesView};
