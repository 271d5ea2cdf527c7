use crate::state::{MetricId, SeriesSnapshot};

/// Scheduler lifecycle state.
///
/// `WarmUp` is the initial state; `Periodic` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    WarmUp,
    Periodic,
}

/// Describes the tick that was just rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct TickInfo {
    /// Zero-based tick counter, warm-up ticks included.
    pub index: u64,
    pub phase: Phase,
    /// Timestamp label shared by every sample of this tick.
    pub label: String,
}

/// Every series' content after one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub tick:   TickInfo,
    pub series: Vec<(MetricId, SeriesSnapshot)>,
}

impl Frame {
    pub fn get(&self, id: MetricId) -> Option<&SeriesSnapshot> {
        self.series.iter().find(|(m, _)| *m == id).map(|(_, s)| s)
    }
}

/// All messages that can flow from the scheduler task to a front end.
#[derive(Debug, Clone)]
pub enum Message {
    /// A tick completed; carries the rendered content of every series.
    Frame(Frame),
    /// The synchronous pre-fill finished; periodic updates follow.
    WarmUpComplete,
    /// The scheduler task ended (carries the reason).
    Stopped(String),
}
