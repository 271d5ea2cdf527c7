use tele_core::{Frame, Message, Metric, MetricId, Phase, RenderSink, SeriesSnapshot, SeriesView, TickInfo};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

/// Render sink that batches one tick's snapshots into a [`Frame`] and hands
/// it to another task.
///
/// Frames are sent with `try_send`: a lagging consumer loses frames rather
/// than stalling the scheduler.
pub struct ChannelSink {
    tx:      mpsc::Sender<Message>,
    pending: Vec<(MetricId, SeriesSnapshot)>,
    dropped: u64,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<Message>) -> Self {
        Self {
            tx,
            pending: Vec::new(),
            dropped: 0,
        }
    }

    /// Frames discarded because the channel was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Tell the consumer the scheduler has ended.
    ///
    /// Unlike frames, this final message waits for channel space.
    pub async fn send_stopped(&self, reason: String) {
        if self.tx.send(Message::Stopped(reason)).await.is_err() {
            debug!("Frame consumer gone; stop reason not delivered");
        }
    }

    fn send(&mut self, msg: Message) {
        match self.tx.try_send(msg) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
                warn!("Frame consumer lagging; dropped {} message(s) so far", self.dropped);
            }
            Err(TrySendError::Closed(_)) => {} // is_closed() ends the loop
        }
    }
}

impl RenderSink for ChannelSink {
    fn render(&mut self, metric: &Metric, series: SeriesView<'_>) {
        self.pending.push((metric.id, series.to_snapshot()));
    }

    fn finish_tick(&mut self, tick: &TickInfo) {
        let frame = Frame {
            tick:   tick.clone(),
            series: std::mem::take(&mut self.pending),
        };
        self.send(Message::Frame(frame));
    }

    fn phase_changed(&mut self, phase: Phase) {
        if phase == Phase::Periodic {
            self.send(Message::WarmUpComplete);
        }
    }

    fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
