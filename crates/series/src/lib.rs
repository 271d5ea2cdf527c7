pub mod channel;
pub mod generator;
pub mod registry;
pub mod rolling;
pub mod scheduler;

pub use channel::ChannelSink;
pub use generator::SampleGenerator;
pub use registry::SeriesRegistry;
pub use rolling::RollingSeries;
pub use scheduler::Scheduler;

use tele_config::TeleConfig;
use tele_core::{Message, Result};
use tokio::sync::mpsc;
use tracing::error;

/// Channel slots beyond the warm-up burst.
const FRAME_HEADROOM: usize = 4;

/// Spawn a background Tokio task that runs a [`Scheduler`] built from
/// `config` and forwards every rendered [`Frame`](tele_core::Frame) through
/// the returned channel.
///
/// The channel is sized so the synchronous warm-up burst always fits.  The
/// task stops automatically when the receiver is dropped; its last message
/// is `Message::Stopped` when the receiver is still listening.
pub fn spawn_scheduler(config: &TeleConfig) -> Result<mpsc::Receiver<Message>> {
    let mut scheduler = Scheduler::from_config(config)?;
    let (tx, rx) = mpsc::channel(scheduler.warm_up_count() + 1 + FRAME_HEADROOM);

    tokio::spawn(async move {
        let mut sink = ChannelSink::new(tx);

        let reason = match scheduler.run(&mut sink).await {
            Ok(())  => "render sink closed".to_string(),
            Err(e)  => {
                error!("Scheduler stopped: {e}");
                e.to_string()
            }
        };

        sink.send_stopped(reason).await;
    });

    Ok(rx)
}
