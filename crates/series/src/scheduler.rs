use crate::{generator::SampleGenerator, registry::SeriesRegistry};
use rand::{rngs::StdRng, Rng};
use std::time::Duration;
use tele_config::TeleConfig;
use tele_core::{Phase, RenderSink, Result, TickInfo};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Drives generate → update → render cycles.
///
/// Starts in [`Phase::WarmUp`], where ⌊capacity / 2⌋ ticks run back to back,
/// then moves to [`Phase::Periodic`] and ticks once per interval until the
/// future is dropped or the sink reports it is closed.
pub struct Scheduler<R = StdRng> {
    generator: SampleGenerator<R>,
    registry:  SeriesRegistry,
    interval:  Duration,
    phase:     Phase,
    ticks:     u64,
}

impl Scheduler<StdRng> {
    /// Build a scheduler from validated configuration.
    pub fn from_config(config: &TeleConfig) -> Result<Self> {
        tele_config::validate(config)?;

        let dash    = &config.dashboard;
        let metrics = config.metric_definitions();
        let registry = SeriesRegistry::new(&metrics, dash.capacity);
        let generator = SampleGenerator::from_seed(metrics, dash.seed)
            .with_label_format(dash.label_format.as_str());

        Ok(Self::new(
            generator,
            registry,
            Duration::from_millis(dash.interval_ms),
        ))
    }
}

impl<R: Rng> Scheduler<R> {
    pub fn new(generator: SampleGenerator<R>, registry: SeriesRegistry, interval: Duration) -> Self {
        Self {
            generator,
            registry,
            interval,
            phase: Phase::WarmUp,
            ticks: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Ticks performed so far, warm-up included.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn registry(&self) -> &SeriesRegistry {
        &self.registry
    }

    /// Number of synchronous ticks performed before periodic updates.
    pub fn warm_up_count(&self) -> usize {
        self.registry.capacity() / 2
    }

    /// One cycle: generate a sample per metric, append them, then render
    /// every series.
    pub fn tick<S: RenderSink + ?Sized>(&mut self, sink: &mut S) -> Result<TickInfo> {
        let samples = self.generator.generate();
        let label = samples
            .values()
            .next()
            .map(|s| s.label.clone())
            .unwrap_or_default();

        self.registry.update_all(&samples)?;

        for (metric, series) in self.registry.iter() {
            sink.render(metric, series.snapshot());
        }

        let info = TickInfo {
            index: self.ticks,
            phase: self.phase,
            label,
        };
        self.ticks += 1;
        sink.finish_tick(&info);

        debug!(tick = info.index, label = %info.label, "tick rendered");
        Ok(info)
    }

    /// Pre-fill every series, then switch to `Periodic`.  No-op once periodic.
    pub fn warm_up<S: RenderSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        if self.phase == Phase::Periodic {
            return Ok(());
        }

        let count = self.warm_up_count();
        for _ in 0..count {
            self.tick(sink)?;
        }

        self.phase = Phase::Periodic;
        sink.phase_changed(Phase::Periodic);
        info!(
            "Warm-up complete ({count} ticks); updating every {} ms",
            self.interval.as_millis()
        );
        Ok(())
    }

    /// Warm up, then tick once per interval.  The first periodic tick fires
    /// one full interval after warm-up.
    ///
    /// Only returns early on error or when the sink is closed; otherwise
    /// cancel by dropping the future.
    pub async fn run<S: RenderSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        self.warm_up(sink)?;

        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if sink.is_closed() {
                info!("Render sink closed; stopping scheduler");
                return Ok(());
            }
            ticker.tick().await;
            self.tick(sink)?;
        }
    }
}
