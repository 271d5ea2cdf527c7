use crate::{
    event::{Phase, TickInfo},
    state::{Metric, SeriesView},
};

/// Consumer of series content, called by the scheduler after every mutation.
///
/// `render` runs synchronously on the scheduler's task, once per metric per
/// tick. Sinks that hand data to another task should copy it out with
/// [`SeriesView::to_snapshot`].
pub trait RenderSink {
    fn render(&mut self, metric: &Metric, series: SeriesView<'_>);

    /// Called once after every metric of a tick has been rendered.
    fn finish_tick(&mut self, _tick: &TickInfo) {}

    /// Called when the scheduler changes phase (once, after warm-up).
    fn phase_changed(&mut self, _phase: Phase) {}

    /// A closed sink ends the periodic loop (e.g. its receiver was dropped).
    fn is_closed(&self) -> bool {
        false
    }
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn render(&mut self, metric: &Metric, series: SeriesView<'_>) {
        (**self).render(metric, series);
    }

    fn finish_tick(&mut self, tick: &TickInfo) {
        (**self).finish_tick(tick);
    }

    fn phase_changed(&mut self, phase: Phase) {
        (**self).phase_changed(phase);
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}
