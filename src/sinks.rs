//! Headless render sinks: log lines with a sparkline, or JSON lines.

use serde::Serialize;
use std::io::Write;
use tele_core::{Metric, Phase, RenderSink, SeriesView, TickInfo};
use tracing::{error, info};

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Logs every series as one `info!` line: newest value plus a sparkline
/// scaled to the metric's range.
#[derive(Debug, Default)]
pub struct LogSink;

impl RenderSink for LogSink {
    fn render(&mut self, metric: &Metric, series: SeriesView<'_>) {
        let Some((label, value)) = series.latest() else {
            return;
        };

        info!(
            metric = %metric.id,
            points = series.len(),
            "{:<12} {:>8.1} {:<5} [{label}] {}",
            metric.label,
            value,
            metric.unit,
            sparkline(series.values(), metric.min, metric.max),
        );
    }

    fn phase_changed(&mut self, phase: Phase) {
        if phase == Phase::Periodic {
            info!("Warm-up done; switching to periodic updates");
        }
    }
}

/// Map each value onto one of eight block characters; `min` → `▁`, `max` → `█`.
pub fn sparkline(values: impl Iterator<Item = f64>, min: f64, max: f64) -> String {
    let span = max - min;
    values
        .map(|v| {
            let frac = if span > 0.0 { ((v - min) / span).clamp(0.0, 1.0) } else { 0.0 };
            let idx = (frac * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
            SPARK_LEVELS[idx]
        })
        .collect()
}

/// One rendered series, as written by [`JsonSink`].
#[derive(Debug, Serialize)]
struct JsonRecord<'a> {
    tick:   u64,
    metric: &'a str,
    label:  &'a str,
    labels: Vec<&'a str>,
    values: Vec<f64>,
}

/// Writes one JSON object per metric per tick to `out`, newline-delimited.
///
/// The first write error closes the sink; it can be taken back with
/// [`JsonSink::take_error`].
pub struct JsonSink<W: Write> {
    out:   W,
    tick:  u64,
    error: Option<std::io::Error>,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            tick: 0,
            error: None,
        }
    }

    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.error.take()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn write_record(&mut self, record: &JsonRecord<'_>) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        self.out.write_all(b"\n")
    }
}

impl<W: Write> RenderSink for JsonSink<W> {
    fn render(&mut self, metric: &Metric, series: SeriesView<'_>) {
        if self.error.is_some() {
            return;
        }

        let record = JsonRecord {
            tick:   self.tick,
            metric: metric.id.as_str(),
            label:  &metric.label,
            labels: series.labels().collect(),
            values: series.values().collect(),
        };

        if let Err(e) = self.write_record(&record) {
            error!("Cannot write JSON output: {e}");
            self.error = Some(e);
        }
    }

    fn finish_tick(&mut self, tick: &TickInfo) {
        self.tick = tick.index + 1;
        if self.error.is_none() {
            if let Err(e) = self.out.flush() {
                error!("Cannot flush JSON output: {e}");
                self.error = Some(e);
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use tele_core::MetricId;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn series() -> (VecDeque<String>, VecDeque<f64>) {
        (
            ["12:00:00", "12:00:02"].iter().map(|s| s.to_string()).collect(),
            [30.0, 90.0].into_iter().collect(),
        )
    }

    #[test]
    fn sparkline_spans_the_range() {
        let line = sparkline([0.0, 60.0, 120.0, 500.0].into_iter(), 0.0, 120.0);
        assert_eq!(line, "▁▅██");
    }

    #[test]
    fn sparkline_of_degenerate_range_is_flat() {
        assert_eq!(sparkline([3.0, 4.0].into_iter(), 5.0, 5.0), "▁▁");
    }

    #[test]
    fn json_sink_writes_one_line_per_render() {
        let (labels, values) = series();
        let metric = Metric::default_for(MetricId::Speed);
        let mut sink = JsonSink::new(Vec::new());

        sink.render(&metric, SeriesView::new(&labels, &values));
        sink.finish_tick(&TickInfo { index: 0, phase: Phase::WarmUp, label: "12:00:02".into() });
        sink.render(&metric, SeriesView::new(&labels, &values));

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["metric"], "speed");
        assert_eq!(first["label"], "Speed");
        assert_eq!(first["tick"], 0);
        assert_eq!(first["labels"], serde_json::json!(["12:00:00", "12:00:02"]));
        assert_eq!(first["values"], serde_json::json!([30.0, 90.0]));

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["tick"], 1);
    }

    #[test]
    fn write_failure_closes_json_sink() {
        let (labels, values) = series();
        let mut sink = JsonSink::new(BrokenPipe);
        sink.render(&Metric::default_for(MetricId::Rpm), SeriesView::new(&labels, &values));

        assert!(sink.is_closed());
        assert_eq!(
            sink.take_error().map(|e| e.kind()),
            Some(std::io::ErrorKind::BrokenPipe)
        );
    }
}
