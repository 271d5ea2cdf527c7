use chrono::{DateTime, Local};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tele_core::{Metric, Sample, SampleSet};

/// Default `strftime` format for tick labels.
pub const DEFAULT_LABEL_FORMAT: &str = "%H:%M:%S";

/// Produces one synthetic reading per metric per call.
///
/// Values are drawn uniformly from each metric's `[min, max)` range; every
/// sample of a call shares one wall-clock label so the charts stay aligned.
pub struct SampleGenerator<R = StdRng> {
    metrics:      Vec<Metric>,
    rng:          R,
    label_format: String,
    clock:        fn() -> DateTime<Local>,
}

impl SampleGenerator<StdRng> {
    /// Seeded from `seed` when given, otherwise from OS entropy.
    pub fn from_seed(metrics: Vec<Metric>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        Self::new(metrics, rng)
    }
}

impl<R: Rng> SampleGenerator<R> {
    pub fn new(metrics: Vec<Metric>, rng: R) -> Self {
        Self {
            metrics,
            rng,
            label_format: DEFAULT_LABEL_FORMAT.to_string(),
            clock: Local::now,
        }
    }

    #[must_use]
    pub fn with_label_format(mut self, format: impl Into<String>) -> Self {
        self.label_format = format.into();
        self
    }

    /// Replace the wall clock used for labels.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Draw one sample for every metric.
    pub fn generate(&mut self) -> SampleSet {
        let label = (self.clock)().format(&self.label_format).to_string();

        self.metrics
            .iter()
            .map(|metric| {
                let value = draw(&mut self.rng, metric);
                (metric.id, Sample::new(label.as_str(), value))
            })
            .collect()
    }
}

// Ranges are validated at config load; an undrawable one pins to `min`.
fn draw<R: Rng>(rng: &mut R, metric: &Metric) -> f64 {
    if metric.has_drawable_range() {
        rng.gen_range(metric.min..metric.max)
    } else {
        metric.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tele_core::MetricId;

    fn fixed_clock() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 1, 13, 5, 9).unwrap()
    }

    fn generator(seed: u64) -> SampleGenerator {
        SampleGenerator::from_seed(Metric::defaults(), Some(seed)).with_clock(fixed_clock)
    }

    #[test]
    fn values_stay_within_ranges() {
        let mut gen = generator(7);
        for _ in 0..1_000 {
            for (id, sample) in gen.generate() {
                let metric = Metric::default_for(id);
                assert!(
                    metric.contains(sample.value),
                    "{id}: {} outside [{}, {})",
                    sample.value,
                    metric.min,
                    metric.max
                );
            }
        }
    }

    #[test]
    fn one_call_shares_one_label() {
        let mut gen = generator(1);
        let set = gen.generate();
        assert_eq!(set.len(), MetricId::ALL.len());
        assert!(set.values().all(|s| s.label == "13:05:09"));
    }

    #[test]
    fn label_format_is_configurable() {
        let mut gen = generator(1).with_label_format("%H:%M");
        let set = gen.generate();
        assert_eq!(set[&MetricId::Speed].label, "13:05");
    }

    #[test]
    fn same_seed_same_values() {
        let a: Vec<f64> = generator(42).generate().values().map(|s| s.value).collect();
        let b: Vec<f64> = generator(42).generate().values().map(|s| s.value).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_range_pins_to_min() {
        let metric = Metric::new(MetricId::Fuel, "Fuel", "%", 5.0, 5.0);
        let mut gen = SampleGenerator::from_seed(vec![metric], Some(3));
        assert_eq!(gen.generate()[&MetricId::Fuel].value, 5.0);
    }

    #[test]
    fn overflowing_range_pins_to_min_without_panicking() {
        let metric = Metric::new(MetricId::Speed, "Speed", "km/h", -1e308, 1e308);
        let mut gen = SampleGenerator::from_seed(vec![metric], Some(3));
        assert_eq!(gen.generate()[&MetricId::Speed].value, -1e308);
    }
}
