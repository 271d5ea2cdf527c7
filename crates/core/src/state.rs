use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

/// The fixed set of telemetry quantities shown on the dashboard.
///
/// Declaration order is the display order (and the iteration order of a
/// [`SampleSet`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricId {
    Speed,
    Rpm,
    Temperature,
    Fuel,
}

impl MetricId {
    pub const ALL: [MetricId; 4] = [
        MetricId::Speed,
        MetricId::Rpm,
        MetricId::Temperature,
        MetricId::Fuel,
    ];

    /// Stable lowercase identifier, e.g. `"rpm"`.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricId::Speed       => "speed",
            MetricId::Rpm         => "rpm",
            MetricId::Temperature => "temperature",
            MetricId::Fuel        => "fuel",
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metric definition: identifier, display metadata and valid range `[min, max)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub id:    MetricId,
    /// Chart title, e.g. `"Fuel Level"`.
    pub label: String,
    pub unit:  String,
    pub min:   f64,
    pub max:   f64,
}

impl Metric {
    pub fn new(
        id: MetricId,
        label: impl Into<String>,
        unit: impl Into<String>,
        min: f64,
        max: f64,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            unit: unit.into(),
            min,
            max,
        }
    }

    /// Built-in definition for `id`.
    pub fn default_for(id: MetricId) -> Self {
        match id {
            MetricId::Speed       => Self::new(id, "Speed", "km/h", 0.0, 120.0),
            MetricId::Rpm         => Self::new(id, "RPM", "rpm", 500.0, 6000.0),
            MetricId::Temperature => Self::new(id, "Temperature", "°C", 70.0, 110.0),
            MetricId::Fuel        => Self::new(id, "Fuel Level", "%", 10.0, 95.0),
        }
    }

    /// Built-in definitions for every metric, in display order.
    pub fn defaults() -> Vec<Self> {
        MetricId::ALL.into_iter().map(Self::default_for).collect()
    }

    /// `true` if `value` lies in the half-open range `[min, max)`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }

    /// `true` if values can be drawn uniformly from `[min, max)`: both bounds
    /// finite, `min < max`, and the width `max - min` itself finite.
    #[must_use]
    pub fn has_drawable_range(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min < self.max
            && (self.max - self.min).is_finite()
    }
}

/// One reading produced at a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub label: String,
    pub value: f64,
}

impl Sample {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// All samples of one tick, keyed by metric.
pub type SampleSet = BTreeMap<MetricId, Sample>;

/// Read-only view over a rolling series: labels and values, oldest first.
///
/// Both sequences always have the same length.
#[derive(Debug, Clone, Copy)]
pub struct SeriesView<'a> {
    labels: &'a VecDeque<String>,
    values: &'a VecDeque<f64>,
}

impl<'a> SeriesView<'a> {
    pub fn new(labels: &'a VecDeque<String>, values: &'a VecDeque<f64>) -> Self {
        debug_assert_eq!(labels.len(), values.len());
        Self { labels, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn labels(&self) -> impl ExactSizeIterator<Item = &'a str> + Clone + 'a {
        self.labels.iter().map(|l| l.as_str())
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = f64> + Clone + 'a {
        self.values.iter().copied()
    }

    /// Newest `(label, value)` pair, if any.
    pub fn latest(&self) -> Option<(&'a str, f64)> {
        Some((self.labels.back()?.as_str(), *self.values.back()?))
    }

    /// Owned copy, for handing to another task.
    pub fn to_snapshot(&self) -> SeriesSnapshot {
        SeriesSnapshot {
            labels: self.labels.iter().cloned().collect(),
            values: self.values.iter().copied().collect(),
        }
    }
}

/// Owned copy of a series' content at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesSnapshot {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl SeriesSnapshot {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn latest(&self) -> Option<(&str, f64)> {
        Some((self.labels.last()?.as_str(), *self.values.last()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_ids_serialize_lowercase() {
        let json = serde_json::to_string(&MetricId::Temperature).unwrap();
        assert_eq!(json, "\"temperature\"");
        let back: MetricId = serde_json::from_str("\"rpm\"").unwrap();
        assert_eq!(back, MetricId::Rpm);
    }

    #[test]
    fn default_ranges_match_dashboard() {
        let fuel = Metric::default_for(MetricId::Fuel);
        assert_eq!((fuel.min, fuel.max), (10.0, 95.0));
        assert_eq!(fuel.label, "Fuel Level");
        assert_eq!(Metric::defaults().len(), MetricId::ALL.len());
    }

    #[test]
    fn contains_is_half_open() {
        let speed = Metric::default_for(MetricId::Speed);
        assert!(speed.contains(0.0));
        assert!(speed.contains(119.99));
        assert!(!speed.contains(120.0));
        assert!(!speed.contains(-0.1));
    }

    #[test]
    fn drawable_range_needs_a_finite_width() {
        assert!(Metric::default_for(MetricId::Rpm).has_drawable_range());
        assert!(!Metric::new(MetricId::Fuel, "Fuel", "%", 5.0, 5.0).has_drawable_range());
        assert!(!Metric::new(MetricId::Fuel, "Fuel", "%", 0.0, f64::INFINITY).has_drawable_range());
        assert!(!Metric::new(MetricId::Speed, "Speed", "km/h", -1e308, 1e308).has_drawable_range());
    }

    #[test]
    fn view_exposes_ordered_pairs() {
        let labels: VecDeque<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        let values: VecDeque<f64> = [1.0, 2.0].into_iter().collect();
        let view = SeriesView::new(&labels, &values);

        assert_eq!(view.len(), 2);
        assert_eq!(view.latest(), Some(("b", 2.0)));
        assert_eq!(view.labels().collect::<Vec<_>>(), vec!["a", "b"]);

        let snap = view.to_snapshot();
        assert_eq!(snap.values, vec![1.0, 2.0]);
        assert_eq!(snap.latest(), Some(("b", 2.0)));
    }
}
