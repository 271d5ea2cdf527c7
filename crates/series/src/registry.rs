use crate::rolling::RollingSeries;
use std::collections::BTreeMap;
use tele_core::{Metric, MetricId, Result, SampleSet, TeleError};

/// Owns one [`RollingSeries`] per registered metric.
///
/// Series are created once, here, and only ever mutated through
/// [`SeriesRegistry::update_all`].
#[derive(Debug, Clone)]
pub struct SeriesRegistry {
    metrics:  Vec<Metric>,
    series:   BTreeMap<MetricId, RollingSeries>,
    capacity: usize,
}

impl SeriesRegistry {
    pub fn new(metrics: &[Metric], capacity: usize) -> Self {
        let series = metrics
            .iter()
            .map(|m| (m.id, RollingSeries::new(capacity)))
            .collect();

        Self {
            metrics: metrics.to_vec(),
            series,
            capacity: capacity.max(1),
        }
    }

    /// Append one tick's sample to every registered series.
    ///
    /// The sample set must cover exactly the registered metrics. A sample
    /// without a series, or a series without a sample, is a wiring defect:
    /// nothing is appended and a `Config` error is returned.
    pub fn update_all(&mut self, samples: &SampleSet) -> Result<()> {
        if let Some(id) = samples.keys().find(|id| !self.series.contains_key(id)) {
            return Err(TeleError::Config(format!(
                "no series registered for metric '{id}'"
            )));
        }
        if let Some(metric) = self.metrics.iter().find(|m| !samples.contains_key(&m.id)) {
            return Err(TeleError::Config(format!(
                "no sample generated for metric '{}'",
                metric.id
            )));
        }

        for metric in &self.metrics {
            if let (Some(series), Some(sample)) =
                (self.series.get_mut(&metric.id), samples.get(&metric.id))
            {
                series.append(sample.label.as_str(), sample.value);
            }
        }
        Ok(())
    }

    pub fn get(&self, id: MetricId) -> Option<&RollingSeries> {
        self.series.get(&id)
    }

    /// Registered metrics, in registration order.
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// `(metric, series)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Metric, &RollingSeries)> {
        self.metrics
            .iter()
            .filter_map(|m| self.series.get(&m.id).map(|s| (m, s)))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tele_core::Sample;

    fn samples(label: &str, ids: &[MetricId], value: f64) -> SampleSet {
        ids.iter().map(|id| (*id, Sample::new(label, value))).collect()
    }

    #[test]
    fn update_all_appends_to_every_series() {
        let mut reg = SeriesRegistry::new(&Metric::defaults(), 4);
        reg.update_all(&samples("12:00:00", &MetricId::ALL, 1.0)).unwrap();
        reg.update_all(&samples("12:00:02", &MetricId::ALL, 2.0)).unwrap();

        for (metric, series) in reg.iter() {
            assert_eq!(series.len(), 2, "{}", metric.id);
            assert_eq!(series.snapshot().latest(), Some(("12:00:02", 2.0)));
        }
    }

    #[test]
    fn iterates_in_registration_order() {
        let reg = SeriesRegistry::new(&Metric::defaults(), 4);
        let ids: Vec<MetricId> = reg.iter().map(|(m, _)| m.id).collect();
        assert_eq!(ids, MetricId::ALL.to_vec());
    }

    #[test]
    fn unregistered_metric_is_rejected_without_partial_update() {
        let mut reg = SeriesRegistry::new(&[Metric::default_for(MetricId::Speed)], 4);
        let err = reg
            .update_all(&samples("t", &[MetricId::Speed, MetricId::Fuel], 1.0))
            .unwrap_err();

        assert!(matches!(err, TeleError::Config(_)));
        assert!(err.to_string().contains("fuel"));
        assert!(reg.get(MetricId::Speed).unwrap().is_empty());
    }

    #[test]
    fn incomplete_sample_set_is_rejected_without_partial_update() {
        let mut reg = SeriesRegistry::new(&Metric::defaults(), 4);
        let err = reg
            .update_all(&samples("t", &[MetricId::Rpm], 3000.0))
            .unwrap_err();

        assert!(matches!(err, TeleError::Config(_)));
        assert!(err.to_string().contains("speed"));
        for id in MetricId::ALL {
            assert!(reg.get(id).unwrap().is_empty(), "{id}");
        }
    }
}
