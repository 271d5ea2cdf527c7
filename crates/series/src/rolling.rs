use std::collections::VecDeque;
use tele_core::SeriesView;

/// Fixed-capacity history of `(label, value)` pairs, oldest first.
///
/// Labels and values live in two deques that are always pushed and popped
/// together, so index `i` of one always pairs with index `i` of the other.
#[derive(Debug, Clone)]
pub struct RollingSeries {
    labels:   VecDeque<String>,
    values:   VecDeque<f64>,
    capacity: usize,
}

impl RollingSeries {
    /// A zero capacity is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            labels: VecDeque::with_capacity(capacity + 1),
            values: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Push a new sample, evicting the oldest once over capacity.
    pub fn append(&mut self, label: impl Into<String>, value: f64) {
        self.labels.push_back(label.into());
        self.values.push_back(value);

        if self.values.len() > self.capacity {
            self.labels.pop_front();
            self.values.pop_front();
        }
    }

    /// Current content, oldest first.
    pub fn snapshot(&self) -> SeriesView<'_> {
        SeriesView::new(&self.labels, &self.values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }
}
