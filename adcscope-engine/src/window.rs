use std::collections::VecDeque;

/// Fixed-capacity rolling window of the most recent samples.
///
/// Once full, each push evicts the oldest sample, so `len()` is always
/// `min(samples_seen, capacity)` and iteration order is arrival order.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: VecDeque<i32>,
    capacity: usize,
}

impl SampleWindow {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "SampleWindow capacity must be non-zero");
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: i32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn extend<I: IntoIterator<Item = i32>>(&mut self, samples: I) {
        for sample in samples {
            self.push(sample);
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Copy of the window, oldest sample first.
    pub fn snapshot(&self) -> Vec<i32> {
        self.samples.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_tracks_samples_seen_until_full() {
        let mut window = SampleWindow::new(4);
        assert!(window.is_empty());

        for (seen, sample) in (1..=6).enumerate() {
            window.push(sample);
            assert_eq!(window.len(), (seen + 1).min(4));
        }
        assert!(window.is_full());
        assert_eq!(window.capacity(), 4);
    }

    #[test]
    fn test_keeps_last_n_in_arrival_order() {
        let mut window = SampleWindow::new(512);
        window.extend(0..1000);

        let expected: Vec<i32> = (488..1000).collect();
        assert_eq!(window.snapshot(), expected);
    }

    #[test]
    #[should_panic]
    fn test_zero_capacity_rejected() {
        SampleWindow::new(0);
    }
}
