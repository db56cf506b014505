/// Rate limiter for pointer samples, leading and trailing edge.
///
/// The first sample after a quiet period goes through at once. Samples
/// arriving inside the interval overwrite a single pending slot, which is
/// released by the next `offer` or `poll` once the interval has elapsed.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval_ms: u64,
    last_emit_ms: Option<u64>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(interval_ms: u64) -> Self {
        Self { interval_ms, last_emit_ms: None, pending: None }
    }

    fn ready(&self, now_ms: u64) -> bool {
        self.last_emit_ms.map_or(true, |last| now_ms.saturating_sub(last) >= self.interval_ms)
    }

    /// Submit a sample; returns the sample to act on now, if any.
    pub fn offer(&mut self, sample: T, now_ms: u64) -> Option<T> {
        if self.ready(now_ms) {
            self.pending = None;
            self.last_emit_ms = Some(now_ms);
            Some(sample)
        } else {
            self.pending = Some(sample);
            None
        }
    }

    /// Release the pending sample once the interval has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        if self.pending.is_some() && self.ready(now_ms) {
            self.last_emit_ms = Some(now_ms);
            return self.pending.take();
        }
        None
    }

    /// Drop the pending sample without emitting it.
    pub fn discard(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Forget timing and pending state.
    pub fn reset(&mut self) {
        self.last_emit_ms = None;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_edge_passes() {
        let mut throttle = Throttle::new(16);
        assert_eq!(throttle.offer(1, 100), Some(1));
    }

    #[test]
    fn test_inside_interval_keeps_latest() {
        let mut throttle = Throttle::new(16);
        assert_eq!(throttle.offer(1, 100), Some(1));
        assert_eq!(throttle.offer(2, 105), None);
        assert_eq!(throttle.offer(3, 110), None);
        assert!(throttle.has_pending());
        assert_eq!(throttle.poll(115), None);
        assert_eq!(throttle.poll(116), Some(3));
        assert_eq!(throttle.poll(200), None);
    }

    #[test]
    fn test_offer_after_interval_supersedes_pending() {
        let mut throttle = Throttle::new(16);
        throttle.offer(1, 0);
        throttle.offer(2, 5);
        assert_eq!(throttle.offer(3, 20), Some(3));
        assert!(!throttle.has_pending());
    }

    #[test]
    fn test_discard_and_reset() {
        let mut throttle = Throttle::new(16);
        throttle.offer(1, 0);
        throttle.offer(2, 1);
        throttle.discard();
        assert_eq!(throttle.poll(100), None);

        throttle.reset();
        assert_eq!(throttle.offer(9, 1), Some(9));
    }
}
