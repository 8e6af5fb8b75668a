//! Desired-worker-count computation and hysteresis-driven reconciliation.

/// `needed = ceil(q / chunk_size)`, special-cased for small non-empty
/// queues, then clamped to `[min_workers, max_workers]`.
pub fn desired_workers(queue_depth: u64, chunk_size: usize, min_workers: u32, max_workers: u32) -> u32 {
    let chunk_size = chunk_size.max(1) as u64;

    let needed = if queue_depth == 0 {
        0
    } else if queue_depth < chunk_size {
        queue_depth.min(u64::from(max_workers))
    } else {
        queue_depth.div_ceil(chunk_size)
    };

    (needed as u32).clamp(min_workers, max_workers)
}

/// Tracks the scale-down hysteresis: consecutive cycles where `needed < w`.
#[derive(Debug, Default)]
pub struct IdleStreak {
    count: u32,
}

pub enum Reconciliation {
    ScaleUp(u32),
    ScaleDown(u32),
    Hold,
}

impl IdleStreak {
    pub fn reconcile(&mut self, needed: u32, current: u32, threshold: u32) -> Reconciliation {
        use std::cmp::Ordering;

        match needed.cmp(&current) {
            Ordering::Greater => {
                self.count = 0;
                Reconciliation::ScaleUp(needed)
            }
            Ordering::Less => {
                self.count += 1;
                if self.count >= threshold {
                    self.count = 0;
                    Reconciliation::ScaleDown(needed)
                } else {
                    Reconciliation::Hold
                }
            }
            Ordering::Equal => {
                self.count = 0;
                Reconciliation::Hold
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desired_workers_empty_queue() {
        assert_eq!(desired_workers(0, 1000, 1, 10), 1);
    }

    #[test]
    fn test_desired_workers_small_queue_scales_to_depth() {
        assert_eq!(desired_workers(3, 1000, 1, 10), 3);
    }

    #[test]
    fn test_desired_workers_large_queue_divides_by_chunk_size() {
        assert_eq!(desired_workers(4500, 1000, 1, 10), 5);
    }

    #[test]
    fn test_desired_workers_clamped_to_max() {
        assert_eq!(desired_workers(50_000, 1000, 1, 10), 10);
    }

    #[test]
    fn test_scale_up_resets_streak_immediately() {
        let mut streak = IdleStreak::default();
        assert!(matches!(streak.reconcile(5, 2, 3), Reconciliation::ScaleUp(5)));
    }

    #[test]
    fn test_scale_down_waits_for_threshold() {
        let mut streak = IdleStreak::default();
        assert!(matches!(streak.reconcile(1, 5, 3), Reconciliation::Hold));
        assert!(matches!(streak.reconcile(1, 5, 3), Reconciliation::Hold));
        assert!(matches!(
            streak.reconcile(1, 5, 3),
            Reconciliation::ScaleDown(1)
        ));
    }

    #[test]
    fn test_equal_resets_streak() {
        let mut streak = IdleStreak::default();
        assert!(matches!(streak.reconcile(1, 5, 3), Reconciliation::Hold));
        assert!(matches!(streak.reconcile(5, 5, 3), Reconciliation::Hold));
        assert!(matches!(streak.reconcile(1, 5, 3), Reconciliation::Hold));
        assert!(matches!(streak.reconcile(1, 5, 3), Reconciliation::Hold));
        assert!(matches!(
            streak.reconcile(1, 5, 3),
            Reconciliation::ScaleDown(1)
        ));
    }
}
