use super::EligibilityView;
use crate::config::{OptimizationConfig, OptimizationFlags};

/// Lower bound on the adaptive block size, expressed as a fraction of
/// `sqrt(m)`, below which shrinking is refused regardless of hit rate
/// (spec.md §4.6: "floor of `MinBlockSizeRatio * sqrt(m)`"). Not part of the
/// decision table in §4.5, so it is fixed here rather than threaded through
/// [`OptimizationConfig`].
const MIN_BLOCK_SIZE_RATIO: f64 = 0.5;

/// Scans a contiguous block of arcs starting from the cursor; returns the
/// best-eligible arc in the first block that contains one, otherwise moves
/// to the next block until a full sweep is made (spec.md §4.6, the default
/// rule). When `AdaptiveBlockSize` is set, the block size grows after a run
/// of misses and shrinks after a run of hits.
#[derive(Debug)]
pub struct BlockSearch {
    arc_count: u32,
    cursor: u32,
    block_size: u32,
    min_block_size: u32,
    max_block_size: u32,
    adaptive: bool,
    growth_factor: f64,
    shrink_factor: f64,
    hits_before_adapt: u32,
    low_hit_rate: f64,
    high_hit_rate: f64,
    consecutive_hits: u32,
    consecutive_misses: u32,
    recent_hit_rate: f64,
}

impl BlockSearch {
    pub fn new(arc_count: u32, config: &OptimizationConfig) -> Self {
        let sqrt_m = (arc_count as f64).sqrt().ceil() as u32;
        let initial = sqrt_m.max(config.min_block_size);
        let block_size = initial.clamp(config.min_block_size, config.max_block_size.max(config.min_block_size));
        Self {
            arc_count,
            cursor: 0,
            block_size: block_size.max(1),
            min_block_size: config.min_block_size,
            max_block_size: config.max_block_size,
            adaptive: config.has(OptimizationFlags::ADAPTIVE_BLOCK_SIZE),
            growth_factor: config.block_size_growth_factor,
            shrink_factor: config.block_size_shrink_factor,
            hits_before_adapt: config.consecutive_hits_before_adapt,
            low_hit_rate: config.low_hit_rate_threshold,
            high_hit_rate: config.high_hit_rate_threshold,
            consecutive_hits: 0,
            consecutive_misses: 0,
            recent_hit_rate: 0.5,
        }
    }

    pub fn select(&mut self, view: &EligibilityView) -> Option<u32> {
        let m = view.arc_count;
        if m == 0 {
            return None;
        }
        let mut scanned = 0u32;
        while scanned < m {
            let block_len = self.block_size.min(m - scanned).max(1);
            let mut best: Option<(u32, i64)> = None;
            for i in 0..block_len {
                let a = (self.cursor + i) % m;
                if view.is_eligible(a) {
                    let magnitude = view.magnitude(a);
                    let improves = match best {
                        Some((_, best_mag)) => magnitude > best_mag,
                        None => true,
                    };
                    if improves {
                        best = Some((a, magnitude));
                    }
                }
            }
            scanned += block_len;
            self.cursor = (self.cursor + block_len) % m;
            self.record_hit(best.is_some());
            if let Some((a, _)) = best {
                return Some(a);
            }
        }
        None
    }

    fn record_hit(&mut self, hit: bool) {
        if !self.adaptive {
            return;
        }
        if hit {
            self.consecutive_hits += 1;
            self.consecutive_misses = 0;
        } else {
            self.consecutive_misses += 1;
            self.consecutive_hits = 0;
        }
        self.recent_hit_rate = 0.9 * self.recent_hit_rate + 0.1 * if hit { 1.0 } else { 0.0 };

        let floor = (MIN_BLOCK_SIZE_RATIO * (self.arc_count as f64).sqrt()).ceil() as u32;
        let lower_bound = self.min_block_size.max(floor).max(1);

        if self.consecutive_hits >= self.hits_before_adapt && self.recent_hit_rate > self.high_hit_rate {
            self.block_size = ((self.block_size as f64) * self.shrink_factor).round() as u32;
            self.consecutive_hits = 0;
        } else if self.consecutive_misses >= self.hits_before_adapt && self.recent_hit_rate < self.low_hit_rate {
            self.block_size = ((self.block_size as f64) * self.growth_factor).round() as u32;
            self.consecutive_misses = 0;
        }
        self.block_size = self.block_size.clamp(lower_bound, self.max_block_size.max(lower_bound));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::BasisStore;
    use crate::flow::FlowState;

    #[test]
    fn finds_eligible_arc_beyond_first_block() {
        let mut flow = FlowState::new(10, 1);
        for a in 0..10 {
            flow.set_arc(a, 0, 0, 0, 10, 1); // all ineligible at LOWER (r > 0)
        }
        flow.set_arc(9, 0, 0, 0, 10, -1); // arc 9 is eligible
        let basis = BasisStore::new(0, 10);
        let view = EligibilityView { flow: &flow, basis: &basis, arc_count: 10 };

        let mut config = OptimizationConfig::default();
        config.min_block_size = 2;
        config.max_block_size = 4;
        let mut rule = BlockSearch::new(10, &config);
        assert_eq!(rule.select(&view), Some(9));
    }

    #[test]
    fn no_eligible_arc_returns_none_after_full_sweep() {
        let mut flow = FlowState::new(4, 1);
        for a in 0..4 {
            flow.set_arc(a, 0, 0, 0, 10, 1);
        }
        let basis = BasisStore::new(0, 4);
        let view = EligibilityView { flow: &flow, basis: &basis, arc_count: 4 };
        let config = OptimizationConfig::default();
        let mut rule = BlockSearch::new(4, &config);
        assert_eq!(rule.select(&view), None);
    }
}
