use super::EligibilityView;
use crate::config::OptimizationConfig;

/// Maintains a short list of the most-eligible arcs, re-ranking it across
/// several "minor" iterations before rebuilding from a full scan — the
/// major/minor split of spec.md §4.6's Candidate-List variant. Rebuilds when
/// the list empties or goes stale (more than half its entries no longer
/// eligible).
#[derive(Debug)]
pub struct CandidateList {
    arc_count: u32,
    ratio: f64,
    list: Vec<u32>,
}

impl CandidateList {
    pub fn new(arc_count: u32, config: &OptimizationConfig) -> Self {
        Self {
            arc_count,
            ratio: config.candidate_list_ratio,
            list: Vec::new(),
        }
    }

    fn rebuild(&mut self, view: &EligibilityView) {
        let target_len = (((self.arc_count as f64) * self.ratio).ceil() as usize).max(1);
        let mut candidates: Vec<(u32, i64)> = (0..self.arc_count)
            .filter(|&a| view.is_eligible(a))
            .map(|a| (a, view.magnitude(a)))
            .collect();
        candidates.sort_unstable_by(|a, b| b.1.cmp(&a.1));
        candidates.truncate(target_len);
        self.list = candidates.into_iter().map(|(a, _)| a).collect();
    }

    fn is_stale(&self, view: &EligibilityView) -> bool {
        if self.list.is_empty() {
            return true;
        }
        let ineligible = self.list.iter().filter(|&&a| !view.is_eligible(a)).count();
        ineligible * 2 > self.list.len()
    }

    pub fn select(&mut self, view: &EligibilityView) -> Option<u32> {
        if self.arc_count == 0 {
            return None;
        }
        if self.is_stale(view) {
            self.rebuild(view);
        }
        let mut best_slot: Option<(usize, i64)> = None;
        for (i, &a) in self.list.iter().enumerate() {
            if view.is_eligible(a) {
                let magnitude = view.magnitude(a);
                let improves = match best_slot {
                    Some((_, best_mag)) => magnitude > best_mag,
                    None => true,
                };
                if improves {
                    best_slot = Some((i, magnitude));
                }
            }
        }
        match best_slot {
            Some((i, _)) => Some(self.list.remove(i)),
            None => {
                // the rebuild above still left nothing eligible anywhere.
                None
            }
        }
    }
}
