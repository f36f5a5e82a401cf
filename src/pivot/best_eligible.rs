use super::EligibilityView;

/// Full linear scan every call; returns the eligible arc maximizing
/// `|state[a] * r(a)|` (spec.md §4.6). Fewer pivots than First-Eligible on
/// most instances, at the cost of an O(m) scan per pivot.
#[derive(Debug, Default)]
pub struct BestEligible;

impl BestEligible {
    pub fn new() -> Self {
        Self
    }

    pub fn select(&mut self, view: &EligibilityView) -> Option<u32> {
        let mut best: Option<(u32, i64)> = None;
        for a in 0..view.arc_count {
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
        best.map(|(a, _)| a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::BasisStore;
    use crate::flow::FlowState;

    #[test]
    fn picks_the_most_negative_reduced_cost() {
        let mut flow = FlowState::new(3, 1);
        flow.set_arc(0, 0, 0, 0, 10, -1);
        flow.set_arc(1, 0, 0, 0, 10, -5);
        flow.set_arc(2, 0, 0, 0, 10, -2);
        let basis = BasisStore::new(0, 3);
        let view = EligibilityView { flow: &flow, basis: &basis, arc_count: 3 };

        assert_eq!(BestEligible::new().select(&view), Some(1));
    }
}
