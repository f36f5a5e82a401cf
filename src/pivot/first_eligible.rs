use super::EligibilityView;

/// Scans from where the previous pivot left off and returns the first
/// eligible arc found, wrapping around once (spec.md §4.6).
#[derive(Debug, Default)]
pub struct FirstEligible {
    cursor: u32,
}

impl FirstEligible {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    pub fn select(&mut self, view: &EligibilityView) -> Option<u32> {
        let m = view.arc_count;
        if m == 0 {
            return None;
        }
        for i in 0..m {
            let a = (self.cursor + i) % m;
            if view.is_eligible(a) {
                self.cursor = (a + 1) % m;
                return Some(a);
            }
        }
        None
    }
}
