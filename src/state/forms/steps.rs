//! Step position and navigation control rules

/// One-based index of the visible step
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StepIndex(usize);

impl StepIndex {
    pub const FIRST: StepIndex = StepIndex(1);

    /// Create an index, `None` when outside `1..=total`
    #[cfg(test)]
    pub fn new(value: usize, total: usize) -> Option<Self> {
        (1..=total).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Zero-based position for slice access
    pub fn position(self) -> usize {
        self.0 - 1
    }
}

/// Status of a step indicator relative to the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Active,
    Pending,
}

/// Visibility and enabled state of the navigation controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavControls {
    pub prev_visible: bool,
    pub next_visible: bool,
    pub next_enabled: bool,
    pub submit_visible: bool,
    pub submit_busy: bool,
}

/// State machine over steps `1..=total`, moving by one step at a time
#[derive(Debug, Clone)]
pub struct StepNavigator {
    current: StepIndex,
    total: usize,
}

impl StepNavigator {
    /// A navigator always has at least one step
    pub fn new(total: usize) -> Self {
        Self {
            current: StepIndex::FIRST,
            total: total.max(1),
        }
    }

    pub fn current(&self) -> StepIndex {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.current == StepIndex::FIRST
    }

    pub fn is_last(&self) -> bool {
        self.current.get() == self.total
    }

    /// Move forward when the current step validated and is not the last one.
    /// Returns whether the step changed.
    pub fn advance(&mut self, step_valid: bool) -> bool {
        if !step_valid || self.is_last() {
            return false;
        }
        self.current = StepIndex(self.current.get() + 1);
        true
    }

    /// Move back one step; no-op on the first step
    pub fn retreat(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current = StepIndex(self.current.get() - 1);
        true
    }

    /// Status of the one-based `step`
    pub fn status_of(&self, step: usize) -> StepStatus {
        let current = self.current.get();
        if step < current {
            StepStatus::Completed
        } else if step == current {
            StepStatus::Active
        } else {
            StepStatus::Pending
        }
    }

    /// Indicator status for every step in order
    pub fn indicators(&self) -> Vec<StepStatus> {
        (1..=self.total).map(|step| self.status_of(step)).collect()
    }

    /// Navigation controls for the current step
    pub fn controls(&self, step_valid: bool, busy: bool) -> NavControls {
        let last = self.is_last();
        NavControls {
            prev_visible: !self.is_first(),
            next_visible: !last,
            next_enabled: !last && step_valid,
            submit_visible: last,
            submit_busy: busy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_step_index_bounds() {
        assert!(StepIndex::new(0, 5).is_none());
        assert!(StepIndex::new(6, 5).is_none());
        let index = StepIndex::new(5, 5).unwrap();
        assert_eq!(index.get(), 5);
        assert_eq!(index.position(), 4);
    }

    #[test]
    fn test_initial_state() {
        let nav = StepNavigator::new(5);
        assert_eq!(nav.current(), StepIndex::FIRST);
        assert!(nav.is_first());
        assert!(!nav.is_last());
    }

    #[test]
    fn test_advance_blocked_when_invalid() {
        let mut nav = StepNavigator::new(5);
        assert!(!nav.advance(false));
        assert_eq!(nav.current().get(), 1);
    }

    #[test]
    fn test_advance_stops_at_last_step() {
        let mut nav = StepNavigator::new(2);
        assert!(nav.advance(true));
        assert!(!nav.advance(true));
        assert_eq!(nav.current().get(), 2);
    }

    #[test]
    fn test_retreat_at_first_is_noop() {
        let mut nav = StepNavigator::new(5);
        assert!(!nav.retreat());
        assert_eq!(nav.current().get(), 1);
    }

    #[test]
    fn test_retreat_moves_back_one() {
        let mut nav = StepNavigator::new(5);
        nav.advance(true);
        nav.advance(true);
        assert!(nav.retreat());
        assert_eq!(nav.current().get(), 2);
    }

    #[test]
    fn test_indicators() {
        let mut nav = StepNavigator::new(4);
        nav.advance(true);
        nav.advance(true);
        assert_eq!(
            nav.indicators(),
            vec![
                StepStatus::Completed,
                StepStatus::Completed,
                StepStatus::Active,
                StepStatus::Pending,
            ]
        );
    }

    #[test]
    fn test_controls_on_first_step() {
        let nav = StepNavigator::new(5);
        let controls = nav.controls(false, false);
        assert!(!controls.prev_visible);
        assert!(controls.next_visible);
        assert!(!controls.next_enabled);
        assert!(!controls.submit_visible);
    }

    #[test]
    fn test_controls_on_last_step() {
        let mut nav = StepNavigator::new(2);
        nav.advance(true);
        let controls = nav.controls(true, true);
        assert!(controls.prev_visible);
        assert!(!controls.next_visible);
        assert!(!controls.next_enabled);
        assert!(controls.submit_visible);
        assert!(controls.submit_busy);
    }

    #[test]
    fn test_zero_steps_clamps_to_one() {
        let nav = StepNavigator::new(0);
        assert_eq!(nav.total(), 1);
        assert!(nav.is_last());
    }
}
