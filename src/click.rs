use crate::constants::{DOUBLE_CLICK_MAX, DOUBLE_CLICK_MIN};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ClickKind {
    Single,
    Double,
}

/// Turns click requests into single or double clicks.
///
/// A double click clears the register, so a third tap inside the same window
/// starts a new single click instead of stacking.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickRegister {
    last_click: Option<Duration>,
}

impl ClickRegister {
    pub fn register(&mut self, now: Duration) -> ClickKind {
        let is_double = self
            .last_click
            .and_then(|last| now.checked_sub(last))
            .map_or(false, |elapsed| {
                elapsed > DOUBLE_CLICK_MIN && elapsed < DOUBLE_CLICK_MAX
            });

        if is_double {
            self.last_click = None;
            ClickKind::Double
        } else {
            self.last_click = Some(now);
            ClickKind::Single
        }
    }

    pub fn reset(&mut self) {
        self.last_click = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{ClickKind::*, ClickRegister};
    use std::time::Duration;

    fn clicks(gaps_ms: &[u64]) -> Vec<super::ClickKind> {
        let mut register = ClickRegister::default();
        let mut now = Duration::from_secs(10);
        let mut kinds = vec![register.register(now)];
        for &gap in gaps_ms {
            now += Duration::from_millis(gap);
            kinds.push(register.register(now));
        }
        kinds
    }

    #[test]
    fn double_click_window() {
        assert_eq!(clicks(&[200]), vec![Single, Double]);
        assert_eq!(clicks(&[1000]), vec![Single, Single]);
        assert_eq!(clicks(&[10]), vec![Single, Single]);
    }

    #[test]
    fn window_bounds_are_exclusive() {
        assert_eq!(clicks(&[50]), vec![Single, Single]);
        assert_eq!(clicks(&[400]), vec![Single, Single]);
        assert_eq!(clicks(&[51]), vec![Single, Double]);
    }

    #[test]
    fn triple_tap_collapses_to_one_double() {
        assert_eq!(clicks(&[150, 150]), vec![Single, Double, Single]);
    }

    #[test]
    fn bounce_restarts_the_window() {
        // the 10ms bounce is recorded as the new reference click
        assert_eq!(clicks(&[10, 100]), vec![Single, Single, Double]);
    }

    #[test]
    fn first_click_is_single_even_at_time_zero() {
        let mut register = ClickRegister::default();
        assert_eq!(register.register(Duration::from_millis(0)), Single);
        assert_eq!(register.register(Duration::from_millis(100)), Double);
        register.reset();
        assert_eq!(register.register(Duration::from_millis(200)), Single);
    }
}
