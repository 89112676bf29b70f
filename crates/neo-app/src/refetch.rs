//! When the dashboard asks the query client for data again

use neo_data::QuerySnapshot;

/// Why a (re)fetch of the active query is being considered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefetchTrigger {
    /// The form was submitted
    Submit { params_changed: bool },
    /// The window regained focus
    WindowFocused,
    /// The backend became reachable again
    Reconnected,
}

/// Decide whether `trigger` should start a request for the active key.
///
/// Resubmitting the same range only retries a failed or evicted query.
pub fn should_request(trigger: RefetchTrigger, snapshot: &QuerySnapshot) -> bool {
    match trigger {
        RefetchTrigger::Submit { params_changed: true } => true,
        RefetchTrigger::Submit { params_changed: false } => {
            snapshot.error.is_some() || (snapshot.data.is_none() && !snapshot.is_fetching)
        }
        RefetchTrigger::WindowFocused | RefetchTrigger::Reconnected => !snapshot.is_fetching,
    }
}

/// Detects the unfocused -> focused edge of the native window
#[derive(Debug)]
pub struct FocusTracker {
    focused: bool,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self { focused: true }
    }

    /// Feed the current focus state; true exactly when focus was regained
    pub fn regained(&mut self, focused: bool) -> bool {
        let regained = focused && !self.focused;
        self.focused = focused;
        regained
    }
}

/// Detects when the active query stops fetching
#[derive(Debug, Default)]
pub struct SettleTracker {
    was_fetching: bool,
}

impl SettleTracker {
    /// Feed the latest snapshot; true exactly once per settled request
    pub fn settled(&mut self, snapshot: Option<&QuerySnapshot>) -> bool {
        let fetching = snapshot.map_or(false, |s| s.is_fetching);
        let settled = self.was_fetching && !fetching && snapshot.is_some();
        self.was_fetching = fetching;
        settled
    }

    /// Forget the previous state after the active key changes
    pub fn reset(&mut self) {
        self.was_fetching = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_core::NeosResponse;
    use neo_data::FetchError;
    use std::sync::Arc;

    fn loaded() -> QuerySnapshot {
        QuerySnapshot {
            data: Some(Arc::new(NeosResponse {
                start_date: "2024-01-01".into(),
                end_date: "2024-01-08".into(),
                count: 0,
                items: Vec::new(),
            })),
            ..QuerySnapshot::default()
        }
    }

    fn failed() -> QuerySnapshot {
        QuerySnapshot {
            error: Some(FetchError::from_response(500, "")),
            ..QuerySnapshot::default()
        }
    }

    fn fetching() -> QuerySnapshot {
        QuerySnapshot {
            is_fetching: true,
            ..QuerySnapshot::default()
        }
    }

    #[test]
    fn test_new_params_always_fetch() {
        let trigger = RefetchTrigger::Submit { params_changed: true };
        assert!(should_request(trigger, &loaded()));
        assert!(should_request(trigger, &fetching()));
    }

    #[test]
    fn test_same_params_retry_only_after_error() {
        let trigger = RefetchTrigger::Submit { params_changed: false };
        assert!(!should_request(trigger, &loaded()));
        assert!(!should_request(trigger, &fetching()));
        assert!(should_request(trigger, &failed()));
        assert!(should_request(trigger, &QuerySnapshot::default()));
    }

    #[test]
    fn test_focus_and_reconnect_refresh_idle_queries() {
        for trigger in [RefetchTrigger::WindowFocused, RefetchTrigger::Reconnected] {
            assert!(should_request(trigger, &loaded()));
            assert!(should_request(trigger, &failed()));
            assert!(!should_request(trigger, &fetching()));
        }
    }

    #[test]
    fn test_focus_edge() {
        let mut tracker = FocusTracker::new();
        assert!(!tracker.regained(true));
        assert!(!tracker.regained(false));
        assert!(tracker.regained(true));
        assert!(!tracker.regained(true));
    }

    #[test]
    fn test_settle_edge() {
        let mut tracker = SettleTracker::default();
        assert!(!tracker.settled(None));
        assert!(!tracker.settled(Some(&fetching())));
        assert!(tracker.settled(Some(&loaded())));
        assert!(!tracker.settled(Some(&loaded())));
    }
}
