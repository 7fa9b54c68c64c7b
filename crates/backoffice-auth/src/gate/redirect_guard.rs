//! Per-path navigation guard.

use std::collections::HashMap;

/// Records which paths already triggered a navigation.
///
/// Each path may navigate away at most once until the guard is reset, which
/// the gate does on every path change.
#[derive(Debug, Clone, Default)]
pub struct RedirectGuard {
    attempted: HashMap<String, bool>,
}

impl RedirectGuard {
    /// Creates an empty guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the single navigation attempt for `path`.
    ///
    /// Returns `true` the first time, `false` afterwards.
    pub fn try_acquire(&mut self, path: &str) -> bool {
        let attempted = self.attempted.entry(path.to_string()).or_insert(false);
        if *attempted {
            false
        } else {
            *attempted = true;
            true
        }
    }

    /// Whether `path` already navigated.
    pub fn has_attempted(&self, path: &str) -> bool {
        self.attempted.get(path).copied().unwrap_or(false)
    }

    /// Forgets every attempt.
    pub fn reset(&mut self) {
        self.attempted.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_attempt_per_path() {
        let mut guard = RedirectGuard::new();
        assert!(guard.try_acquire("/roles"));
        assert!(!guard.try_acquire("/roles"));
        assert!(guard.has_attempted("/roles"));
        assert!(guard.try_acquire("/users"));
    }

    #[test]
    fn test_reset_clears_attempts() {
        let mut guard = RedirectGuard::new();
        guard.try_acquire("/roles");
        guard.reset();
        assert!(!guard.has_attempted("/roles"));
        assert!(guard.try_acquire("/roles"));
    }
}
