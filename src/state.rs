use crate::estimation::CrowdEstimator;
use time::{OffsetDateTime, UtcOffset};

/// Immutable state shared by every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    estimator: CrowdEstimator,
    utc_offset: UtcOffset,
}

impl AppState {
    pub fn new(estimator: CrowdEstimator, utc_offset: UtcOffset) -> Self {
        Self {
            estimator,
            utc_offset,
        }
    }

    pub fn estimator(&self) -> &CrowdEstimator {
        &self.estimator
    }

    pub fn utc_offset(&self) -> UtcOffset {
        self.utc_offset
    }

    /// Current wall-clock time in the configured local offset.
    pub fn now(&self) -> OffsetDateTime {
        self.localize(OffsetDateTime::now_utc())
    }

    pub fn localize(&self, at: OffsetDateTime) -> OffsetDateTime {
        at.to_offset(self.utc_offset)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CrowdEstimator::with_defaults(), UtcOffset::UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{datetime, offset};

    #[test]
    fn localize_moves_into_configured_offset() {
        let state = AppState::new(CrowdEstimator::with_defaults(), offset!(+05:30));

        let local = state.localize(datetime!(2026-12-05 20:00 UTC));

        assert_eq!(local, datetime!(2026-12-06 01:30 +05:30));
        assert_eq!(local.hour(), 1);
        assert_eq!(local.day(), 6);
    }

    #[test]
    fn now_uses_configured_offset() {
        let state = AppState::new(CrowdEstimator::with_defaults(), offset!(-03:00));

        assert_eq!(state.now().offset(), offset!(-03:00));
    }
}
