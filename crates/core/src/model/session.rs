use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::GuessLog;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("too many logs for a single session: {len}")]
    TooManyLogs { len: usize },

    #[error("total cards ({total}) does not match correct + missed ({sum})")]
    CountMismatch { total: u32, sum: u32 },
}

/// Aggregate summary for one completed pass through a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    total: u32,
    correct: u32,
    missed: u32,
    best_streak: u32,
}

impl SessionSummary {
    /// Build a summary from already-aggregated counts.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `completed_at` is
    /// before `started_at`, or `SessionSummaryError::CountMismatch` if the
    /// counts do not reconcile.
    pub fn from_parts(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        total: u32,
        correct: u32,
        missed: u32,
        best_streak: u32,
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }
        let sum = correct + missed;
        if sum != total {
            return Err(SessionSummaryError::CountMismatch { total, sum });
        }

        Ok(Self {
            started_at,
            completed_at,
            total,
            correct,
            missed,
            best_streak,
        })
    }

    /// Build a summary from a session's guess history.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `completed_at` is
    /// before `started_at`. Returns `SessionSummaryError::TooManyLogs` if
    /// the log count cannot fit in `u32`.
    pub fn from_logs(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        best_streak: u32,
        logs: &[GuessLog],
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }

        let mut correct = 0_u32;
        let mut missed = 0_u32;
        for log in logs {
            if log.is_correct {
                correct = correct.saturating_add(1);
            } else {
                missed = missed.saturating_add(1);
            }
        }

        let total = u32::try_from(logs.len())
            .map_err(|_| SessionSummaryError::TooManyLogs { len: logs.len() })?;

        Self::from_parts(started_at, completed_at, total, correct, missed, best_streak)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn missed(&self) -> u32 {
        self.missed
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CardId, Label};
    use crate::time::fixed_now;

    fn log(id: usize, label: Label, choice: Label) -> GuessLog {
        GuessLog::new(
            CardId::new(id),
            id,
            "claim",
            label,
            choice,
            "why",
            fixed_now(),
        )
    }

    #[test]
    fn summary_counts_hits_and_misses() {
        let now = fixed_now();
        let logs = vec![
            log(0, Label::Myth, Label::Myth),
            log(1, Label::Fact, Label::Myth),
            log(2, Label::Myth, Label::Myth),
        ];

        let summary = SessionSummary::from_logs(now, now, 2, &logs).unwrap();

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.correct(), 2);
        assert_eq!(summary.missed(), 1);
        assert_eq!(summary.best_streak(), 2);
    }

    #[test]
    fn summary_rejects_inverted_time_range() {
        let later = fixed_now();
        let earlier = later - chrono::Duration::seconds(60);
        let err = SessionSummary::from_logs(later, earlier, 0, &[]).unwrap_err();
        assert_eq!(err, SessionSummaryError::InvalidTimeRange);
    }

    #[test]
    fn summary_rejects_mismatched_counts() {
        let now = fixed_now();
        let err = SessionSummary::from_parts(now, now, 3, 1, 1, 1).unwrap_err();
        assert_eq!(err, SessionSummaryError::CountMismatch { total: 3, sum: 2 });
    }

    #[test]
    fn empty_pass_summarizes_as_zero_over_zero() {
        let now = fixed_now();
        let summary = SessionSummary::from_logs(now, now, 0, &[]).unwrap();
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.correct(), 0);
    }
}
