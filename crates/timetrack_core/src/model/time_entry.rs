//! Time entry entity.
//!
//! # Invariants
//! - `end` is strictly after `start`.
//! - Duration is derived, never stored.

use crate::model::timestamp;
use crate::model::validation::ValidationError;
use crate::model::EntityId;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// A span of time one user spent on one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: EntityId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub task_item_id: EntityId,
    pub user_id: EntityId,
}

impl TimeEntry {
    /// Elapsed time between `start` and `end` in fractional hours.
    pub fn duration_hours(&self) -> f64 {
        duration_hours(self.start, self.end)
    }
}

/// Write input for creating or replacing a time entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTimeEntry {
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub start: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub end: DateTime<Utc>,
    pub task_item_id: EntityId,
    pub user_id: EntityId,
}

impl NewTimeEntry {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        task_item_id: EntityId,
        user_id: EntityId,
    ) -> Self {
        Self {
            start,
            end,
            task_item_id,
            user_id,
        }
    }

    /// Returns a copy truncated to whole milliseconds when the range is valid.
    ///
    /// Storage keeps epoch milliseconds, so the ordering check runs on the
    /// truncated values.
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        let start = self.start.trunc_subsecs(3);
        let end = self.end.trunc_subsecs(3);
        if end <= start {
            return Err(ValidationError::EndNotAfterStart);
        }
        Ok(Self {
            start,
            end,
            task_item_id: self.task_item_id,
            user_id: self.user_id,
        })
    }
}

pub(crate) fn duration_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

#[cfg(test)]
mod tests {
    use super::{NewTimeEntry, TimeEntry};
    use crate::model::validation::ValidationError;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn duration_is_fractional_hours() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let entry = TimeEntry {
            id: 1,
            start,
            end: start + Duration::minutes(90),
            task_item_id: 1,
            user_id: 1,
        };
        assert!((entry.duration_hours() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn end_must_be_strictly_after_start() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let same = NewTimeEntry::new(start, start, 1, 1);
        assert_eq!(same.normalized(), Err(ValidationError::EndNotAfterStart));

        let earlier = NewTimeEntry::new(start, start - Duration::hours(1), 1, 1);
        assert!(earlier.normalized().is_err());
    }

    #[test]
    fn sub_millisecond_range_collapses_and_is_rejected() {
        let second = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let draft = NewTimeEntry::new(
            second + Duration::microseconds(100),
            second + Duration::microseconds(900),
            1,
            1,
        );
        assert_eq!(draft.normalized(), Err(ValidationError::EndNotAfterStart));

        let kept = NewTimeEntry::new(second + Duration::microseconds(100), second + Duration::milliseconds(2), 1, 1)
            .normalized()
            .unwrap();
        assert_eq!(kept.start, second);
        assert_eq!(kept.end, second + Duration::milliseconds(2));
    }

    #[test]
    fn draft_accepts_offset_free_timestamps() {
        let draft: NewTimeEntry = serde_json::from_str(
            r#"{"start":"2024-03-01T09:00:00","end":"2024-03-01T17:00:00+02:00","taskItemId":3,"userId":4}"#,
        )
        .unwrap();
        assert_eq!(draft.start, Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
        assert_eq!(draft.end, Utc.with_ymd_and_hms(2024, 3, 1, 15, 0, 0).unwrap());
        assert_eq!(draft.task_item_id, 3);
    }
}
