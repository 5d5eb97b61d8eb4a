use calarm_domain::{ScheduleOutcome, ScheduledEntry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEntryDTO {
    pub reminder_id: String,
    pub trigger_ts: i64,
    pub meeting_link: Option<String>,
    pub handle: Option<String>,
    /// Already fired or escalated, only kept to not fire again
    pub handled: bool,
}

impl ScheduledEntryDTO {
    pub fn new(entry: ScheduledEntry) -> Self {
        Self {
            handled: entry.is_handled(),
            reminder_id: entry.reminder_id,
            trigger_ts: entry.trigger_ts,
            meeting_link: entry.meeting_link,
            handle: entry.handle.map(|h| h.to_string()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSyncResultDTO {
    pub reminder_id: String,
    /// Missing when the reminder could not be reconciled
    pub outcome: Option<ScheduleOutcome>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummaryDTO {
    /// False when the backend could not be reached, nothing was changed then
    pub backend_reachable: bool,
    pub fetched: usize,
    pub scheduled: usize,
    pub rescheduled: usize,
    pub skipped_duplicate: usize,
    pub fired_immediately: usize,
    pub discarded_stale: usize,
    pub failed: usize,
    pub results: Vec<ReminderSyncResultDTO>,
}

impl SyncSummaryDTO {
    pub fn new(
        backend_reachable: bool,
        fetched: usize,
        results: Vec<ReminderSyncResultDTO>,
    ) -> Self {
        let mut summary = Self {
            backend_reachable,
            fetched,
            ..Default::default()
        };
        for result in &results {
            match result.outcome {
                Some(ScheduleOutcome::Scheduled) => summary.scheduled += 1,
                Some(ScheduleOutcome::Rescheduled) => summary.rescheduled += 1,
                Some(ScheduleOutcome::SkippedDuplicate) => summary.skipped_duplicate += 1,
                Some(ScheduleOutcome::FiredImmediately) => summary.fired_immediately += 1,
                Some(ScheduleOutcome::DiscardedStale) => summary.discarded_stale += 1,
                None => summary.failed += 1,
            }
        }
        summary.results = results;
        summary
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn result(id: &str, outcome: Option<ScheduleOutcome>) -> ReminderSyncResultDTO {
        ReminderSyncResultDTO {
            reminder_id: id.into(),
            outcome,
            error: outcome.map_or(Some("failed".into()), |_| None),
        }
    }

    #[test]
    fn counts_outcomes() {
        let summary = SyncSummaryDTO::new(
            true,
            5,
            vec![
                result("a", Some(ScheduleOutcome::Scheduled)),
                result("b", Some(ScheduleOutcome::Scheduled)),
                result("c", Some(ScheduleOutcome::DiscardedStale)),
                result("d", None),
            ],
        );
        assert_eq!(summary.fetched, 5);
        assert_eq!(summary.results.len(), 4);
        assert_eq!(summary.scheduled, 2);
        assert_eq!(summary.discarded_stale, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.fired_immediately, 0);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["results"][0]["outcome"], "scheduled");
        assert_eq!(json["skippedDuplicate"], 0);
    }
}
