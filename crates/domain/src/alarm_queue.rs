use crate::alarm::Alarm;
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    /// No alarms are waiting
    Idle,
    /// The head of the queue is the current alarm
    Ringing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Appended to the queue. `started_ringing` is set if the queue was empty before.
    Enqueued { started_ringing: bool },
    /// An alarm with the same id is already waiting
    AlreadyQueued,
    /// The user already stopped an alarm with this id
    AlreadyProcessed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoppedAlarm {
    pub alarm: Alarm,
    /// The queue became empty and the player should stop
    pub became_idle: bool,
}

/// Ordered and deduplicated queue of triggered alarms.
///
/// The processed set only ever grows. Together with the queue it guarantees that
/// an alarm identity rings at most once.
#[derive(Debug, Default)]
pub struct AlarmQueue {
    queue: VecDeque<Alarm>,
    processed: HashSet<String>,
}

impl AlarmQueue {
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a queue that already knows about alarms processed earlier, e.g. by a previous process
    pub fn with_processed<I: IntoIterator<Item = String>>(processed: I) -> Self {
        Self {
            queue: VecDeque::new(),
            processed: processed.into_iter().collect(),
        }
    }

    pub fn state(&self) -> QueueState {
        if self.queue.is_empty() {
            QueueState::Idle
        } else {
            QueueState::Ringing
        }
    }

    pub fn current(&self) -> Option<&Alarm> {
        self.queue.front()
    }

    pub fn alarms(&self) -> Vec<Alarm> {
        self.queue.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_processed(&self, alarm_id: &str) -> bool {
        self.processed.contains(alarm_id)
    }

    pub fn is_queued(&self, alarm_id: &str) -> bool {
        self.queue.iter().any(|a| a.id == alarm_id)
    }

    pub fn trigger(&mut self, alarm: Alarm) -> TriggerOutcome {
        if self.is_processed(&alarm.id) {
            return TriggerOutcome::AlreadyProcessed;
        }
        if self.is_queued(&alarm.id) {
            return TriggerOutcome::AlreadyQueued;
        }
        let started_ringing = self.queue.is_empty();
        self.queue.push_back(alarm);
        TriggerOutcome::Enqueued { started_ringing }
    }

    /// Marks the current alarm as processed and removes it from the queue.
    /// Returns `None` when idle.
    pub fn stop(&mut self) -> Option<StoppedAlarm> {
        let alarm = self.queue.pop_front()?;
        self.processed.insert(alarm.id.clone());
        Some(StoppedAlarm {
            alarm,
            became_idle: self.queue.is_empty(),
        })
    }

    /// Same as `stop` but only if the current alarm still has the given id
    pub fn stop_if_current(&mut self, alarm_id: &str) -> Option<StoppedAlarm> {
        match self.current() {
            Some(current) if current.id == alarm_id => self.stop(),
            _ => None,
        }
    }

    /// Adds an id to the processed set without it ever having been queued.
    /// Returns false if it was already processed.
    pub fn mark_processed(&mut self, alarm_id: &str) -> bool {
        self.processed.insert(alarm_id.to_string())
    }
}
