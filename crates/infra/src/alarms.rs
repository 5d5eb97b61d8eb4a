use crate::services::player::AlarmPlayer;
use calarm_domain::{Alarm, AlarmQueue, StoppedAlarm, TriggerOutcome};
use std::sync::{Mutex, MutexGuard};
use tracing::info;

struct AlarmState {
    queue: AlarmQueue,
    player: AlarmPlayer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlarmSnapshot {
    pub current: Option<Alarm>,
    pub queue: Vec<Alarm>,
    pub ringing: bool,
    pub audible: bool,
}

/// The alarm queue together with the player that rings for it.
///
/// Every operation takes the same lock, so the player always matches the queue:
/// it runs exactly while there is a current alarm.
pub struct AlarmRuntime {
    state: Mutex<AlarmState>,
}

impl AlarmRuntime {
    pub fn new<I: IntoIterator<Item = String>>(player: AlarmPlayer, processed: I) -> Self {
        Self {
            state: Mutex::new(AlarmState {
                queue: AlarmQueue::with_processed(processed),
                player,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AlarmState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn trigger(&self, alarm: Alarm) -> TriggerOutcome {
        let mut state = self.lock();
        let alarm_id = alarm.id.clone();
        let outcome = state.queue.trigger(alarm);
        match outcome {
            TriggerOutcome::Enqueued { started_ringing } => {
                info!("Alarm: {} was queued", alarm_id);
                if started_ringing {
                    let AlarmState { queue, player } = &mut *state;
                    if let Some(current) = queue.current() {
                        player.start(current);
                    }
                }
            }
            TriggerOutcome::AlreadyQueued => info!("Alarm: {} is already queued", alarm_id),
            TriggerOutcome::AlreadyProcessed => {
                info!("Alarm: {} was already processed", alarm_id)
            }
        }
        outcome
    }

    fn after_stop(state: &mut AlarmState, stopped: Option<StoppedAlarm>) -> Option<StoppedAlarm> {
        let stopped = stopped?;
        info!("Alarm: {} was stopped", stopped.alarm.id);
        if stopped.became_idle {
            state.player.stop();
        }
        Some(stopped)
    }

    /// Stops the current alarm. `None` when nothing is ringing.
    pub fn stop(&self) -> Option<StoppedAlarm> {
        let mut state = self.lock();
        let stopped = state.queue.stop();
        Self::after_stop(&mut state, stopped)
    }

    /// Stops the current alarm only if it still is the alarm with the given id
    pub fn stop_if_current(&self, alarm_id: &str) -> Option<StoppedAlarm> {
        let mut state = self.lock();
        let stopped = state.queue.stop_if_current(alarm_id);
        Self::after_stop(&mut state, stopped)
    }

    pub fn current(&self) -> Option<Alarm> {
        self.lock().queue.current().cloned()
    }

    pub fn snapshot(&self) -> AlarmSnapshot {
        let state = self.lock();
        AlarmSnapshot {
            current: state.queue.current().cloned(),
            queue: state.queue.alarms(),
            ringing: state.player.is_running(),
            audible: state.player.is_audible(),
        }
    }

    pub fn is_processed(&self, alarm_id: &str) -> bool {
        self.lock().queue.is_processed(alarm_id)
    }

    pub fn mark_processed(&self, alarm_id: &str) -> bool {
        self.lock().queue.mark_processed(alarm_id)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::services::player::{PlayerEvent, PlayerLog, RecordingSound, RecordingVibrator};

    fn alarm(id: &str) -> Alarm {
        Alarm {
            id: id.into(),
            title: "Standup".into(),
            body: "".into(),
            account_email: "me@example.com".into(),
            event_id: None,
            sound: None,
            event_start_time: None,
            meeting_link: None,
            trigger_time: 0,
        }
    }

    fn runtime(log: &PlayerLog) -> AlarmRuntime {
        let player = AlarmPlayer::new(
            Box::new(RecordingSound::new(log.clone())),
            Box::new(RecordingVibrator::new(log.clone())),
        );
        AlarmRuntime::new(player, vec![])
    }

    #[test]
    fn player_keeps_ringing_between_queued_alarms() {
        let log = PlayerLog::new();
        let runtime = runtime(&log);

        runtime.trigger(alarm("a"));
        runtime.trigger(alarm("b"));
        assert_eq!(log.count(PlayerEvent::SoundStarted), 1);

        let stopped = runtime.stop().unwrap();
        assert_eq!(stopped.alarm.id, "a");
        assert!(!stopped.became_idle);
        assert_eq!(log.count(PlayerEvent::SoundStopped), 0);
        assert_eq!(runtime.current().unwrap().id, "b");
        assert!(runtime.snapshot().ringing);

        runtime.stop().unwrap();
        assert_eq!(log.count(PlayerEvent::SoundStopped), 1);
        assert_eq!(log.count(PlayerEvent::VibrationCancelled), 1);
        assert!(!runtime.snapshot().ringing);
        assert!(runtime.stop().is_none());
    }

    #[test]
    fn duplicate_triggers_ring_once() {
        let log = PlayerLog::new();
        let runtime = runtime(&log);

        for _ in 0..3 {
            runtime.trigger(alarm("x"));
        }
        let snapshot = runtime.snapshot();
        assert_eq!(snapshot.queue.len(), 1);
        assert!(snapshot.audible);
        assert_eq!(log.count(PlayerEvent::SoundStarted), 1);

        runtime.stop();
        assert_eq!(
            runtime.trigger(alarm("x")),
            TriggerOutcome::AlreadyProcessed
        );
        assert!(runtime.is_processed("x"));
        assert_eq!(log.count(PlayerEvent::SoundStarted), 1);
    }

    #[test]
    fn restarts_player_for_alarm_after_idle() {
        let log = PlayerLog::new();
        let runtime = runtime(&log);

        runtime.trigger(alarm("a"));
        runtime.stop();
        runtime.trigger(alarm("b"));
        assert_eq!(log.count(PlayerEvent::SoundStarted), 2);
        assert!(runtime.stop_if_current("a").is_none());
        assert_eq!(runtime.stop_if_current("b").unwrap().alarm.id, "b");
        assert_eq!(log.count(PlayerEvent::SoundStopped), 2);
    }
}
