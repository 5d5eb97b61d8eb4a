use super::{IAlarmSound, IVibrator};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    SoundStarted,
    SoundStopped,
    VibrationStarted,
    VibrationCancelled,
}

/// Shared log of what the recording sound and vibrator were asked to do
#[derive(Debug, Clone, Default)]
pub struct PlayerLog {
    events: Arc<Mutex<Vec<PlayerEvent>>>,
}

impl PlayerLog {
    pub fn new() -> Self {
        Default::default()
    }

    fn push(&self, event: PlayerEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }

    pub fn events(&self) -> Vec<PlayerEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn count(&self, event: PlayerEvent) -> usize {
        self.events().into_iter().filter(|e| *e == event).count()
    }
}

pub struct RecordingSound {
    log: PlayerLog,
    failing: bool,
}

impl RecordingSound {
    pub fn new(log: PlayerLog) -> Self {
        Self {
            log,
            failing: false,
        }
    }

    /// A sound that can never be loaded
    pub fn failing(log: PlayerLog) -> Self {
        Self { log, failing: true }
    }
}

impl IAlarmSound for RecordingSound {
    fn start_loop(&mut self) -> anyhow::Result<()> {
        if self.failing {
            anyhow::bail!("Alarm sound could not be loaded");
        }
        self.log.push(PlayerEvent::SoundStarted);
        Ok(())
    }

    fn stop(&mut self) {
        if !self.failing {
            self.log.push(PlayerEvent::SoundStopped);
        }
    }
}

pub struct RecordingVibrator {
    log: PlayerLog,
}

impl RecordingVibrator {
    pub fn new(log: PlayerLog) -> Self {
        Self { log }
    }
}

impl IVibrator for RecordingVibrator {
    fn vibrate(&mut self, _pattern: &[u64]) {
        self.log.push(PlayerEvent::VibrationStarted);
    }

    fn cancel(&mut self) {
        self.log.push(PlayerEvent::VibrationCancelled);
    }
}
