mod recording;
#[cfg(feature = "rodio-sound")]
mod rodio_sound;

use calarm_domain::Alarm;
pub use recording::{PlayerEvent, PlayerLog, RecordingSound, RecordingVibrator};
#[cfg(feature = "rodio-sound")]
pub use rodio_sound::RodioSound;
use tracing::{debug, info, warn};

/// Milliseconds of vibration and pause, repeated while the alarm rings
pub const VIBRATION_PATTERN: [u64; 3] = [1000, 1000, 1000];

/// Loops the alarm sound until stopped
pub trait IAlarmSound: Send {
    fn start_loop(&mut self) -> anyhow::Result<()>;
    fn stop(&mut self);
}

pub trait IVibrator: Send {
    /// Repeats the pattern until cancelled
    fn vibrate(&mut self, pattern: &[u64]);
    fn cancel(&mut self);
}

/// Used when no audio output is configured. Alarms are only visible to clients of the api.
pub struct SilentSound {}

impl IAlarmSound for SilentSound {
    fn start_loop(&mut self) -> anyhow::Result<()> {
        info!("Alarm is ringing (no alarm sound configured)");
        Ok(())
    }

    fn stop(&mut self) {}
}

/// Vibration for hosts without a vibration motor
pub struct NoVibration {}

impl IVibrator for NoVibration {
    fn vibrate(&mut self, pattern: &[u64]) {
        debug!("Vibration requested with pattern: {:?}", pattern);
    }

    fn cancel(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayerState {
    Stopped,
    /// `audible` is false when the sound failed to start. The alarm still counts as ringing.
    Playing { audible: bool },
}

/// Rings while there is a current alarm. Sound and vibration start and stop together.
pub struct AlarmPlayer {
    sound: Box<dyn IAlarmSound>,
    vibrator: Box<dyn IVibrator>,
    state: PlayerState,
}

impl AlarmPlayer {
    pub fn new(sound: Box<dyn IAlarmSound>, vibrator: Box<dyn IVibrator>) -> Self {
        Self {
            sound,
            vibrator,
            state: PlayerState::Stopped,
        }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(SilentSound {}), Box::new(NoVibration {}))
    }

    pub fn is_running(&self) -> bool {
        self.state != PlayerState::Stopped
    }

    pub fn is_audible(&self) -> bool {
        self.state == PlayerState::Playing { audible: true }
    }

    /// Starts ringing for the alarm. Does nothing if already running.
    pub fn start(&mut self, alarm: &Alarm) {
        if self.is_running() {
            return;
        }
        info!("Starting alarm player for alarm: {}", alarm.id);
        let audible = match self.sound.start_loop() {
            Ok(()) => {
                self.vibrator.vibrate(&VIBRATION_PATTERN);
                true
            }
            Err(e) => {
                warn!(
                    "Failed to start alarm sound for alarm: {}. Error: {:?}",
                    alarm.id, e
                );
                false
            }
        };
        self.state = PlayerState::Playing { audible };
    }

    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        info!("Stopping alarm player");
        self.sound.stop();
        self.vibrator.cancel();
        self.state = PlayerState::Stopped;
    }
}
