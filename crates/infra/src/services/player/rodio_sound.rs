use super::IAlarmSound;
use anyhow::Context;
use rodio::{Decoder, OutputStream, Sink, Source};
use std::io::Cursor;
use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{error, warn};

const START_TIMEOUT: Duration = Duration::from_secs(2);

enum SoundCommand {
    Start(Sender<Result<(), String>>),
    Stop,
}

/// Loops an audio file on the default output device.
///
/// Output streams are not `Send`, so they live on a dedicated thread that is
/// driven through a channel.
pub struct RodioSound {
    tx: Sender<SoundCommand>,
}

fn start_sink(bytes: &Arc<Vec<u8>>) -> Result<(OutputStream, Sink), String> {
    let (stream, handle) = OutputStream::try_default()
        .map_err(|e| format!("Failed to create audio output stream: {}", e))?;
    let sink =
        Sink::try_new(&handle).map_err(|e| format!("Failed to create audio sink: {}", e))?;
    let source = Decoder::new(Cursor::new(bytes.as_ref().clone()))
        .map_err(|e| format!("Failed to decode alarm sound: {}", e))?;
    sink.append(source.repeat_infinite());
    Ok((stream, sink))
}

impl RodioSound {
    pub fn new(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Unable to read alarm sound {}", path.display()))?;
        // Fail early on files that can not be played at all
        Decoder::new(Cursor::new(bytes.clone()))
            .with_context(|| format!("Unable to decode alarm sound {}", path.display()))?;
        let bytes = Arc::new(bytes);

        let (tx, rx) = mpsc::channel::<SoundCommand>();
        thread::Builder::new()
            .name("alarm-sound".to_string())
            .spawn(move || {
                let mut playing: Option<(OutputStream, Sink)> = None;
                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        SoundCommand::Start(reply) => {
                            if let Some((_, sink)) = playing.take() {
                                sink.stop();
                            }
                            let res = start_sink(&bytes).map(|started| {
                                playing = Some(started);
                            });
                            let _ = reply.send(res);
                        }
                        SoundCommand::Stop => {
                            if let Some((_, sink)) = playing.take() {
                                sink.stop();
                            }
                        }
                    }
                }
            })
            .context("Unable to spawn the alarm sound thread")?;

        Ok(Self { tx })
    }
}

impl IAlarmSound for RodioSound {
    fn start_loop(&mut self) -> anyhow::Result<()> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(SoundCommand::Start(reply_tx))
            .map_err(|_| anyhow::anyhow!("Alarm sound thread is gone"))?;
        match reply_rx.recv_timeout(START_TIMEOUT) {
            Ok(res) => res.map_err(anyhow::Error::msg),
            Err(e) => {
                warn!("Alarm sound did not start in time: {:?}", e);
                Err(anyhow::Error::new(e))
            }
        }
    }

    fn stop(&mut self) {
        if self.tx.send(SoundCommand::Stop).is_err() {
            error!("Alarm sound thread is gone, unable to stop the alarm sound");
        }
    }
}
