//! Asset runtime integration.
//!
//! Bridges the sync UI loop with the async preloader. The loop calls
//! [`AssetRuntime::try_recv`] once per frame; nothing blocks and no shared
//! state is polled.

use std::io;
use std::sync::Arc;

use tokio::runtime::{Handle, Runtime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::playback::{AudioOutput, AudioPlayer};
use crate::error::AssetLoadError;
use crate::preloader::{AssetBundle, AssetPreloader, PreloadObserver, PreloadProgress};

/// Event delivered to the UI loop.
#[derive(Debug, Clone)]
pub enum PreloadEvent {
    Progress(PreloadProgress),
    /// One asset failed; carries its user-facing message.
    Failed(String),
    Settled(PreloadReport),
}

/// Final state of a preload.
#[derive(Debug, Clone, Default)]
pub struct PreloadReport {
    pub bundle: AssetBundle,
    pub errors: Vec<String>,
}

struct ChannelObserver {
    tx: mpsc::UnboundedSender<PreloadEvent>,
}

impl PreloadObserver for ChannelObserver {
    fn on_progress(&mut self, progress: &PreloadProgress) {
        let _ = self.tx.send(PreloadEvent::Progress(*progress));
    }

    fn on_error(&mut self, error: &AssetLoadError) {
        let _ = self.tx.send(PreloadEvent::Failed(error.to_string()));
    }
}

/// Running asset runtime instance.
pub struct AssetRuntime {
    rt: Runtime,
    events: mpsc::UnboundedReceiver<PreloadEvent>,
    task: Option<JoinHandle<()>>,
}

impl AssetRuntime {
    /// Spawn the preload on a fresh multi-threaded runtime.
    pub fn start(mut preloader: AssetPreloader) -> io::Result<Self> {
        let rt = Runtime::new()?;
        let (tx, events) = mpsc::unbounded_channel();
        let task = rt.spawn(async move {
            let mut observer = ChannelObserver { tx: tx.clone() };
            let bundle = preloader.run(&mut observer).await;
            let report = PreloadReport {
                bundle,
                errors: preloader.errors().to_vec(),
            };
            let _ = tx.send(PreloadEvent::Settled(report));
        });
        Ok(Self {
            rt,
            events,
            task: Some(task),
        })
    }

    pub fn try_recv(&mut self) -> Option<PreloadEvent> {
        self.events.try_recv().ok()
    }

    pub fn handle(&self) -> Handle {
        self.rt.handle().clone()
    }

    /// Audio player whose playback tasks run on this runtime.
    pub fn audio_player(&self, output: Arc<dyn AudioOutput>) -> AudioPlayer {
        AudioPlayer::new(self.handle(), output)
    }

    /// Abort any unfinished load and stop the runtime without waiting.
    pub fn shutdown(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.rt.shutdown_background();
    }
}
