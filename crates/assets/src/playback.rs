//! Sound playback with per-play clones.
//!
//! The preloaded [`AudioHandle`]s stay untouched in the player's table. Each
//! `play_audio` call clones the handle and hands the clone to the output on
//! the async runtime, so overlapping plays of the same sound do not cut each
//! other off. The clone is dropped when its playback task finishes.

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::runtime::Handle;
use tokio::task::JoinSet;
use tracing::debug;

use crate::handle::AudioHandle;

/// Something that can play a clip to completion.
pub trait AudioOutput: Send + Sync + 'static {
    fn play(&self, clip: AudioHandle) -> BoxFuture<'static, ()>;
}

/// Finishes immediately without making a sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudioOutput;

impl AudioOutput for NullAudioOutput {
    fn play(&self, clip: AudioHandle) -> BoxFuture<'static, ()> {
        async move { drop(clip) }.boxed()
    }
}

/// Rings the terminal bell and holds the clip for a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct BellOutput {
    duration: Duration,
}

impl BellOutput {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl Default for BellOutput {
    fn default() -> Self {
        Self::new(Duration::from_millis(150))
    }
}

impl AudioOutput for BellOutput {
    fn play(&self, clip: AudioHandle) -> BoxFuture<'static, ()> {
        let duration = self.duration;
        async move {
            let mut out = std::io::stdout();
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
            tokio::time::sleep(duration).await;
            drop(clip);
        }
        .boxed()
    }
}

pub struct AudioPlayer {
    runtime: Handle,
    output: Arc<dyn AudioOutput>,
    clips: HashMap<String, AudioHandle>,
    active: JoinSet<()>,
}

impl AudioPlayer {
    pub fn new(runtime: Handle, output: Arc<dyn AudioOutput>) -> Self {
        Self {
            runtime,
            output,
            clips: HashMap::new(),
            active: JoinSet::new(),
        }
    }

    pub fn with_clips(mut self, clips: HashMap<String, AudioHandle>) -> Self {
        self.clips = clips;
        self
    }

    pub fn insert(&mut self, clip: AudioHandle) {
        self.clips.insert(clip.name.to_string(), clip);
    }

    pub fn clip(&self, name: &str) -> Option<&AudioHandle> {
        self.clips.get(name)
    }

    /// Start playing a fresh clone of `name`. Returns false for unknown names.
    pub fn play_audio(&mut self, name: &str) -> bool {
        self.reap();
        let Some(clip) = self.clips.get(name).cloned() else {
            debug!(name, "no such sound");
            return false;
        };
        self.active.spawn_on(self.output.play(clip), &self.runtime);
        true
    }

    /// Number of plays still running.
    pub fn in_flight(&mut self) -> usize {
        self.reap();
        self.active.len()
    }

    /// Abort every in-flight play.
    pub fn stop_all(&mut self) {
        self.active.abort_all();
    }

    fn reap(&mut self) {
        while self.active.try_join_next().is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowOutput(Duration);

    impl AudioOutput for SlowOutput {
        fn play(&self, clip: AudioHandle) -> BoxFuture<'static, ()> {
            let d = self.0;
            async move {
                tokio::time::sleep(d).await;
                drop(clip);
            }
            .boxed()
        }
    }

    fn player(output: impl AudioOutput) -> AudioPlayer {
        let mut p = AudioPlayer::new(Handle::current(), Arc::new(output));
        p.insert(AudioHandle::new("snap", "snap.wav", vec![0; 64]));
        p
    }

    #[tokio::test]
    async fn overlapping_plays_use_separate_clones() {
        let mut p = player(SlowOutput(Duration::from_millis(40)));
        assert!(p.play_audio("snap"));
        assert!(p.play_audio("snap"));
        assert_eq!(p.in_flight(), 2);
        assert_eq!(p.clip("snap").unwrap().share_count(), 3);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(p.in_flight(), 0);
        assert_eq!(p.clip("snap").unwrap().share_count(), 1);
    }

    #[tokio::test]
    async fn unknown_sound_is_not_played() {
        let mut p = player(NullAudioOutput);
        assert!(!p.play_audio("fanfare"));
        assert_eq!(p.in_flight(), 0);
    }

    #[tokio::test]
    async fn stop_all_aborts_in_flight_plays() {
        let mut p = player(SlowOutput(Duration::from_secs(30)));
        p.play_audio("snap");
        p.play_audio("snap");
        p.stop_all();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(p.in_flight(), 0);
        assert_eq!(p.clip("snap").unwrap().share_count(), 1);
    }
}
