//! Preloader - settle-all parallel loading of images and sounds
//!
//! Every asset load is an independent future resolving to a tagged
//! [`LoadOutcome`]. The loads are driven together through
//! `FuturesUnordered`, which never short-circuits: a failure is recorded and
//! the remaining loads keep running until every one of them has settled.
//!
//! # Progress
//!
//! | Quantity | Value |
//! |----------|-------|
//! | collection | `loaded / total * 100`, or 100 when the collection is empty |
//! | overall | mean of the image and audio percentages |
//!
//! `loaded` counts settlements, successful or not, so progress always reaches
//! 100 once loading is over.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use tracing::{debug, info, warn};

use crate::error::AssetLoadError;
use crate::handle::{AudioHandle, ImageHandle};
use crate::source::AssetSource;

/// Result of loading one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome<H> {
    Loaded(H),
    Failed(AssetLoadError),
}

/// Whether `on_complete` requires every asset to have loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionPolicy {
    /// Fire only when nothing failed.
    Strict,
    /// Fire at full settlement regardless of failures.
    #[default]
    Tolerant,
}

impl CompletionPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "tolerant" => Some(Self::Tolerant),
            _ => None,
        }
    }
}

/// What to load: image URLs and named sound URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetManifest {
    pub images: Vec<String>,
    /// `(name, url)` pairs.
    pub sounds: Vec<(String, String)>,
}

impl AssetManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    pub fn sound(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.sounds.push((name.into(), url.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.sounds.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollectionProgress {
    pub loaded: usize,
    pub total: usize,
}

impl CollectionProgress {
    pub fn new(total: usize) -> Self {
        Self { loaded: 0, total }
    }

    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 100.0;
        }
        self.loaded as f32 / self.total as f32 * 100.0
    }

    pub fn is_settled(&self) -> bool {
        self.loaded >= self.total
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PreloadProgress {
    pub images: CollectionProgress,
    pub audio: CollectionProgress,
    pub is_loading: bool,
}

impl PreloadProgress {
    pub fn overall(&self) -> f32 {
        (self.images.percent() + self.audio.percent()) / 2.0
    }
}

/// Everything that loaded successfully. Read-only once preloading is over.
#[derive(Debug, Clone, Default)]
pub struct AssetBundle {
    pub images: HashMap<String, ImageHandle>,
    pub audio: HashMap<String, AudioHandle>,
}

impl AssetBundle {
    pub fn image(&self, url: &str) -> Option<&ImageHandle> {
        self.images.get(url)
    }

    pub fn sound(&self, name: &str) -> Option<&AudioHandle> {
        self.audio.get(name)
    }
}

/// Settlement callbacks. All methods default to no-ops.
///
/// Callbacks fire in settlement order, which is not the manifest order.
pub trait PreloadObserver: Send {
    fn on_progress(&mut self, _progress: &PreloadProgress) {}
    fn on_error(&mut self, _error: &AssetLoadError) {}
    fn on_complete(&mut self, _bundle: &AssetBundle) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PreloadObserver for NoopObserver {}

enum Settled {
    Image(String, LoadOutcome<ImageHandle>),
    Audio(String, LoadOutcome<AudioHandle>),
}

pub struct AssetPreloader {
    source: Arc<dyn AssetSource>,
    manifest: AssetManifest,
    policy: CompletionPolicy,
    progress: PreloadProgress,
    errors: Vec<String>,
}

impl AssetPreloader {
    pub fn new(source: Arc<dyn AssetSource>, manifest: AssetManifest) -> Self {
        let progress = PreloadProgress {
            images: CollectionProgress::new(manifest.images.len()),
            audio: CollectionProgress::new(manifest.sounds.len()),
            is_loading: true,
        };
        Self {
            source,
            manifest,
            policy: CompletionPolicy::default(),
            progress,
            errors: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: CompletionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn is_loading(&self) -> bool {
        self.progress.is_loading
    }

    pub fn progress(&self) -> PreloadProgress {
        self.progress
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Load every asset in the manifest and wait for all of them to settle.
    ///
    /// Never fails as a whole; per-asset failures land in [`errors`](Self::errors).
    pub async fn run(&mut self, observer: &mut dyn PreloadObserver) -> AssetBundle {
        info!(
            images = self.manifest.images.len(),
            sounds = self.manifest.sounds.len(),
            "preload started"
        );

        let mut pending: FuturesUnordered<BoxFuture<'static, Settled>> = FuturesUnordered::new();
        for url in &self.manifest.images {
            pending.push(load_image(Arc::clone(&self.source), url.clone()).boxed());
        }
        for (name, url) in &self.manifest.sounds {
            pending.push(load_audio(Arc::clone(&self.source), name.clone(), url.clone()).boxed());
        }

        let mut bundle = AssetBundle::default();
        while let Some(settled) = pending.next().await {
            let failure = match settled {
                Settled::Image(url, outcome) => {
                    self.progress.images.loaded += 1;
                    match outcome {
                        LoadOutcome::Loaded(handle) => {
                            bundle.images.insert(url, handle);
                            None
                        }
                        LoadOutcome::Failed(e) => Some(e),
                    }
                }
                Settled::Audio(name, outcome) => {
                    self.progress.audio.loaded += 1;
                    match outcome {
                        LoadOutcome::Loaded(handle) => {
                            bundle.audio.insert(name, handle);
                            None
                        }
                        LoadOutcome::Failed(e) => Some(e),
                    }
                }
            };
            if let Some(error) = failure {
                warn!(error = %error, reason = error.reason(), "asset failed");
                self.errors.push(error.to_string());
                observer.on_error(&error);
            }
            self.progress.is_loading =
                !(self.progress.images.is_settled() && self.progress.audio.is_settled());
            debug!(overall = self.progress.overall(), "asset settled");
            observer.on_progress(&self.progress);
        }

        if self.progress.is_loading {
            // Empty manifest: nothing settled, so report the final state once.
            self.progress.is_loading = false;
            observer.on_progress(&self.progress);
        }

        info!(
            images = bundle.images.len(),
            sounds = bundle.audio.len(),
            errors = self.errors.len(),
            "preload settled"
        );
        if self.policy == CompletionPolicy::Tolerant || self.errors.is_empty() {
            observer.on_complete(&bundle);
        }
        bundle
    }
}

async fn load_image(source: Arc<dyn AssetSource>, url: String) -> Settled {
    let result = match source.fetch(&url).await {
        Ok(bytes) => ImageHandle::decode(&url, &bytes).map_err(|e| AssetLoadError::image(&url, e)),
        Err(e) => Err(AssetLoadError::image(&url, e)),
    };
    match result {
        Ok(handle) => Settled::Image(url, LoadOutcome::Loaded(handle)),
        Err(e) => Settled::Image(url, LoadOutcome::Failed(e)),
    }
}

async fn load_audio(source: Arc<dyn AssetSource>, name: String, url: String) -> Settled {
    match source.fetch(&url).await {
        Ok(bytes) if !bytes.is_empty() => {
            let handle = AudioHandle::new(&name, &url, bytes);
            Settled::Audio(name, LoadOutcome::Loaded(handle))
        }
        Ok(_) => {
            let e = AssetLoadError::audio(&name, "empty clip");
            Settled::Audio(name, LoadOutcome::Failed(e))
        }
        Err(err) => {
            let e = AssetLoadError::audio(&name, err);
            Settled::Audio(name, LoadOutcome::Failed(e))
        }
    }
}
