//! Asset loading for the jigsaw engine
//!
//! - [`source`]: where bytes come from (filesystem, memory)
//! - [`handle`]: decoded images and shared audio clips
//! - [`preloader`]: settle-all parallel loading with progress and errors
//! - [`runtime`]: tokio bridge for the synchronous UI loop
//! - [`playback`]: overlapping sound playback from preloaded clips
//!
//! A failed asset never aborts a preload. The caller decides what a missing
//! asset means; the engine only refuses to start without its primary image.

pub mod error;
pub mod handle;
pub mod playback;
pub mod preloader;
pub mod runtime;
pub mod source;

pub use error::AssetLoadError;
pub use handle::{AudioHandle, ImageHandle};
pub use playback::{AudioOutput, AudioPlayer, BellOutput, NullAudioOutput};
pub use preloader::{
    AssetBundle, AssetManifest, AssetPreloader, CollectionProgress, CompletionPolicy, LoadOutcome,
    NoopObserver, PreloadObserver, PreloadProgress,
};
pub use runtime::{AssetRuntime, PreloadEvent, PreloadReport};
pub use source::{AssetSource, FsAssetSource, MemoryAssetSource};
