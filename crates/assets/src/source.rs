//! Where asset bytes come from.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use futures::future::BoxFuture;
use futures::FutureExt;

/// Fetches raw bytes for an asset URL.
///
/// Object-safe so preloaders can hold an `Arc<dyn AssetSource>`.
pub trait AssetSource: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, io::Result<Vec<u8>>>;
}

/// Reads assets from the local filesystem, optionally under a root directory.
#[derive(Debug, Clone, Default)]
pub struct FsAssetSource {
    root: Option<PathBuf>,
}

impl FsAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, url: &str) -> PathBuf {
        let path = url.strip_prefix("file://").unwrap_or(url);
        match &self.root {
            Some(root) => root.join(path),
            None => PathBuf::from(path),
        }
    }
}

impl AssetSource for FsAssetSource {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, io::Result<Vec<u8>>> {
        let path = self.resolve(url);
        async move { tokio::fs::read(path).await }.boxed()
    }
}

/// In-memory asset table, for tests and embedded assets.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetSource {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(url.into(), bytes);
    }

    pub fn with(mut self, url: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(url, bytes);
        self
    }
}

impl AssetSource for MemoryAssetSource {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, io::Result<Vec<u8>>> {
        let result = self.entries.get(url).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no asset named {url}"))
        });
        futures::future::ready(result).boxed()
    }
}
