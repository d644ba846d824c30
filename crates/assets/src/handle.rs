//! Decoded asset handles.
//!
//! Handles are cheap to clone: pixel and sample buffers live behind an `Arc`,
//! so a per-play clone of a sound shares the preloaded bytes.

use std::sync::Arc;

/// A decoded RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    pub url: Arc<str>,
    pub width: u32,
    pub height: u32,
    pixels: Arc<[u8]>,
}

impl ImageHandle {
    /// Decode PNG/JPEG/GIF/BMP bytes.
    pub fn decode(url: &str, bytes: &[u8]) -> Result<Self, image::ImageError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            url: Arc::from(url),
            width,
            height,
            pixels: Arc::from(rgba.into_raw()),
        })
    }

    /// Build from raw RGBA8 rows. Returns `None` if the buffer size is wrong.
    pub fn from_rgba(url: &str, width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self {
            url: Arc::from(url),
            width,
            height,
            pixels: Arc::from(pixels),
        })
    }

    /// Uniformly colored image; test fixtures use it in place of a decoded file.
    pub fn solid(url: &str, width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels: Vec<u8> = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            url: Arc::from(url),
            width,
            height,
            pixels: Arc::from(pixels),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.pixels.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// An encoded sound clip, kept as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioHandle {
    pub name: Arc<str>,
    pub url: Arc<str>,
    bytes: Arc<[u8]>,
}

impl AudioHandle {
    pub fn new(name: &str, url: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: Arc::from(name),
            url: Arc::from(url),
            bytes: Arc::from(bytes),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of live handles sharing this clip's bytes.
    pub fn share_count(&self) -> usize {
        Arc::strong_count(&self.bytes)
    }
}
