use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use anyhow::Context as _;

use crate::surface::ImageSurface;

/// Outcome of one decode request, tagged with the generation it belongs to.
struct LoadResult {
    generation: u64,
    outcome: anyhow::Result<ImageSurface>,
}

/// Decodes images off the UI thread.
///
/// Each request bumps a generation counter and results come back tagged with
/// it. A result carrying an older generation lost the race against a newer
/// request and is dropped, so a slow decode can never overwrite a fresher
/// image.
pub struct ImageLoader {
    tx: Sender<LoadResult>,
    rx: Receiver<LoadResult>,
    generation: u64,
    pending: bool,
}

impl ImageLoader {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            generation: 0,
            pending: false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Start decoding `path` on a background thread.
    pub fn begin_load(&mut self, path: PathBuf) {
        self.generation += 1;
        self.pending = true;

        let generation = self.generation;
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = decode_file(&path);
            let _ = tx.send(LoadResult { generation, outcome });
        });
    }

    /// Drain finished decodes. Returns the result of the latest request if
    /// it arrived, dropping anything stale.
    pub fn poll(&mut self) -> Option<anyhow::Result<ImageSurface>> {
        let mut fresh = None;
        while let Ok(result) = self.rx.try_recv() {
            if self.is_current(result.generation) {
                self.pending = false;
                fresh = Some(result.outcome);
            } else {
                tracing::debug!(generation = result.generation, "dropping stale decode result");
            }
        }
        fresh
    }

    fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

fn decode_file(path: &Path) -> anyhow::Result<ImageSurface> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    decode_bytes(&bytes)
}

/// Decode raw image bytes into a drawing surface.
pub fn decode_bytes(bytes: &[u8]) -> anyhow::Result<ImageSurface> {
    let image = image::load_from_memory(bytes).context("unsupported or corrupt image data")?;
    Ok(ImageSurface::from_image(image))
}
