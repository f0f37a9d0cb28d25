use std::path::Path;

use crate::{
    codec::image_io::{decode_bytes, decode_file, encode_bytes, encode_file},
    effectors::effector::{Effector, StageData},
    foundation::{
        core::ImageFormat,
        error::{LumenError, LumenResult},
    },
    pipeline::chain::EffectorChain,
    storage::{buffer::PixelBuffer, guarded::GuardedCell, mask::Mask},
};

/// Where a [`Pipeline`] is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// No image loaded.
    Empty,
    /// Image loaded, nothing chained since the last run or save.
    Loaded,
    /// Image loaded and effectors waiting to run.
    Chained,
    /// The chain ran and its output is the buffer of record.
    Executed,
}

/// Holds one image and an effector chain, and runs the chain against the image.
///
/// `run` is not reentrant; callers serialize chain edits and runs per instance.
///
/// `load_*`, `run`, `save` and `encode` work on the buffer of record. Every change to it is
/// published into [`GuardedCell`] snapshots that [`image`](Self::image) and
/// [`masks`](Self::masks) read, so a caller holding [`lock_snapshot`](Self::lock_snapshot)
/// keeps seeing the previous result until it unlocks.
#[derive(Debug, Default)]
pub struct Pipeline {
    buffer: Option<PixelBuffer>,
    pieces: Option<Vec<Mask>>,
    image: GuardedCell<Option<PixelBuffer>>,
    masks: GuardedCell<Option<Vec<Mask>>>,
    chain: EffectorChain,
    error_pos: Option<usize>,
    executed: bool,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a pipeline with `configure`, then run it when `should_run` is set.
    pub fn build(
        should_run: bool,
        configure: impl FnOnce(&mut Pipeline) -> LumenResult<()>,
    ) -> LumenResult<Self> {
        let mut pipeline = Self::new();
        configure(&mut pipeline)?;
        if should_run {
            pipeline.run()?;
        }
        Ok(pipeline)
    }

    /// Decode `path` and make it the buffer of record. The chain is kept.
    #[tracing::instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load_image(&mut self, path: impl AsRef<Path>) -> LumenResult<()> {
        let buf = decode_file(path.as_ref())?;
        tracing::debug!(
            width = buf.width(),
            height = buf.height(),
            format = %buf.format(),
            "image loaded"
        );
        self.load_buffer(buf);
        Ok(())
    }

    /// Decode in-memory bytes, sniffing the format when `hint` is `None`.
    pub fn load_image_bytes(&mut self, bytes: &[u8], hint: Option<ImageFormat>) -> LumenResult<()> {
        let buf = decode_bytes(bytes, hint)?;
        self.load_buffer(buf);
        Ok(())
    }

    /// Replace the buffer of record with an already decoded one.
    pub fn load_buffer(&mut self, buf: PixelBuffer) {
        self.buffer = Some(buf);
        self.pieces = None;
        self.executed = false;
        self.publish();
    }

    pub fn unload_image(&mut self) {
        self.buffer = None;
        self.pieces = None;
        self.executed = false;
        self.publish();
    }

    /// Unload the image and drop every effector.
    pub fn clear(&mut self) {
        self.unload_image();
        self.chain.clear();
        self.error_pos = None;
    }

    /// Append effectors after checking they fit the current tail.
    ///
    /// A mismatch leaves the chain unchanged and records the rejected index in
    /// [`error_pos`](Self::error_pos).
    pub fn chain(&mut self, effectors: impl IntoIterator<Item = Effector>) -> LumenResult<()> {
        self.error_pos = None;
        if let Err(e) = self.chain.extend(effectors) {
            self.error_pos = e.position();
            tracing::debug!(position = ?self.error_pos, error = %e, "chain rejected");
            return Err(e);
        }
        self.executed = false;
        Ok(())
    }

    /// Drop every effector; the loaded image is kept.
    pub fn clear_effectors(&mut self) {
        self.chain.clear();
        self.executed = false;
    }

    pub fn effectors(&self) -> &[Effector] {
        self.chain.as_slice()
    }

    /// Run the chain against the buffer of record.
    ///
    /// The chain works on a copy; the result is committed only when every stage succeeds.
    /// Running again re-applies the chain to the previous output.
    #[tracing::instrument(skip(self), fields(stages = self.chain.len()))]
    pub fn run(&mut self) -> LumenResult<()> {
        self.error_pos = None;
        let src = self.record()?.clone();

        let mut data = StageData::Pixels(src);
        for (position, effector) in self.chain.iter().enumerate() {
            tracing::debug!(position, name = effector.name(), kind = ?effector.kind(), "applying effector");
            data = match effector.apply(data) {
                Ok(data) => data,
                Err(e) => {
                    self.error_pos = Some(position);
                    return Err(LumenError::stage(position, effector.name(), e));
                }
            };
        }

        (self.buffer, self.pieces) = match data {
            StageData::Pixels(buf) => (Some(buf), None),
            StageData::Masks { image, masks } => {
                tracing::debug!(count = masks.len(), "chain ended in masks");
                (Some(image), Some(masks))
            }
        };
        self.executed = true;
        self.publish();
        Ok(())
    }

    /// Encode the buffer of record in its declared format and write it to `path`.
    ///
    /// Every failure, including encoder errors, is reported as [`LumenError::Io`].
    #[tracing::instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&mut self, path: impl AsRef<Path>) -> LumenResult<()> {
        let path = path.as_ref();
        let buf = self.record()?;
        encode_file(buf, buf.format(), path).map_err(|e| match e {
            LumenError::Io(_) => e,
            other => LumenError::io(format!("save '{}': {other}", path.display())),
        })?;
        self.executed = false;
        Ok(())
    }

    /// The buffer of record encoded in its declared format.
    pub fn encode(&self) -> LumenResult<Vec<u8>> {
        let buf = self.record()?;
        encode_bytes(buf, buf.format())
    }

    /// The published image snapshot; lags the buffer of record while the snapshot is locked.
    pub fn image(&mut self) -> LumenResult<&PixelBuffer> {
        self.image
            .read()
            .as_ref()
            .ok_or_else(|| LumenError::image("no image loaded; call load_image first"))
    }

    /// Masks produced by a trailing cutter on the last run, if any.
    pub fn masks(&mut self) -> Option<&[Mask]> {
        self.masks.read().as_deref()
    }

    /// Chain index of the most recent `chain` or `run` failure.
    pub fn error_pos(&self) -> Option<usize> {
        self.error_pos
    }

    pub fn state(&self) -> PipelineState {
        match (self.buffer.is_some(), self.executed, self.chain.is_empty()) {
            (false, _, _) => PipelineState::Empty,
            (true, true, _) => PipelineState::Executed,
            (true, false, false) => PipelineState::Chained,
            (true, false, true) => PipelineState::Loaded,
        }
    }

    /// Freeze the image and mask snapshots; writes made meanwhile stay pending.
    pub fn lock_snapshot(&mut self) {
        self.image.lock();
        self.masks.lock();
    }

    /// Allow pending writes to land on the next read or write.
    pub fn unlock_snapshot(&mut self) {
        self.image.unlock();
        self.masks.unlock();
    }

    pub fn is_snapshot_locked(&self) -> bool {
        self.image.is_locked()
    }

    fn record(&self) -> LumenResult<&PixelBuffer> {
        self.buffer
            .as_ref()
            .ok_or_else(|| LumenError::image("no image loaded; call load_image first"))
    }

    fn publish(&mut self) {
        self.image.write(self.buffer.clone());
        self.masks.write(self.pieces.clone());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/runner.rs"]
mod tests;
