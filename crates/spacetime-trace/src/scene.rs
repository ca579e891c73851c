//! Export sinks for assembled scenes.
//!
//! The 3D scene graph and interchange exporters live outside this crate;
//! they receive a [`VoxelScene`] through the [`VoxelSink`] trait.
//! [`JsonSceneWriter`] is the built-in sink that writes the scene as a
//! JSON document the web viewer loads directly.

use std::io::Write;

use spacetime_types::VoxelScene;
use tracing::debug;

use crate::error::SceneError;

/// A consumer of assembled voxel scenes.
pub trait VoxelSink {
    /// Take delivery of a scene.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError`] if the sink cannot store or serialize it.
    fn accept(&mut self, scene: &VoxelScene) -> Result<(), SceneError>;
}

/// Writes each accepted scene as pretty-printed JSON.
#[derive(Debug)]
pub struct JsonSceneWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonSceneWriter<W> {
    /// Wrap a writer.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> VoxelSink for JsonSceneWriter<W> {
    fn accept(&mut self, scene: &VoxelScene) -> Result<(), SceneError> {
        serde_json::to_writer_pretty(&mut self.writer, scene)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        debug!(scene_id = %scene.id, voxels = scene.len(), "Scene written");
        Ok(())
    }
}

/// Collects scenes in memory. Useful for embedding and tests.
#[derive(Debug, Default)]
pub struct CollectingSink {
    /// Every scene accepted so far.
    pub scenes: Vec<VoxelScene>,
}

impl VoxelSink for CollectingSink {
    fn accept(&mut self, scene: &VoxelScene) -> Result<(), SceneError> {
        self.scenes.push(scene.clone());
        Ok(())
    }
}
