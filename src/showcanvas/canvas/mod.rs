//! # Canvas Layer
//!
//! The canvas is where placements end up. It is the host editor's capability, so the
//! library only sees it through the [`CanvasSink`] trait.
//!
//! ## Implementations
//!
//! - [`fs::DesignFile`]: JSON design document on disk, used by the CLI host
//!   - Every `place` appends one element and rewrites the file
//!   - Uploads register the image URL under a fresh asset id
//!
//! - [`memory::RecordingCanvas`]: records every call, for tests and `--dry-run`
//!   - Can be told to reject specific uploads or placements
//!
//! ## Contract
//!
//! - `upload` is called for an image before it is placed, and only for images whose
//!   source is still pending.
//! - `place` receives text or a resolved image. Calls arrive one at a time, in z-order.
//! - A sink never rolls back: what was placed stays placed.

use crate::error::Result;
use crate::layout::{AssetRef, ImageUpload, Placement};

pub mod fs;
pub mod memory;

pub trait CanvasSink {
    /// Put one element on the canvas.
    fn place(&mut self, placement: &Placement) -> Result<()>;

    /// Make an external image available to the canvas and return a handle to it.
    fn upload(&mut self, image: &ImageUpload) -> Result<AssetRef>;
}

impl<T: CanvasSink + ?Sized> CanvasSink for &mut T {
    fn place(&mut self, placement: &Placement) -> Result<()> {
        (**self).place(placement)
    }

    fn upload(&mut self, image: &ImageUpload) -> Result<AssetRef> {
        (**self).upload(image)
    }
}
