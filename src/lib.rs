//! Quick plotting tools for 3D/4D nifti-style volumes held in memory.
//!
//! This crate takes `ndarray` arrays indexed as
//! [Medio-lateral, Antero-posterior, Cranio-caudal] (plus Time for 4D data)
//! and turns them into labeled slice images and voxel time-course plots.
//! It does not read or write any files itself: the caller supplies the
//! array (e.g. from a nifti loader) and a `plotters` drawing area to
//! render into.

pub mod common;
pub mod plot;
pub mod slice;

pub use common::{Orientation, PlotniiError, VoxelPosition};
pub use plot::{show_anatomical_slice, show_functional_slice, track_voxel, ColorMap, TrackOptions};
pub use slice::{get_slice, volume_at, voxel_time_series, AnatomicalSlice};
