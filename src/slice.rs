//! Slice extraction from 3D and 4D volumes.
//!
//! Indexing: [Medio-lateral, Antero-posterior, Cranio-caudal, Time]

use ndarray::prelude::*;
use ndarray::{ArrayView3, ArrayView4, Axis};

use crate::common::{Orientation, PlotniiError, VoxelPosition};

/// A 2D cross-section of a volume along one orientation, together with the
/// plot labels of the two retained axes.
#[derive(Debug, Clone)]
pub struct AnatomicalSlice {
    pub data: Array2<f64>,
    pub index: usize,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

impl AnatomicalSlice {
    pub fn new(
        data: Array2<f64>,
        index: usize,
        x_label: &'static str,
        y_label: &'static str,
    ) -> Self {
        Self {
            data,
            index,
            x_label,
            y_label,
        }
    }
}

/// Extracts a single slice from a 3D volume along the given orientation.
///
/// The orientation's axis is fixed at `slice_nr`; the two remaining axes
/// keep their order, so `data[[x, y]]` pairs with the returned x/y labels.
///
/// # Arguments
///
/// * `volume` - A 3D array with grey values.
/// * `orientation` - Which spatial axis to collapse.
/// * `slice_nr` - Index along the collapsed axis.
///
/// # Returns
///
/// An `AnatomicalSlice`, or `IndexOutOfBounds` when `slice_nr` does not fit
/// the volume.
pub fn get_slice(
    volume: ArrayView3<f64>,
    orientation: Orientation,
    slice_nr: usize,
) -> Result<AnatomicalSlice, PlotniiError> {
    let axis = orientation.axis();
    let size = volume.len_of(Axis(axis));
    if slice_nr >= size {
        return Err(PlotniiError::IndexOutOfBounds {
            axis: orientation.axis_name(),
            size,
            index: slice_nr,
        });
    }
    let slice = volume.index_axis(Axis(axis), slice_nr).to_owned();
    let (x_label, y_label) = orientation.plot_labels();
    Ok(AnatomicalSlice::new(slice, slice_nr, x_label, y_label))
}

/// Selects the 3D sub-volume of a 4D volume at one timepoint.
pub fn volume_at(
    volume: ArrayView4<f64>,
    timepoint: usize,
) -> Result<ArrayView3<f64>, PlotniiError> {
    let size = volume.len_of(Axis(3));
    if timepoint >= size {
        return Err(PlotniiError::IndexOutOfBounds {
            axis: "Time",
            size,
            index: timepoint,
        });
    }
    Ok(volume.index_axis_move(Axis(3), timepoint))
}

/// Extracts the voxel's value at every timepoint of a 4D volume.
///
/// The returned vector has one entry per timepoint, in time order.
pub fn voxel_time_series(
    volume: ArrayView4<f64>,
    position: VoxelPosition,
) -> Result<Array1<f64>, PlotniiError> {
    for orientation in Orientation::ALL {
        let size = volume.len_of(Axis(orientation.axis()));
        let index = position.slice_index(orientation);
        if index >= size {
            return Err(PlotniiError::IndexOutOfBounds {
                axis: orientation.axis_name(),
                size,
                index,
            });
        }
    }
    let series = volume
        .slice(s![position.ml, position.ap, position.cc, ..])
        .to_owned();
    Ok(series)
}
