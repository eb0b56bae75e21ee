//! Rendering of slices and voxel time courses via `plotters`.
//!
//! All functions draw into a caller-supplied `DrawingArea`; the caller owns
//! the backend and is responsible for presenting/closing it afterwards.

use std::fmt;
use std::str::FromStr;

use ndarray::{ArrayView1, ArrayView3, ArrayView4};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::common::{Orientation, PlotniiError, VoxelPosition};
use crate::slice::{get_slice, volume_at, voxel_time_series, AnatomicalSlice};

/// Maps normalized grey values to plot colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMap {
    Gray,
    /// Diverging blue-white-red scale.
    #[default]
    CoolWarm,
}

impl ColorMap {
    /// Color for a normalized intensity in `[0, 1]`.
    pub fn sample(&self, t: f64) -> RGBColor {
        let t = t.clamp(0.0, 1.0);
        match self {
            ColorMap::Gray => {
                let v = (t * 255.0).round() as u8;
                RGBColor(v, v, v)
            }
            ColorMap::CoolWarm => {
                // cool blue -> near-white -> warm red
                if t < 0.5 {
                    lerp_rgb((59, 76, 192), (221, 221, 221), t * 2.0)
                } else {
                    lerp_rgb((221, 221, 221), (180, 4, 38), t * 2.0 - 1.0)
                }
            }
        }
    }
}

impl fmt::Display for ColorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMap::Gray => write!(f, "gray"),
            ColorMap::CoolWarm => write!(f, "coolwarm"),
        }
    }
}

impl FromStr for ColorMap {
    type Err = PlotniiError;

    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val {
            "gray" | "grey" => Ok(ColorMap::Gray),
            "coolwarm" => Ok(ColorMap::CoolWarm),
            _ => Err(PlotniiError::UnknownColorMap(val.to_string())),
        }
    }
}

fn lerp_rgb(from: (u8, u8, u8), to: (u8, u8, u8), t: f64) -> RGBColor {
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Options for [`track_voxel`].
#[derive(Debug, Clone, Copy)]
pub struct TrackOptions {
    /// Timepoint whose slices are shown.
    pub timepoint: usize,
    pub color_map: ColorMap,
    pub marker_color: RGBColor,
    /// Whether to mark the voxel position on each slice.
    pub mark_voxel: bool,
}

impl Default for TrackOptions {
    fn default() -> Self {
        Self {
            timepoint: 0,
            color_map: ColorMap::CoolWarm,
            marker_color: WHITE,
            mark_voxel: true,
        }
    }
}

/// Renders one slice of a 3D volume in grayscale.
///
/// The slice's first retained axis is plotted on x and the second on y,
/// with y increasing upward, so anatomical left/right and up/down come out
/// the way the fixed axis-label table promises.
pub fn show_anatomical_slice<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    volume: ArrayView3<f64>,
    orientation: Orientation,
    slice_nr: usize,
) -> Result<(), PlotniiError> {
    let slice = get_slice(volume, orientation, slice_nr)?;
    let title = format!("{orientation} slice #{slice_nr}");
    draw_slice(area, &slice, &title, ColorMap::Gray, None)
}

/// Renders one slice of a 4D volume at the given timepoint.
pub fn show_functional_slice<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    volume: ArrayView4<f64>,
    orientation: Orientation,
    slice_nr: usize,
    timepoint: usize,
    color_map: ColorMap,
) -> Result<(), PlotniiError> {
    let sub = volume_at(volume, timepoint)?;
    let slice = get_slice(sub, orientation, slice_nr)?;
    let title = format!("{orientation} slice #{slice_nr}");
    draw_slice(area, &slice, &title, color_map, None)
}

/// Tracks the BOLD signal within a voxel over time.
///
/// Draws the three orientation slices passing through `position` at the
/// display timepoint (third panel double width), marks the voxel on each
/// slice when enabled, and plots the voxel's full time course underneath.
pub fn track_voxel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    volume: ArrayView4<f64>,
    position: VoxelPosition,
    options: TrackOptions,
) -> Result<(), PlotniiError> {
    // extract everything up front: a failed extraction must not leave a
    // partially drawn figure behind
    let series = voxel_time_series(volume, position)?;
    let sub = volume_at(volume, options.timepoint)?;
    let mut panels = Vec::with_capacity(3);
    for orientation in Orientation::ALL {
        let slice = get_slice(sub, orientation, position.slice_index(orientation))?;
        panels.push((orientation, slice));
    }

    let (_, height) = area.dim_in_pixel();
    let (slice_row, series_row) = area.clone().split_vertically((height as f64 * 0.55) as i32);
    let (row_width, _) = slice_row.dim_in_pixel();
    let cells = slice_row.split_by_breakpoints(
        [(row_width / 4) as i32, (row_width / 2) as i32],
        [0i32; 0],
    );

    for ((orientation, slice), cell) in panels.iter().zip(cells.iter()) {
        let marker = if options.mark_voxel {
            Some((position.project(*orientation), options.marker_color))
        } else {
            None
        };
        let title = format!("{orientation} slice #{}", slice.index);
        draw_slice(cell, slice, &title, options.color_map, marker)?;
    }

    draw_time_series(&series_row, series.view())
}

/// Draws one extracted slice into `area` as a per-voxel heatmap, with an
/// optional position marker.
fn draw_slice<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    slice: &AnatomicalSlice,
    title: &str,
    color_map: ColorMap,
    marker: Option<((usize, usize), RGBColor)>,
) -> Result<(), PlotniiError> {
    let (width, height) = slice.data.dim();
    let (lo, hi) = value_range(slice.data.iter());

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 20))
        .margin(5)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(0f64..width as f64, 0f64..height as f64)
        .map_err(backend_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc(slice.x_label)
        .y_desc(slice.y_label)
        .draw()
        .map_err(backend_err)?;

    chart
        .draw_series(iter_2d(0..width, 0..height).map(|(x, y)| {
            let t = (slice.data[[x, y]] - lo) / (hi - lo);
            Rectangle::new(
                [
                    (x as f64, y as f64),
                    (x as f64 + 1.0, y as f64 + 1.0),
                ],
                color_map.sample(t).filled(),
            )
        }))
        .map_err(backend_err)?;

    if let Some(((x, y), color)) = marker {
        chart
            .draw_series(std::iter::once(Circle::new(
                (x as f64 + 0.5, y as f64 + 0.5),
                4,
                color.filled(),
            )))
            .map_err(backend_err)?;
    }
    Ok(())
}

fn draw_time_series<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    series: ArrayView1<f64>,
) -> Result<(), PlotniiError> {
    let n = series.len();
    let (lo, hi) = value_range(series.iter());
    let x_max = n.saturating_sub(1).max(1) as f64;

    let mut chart = ChartBuilder::on(area)
        .caption("BOLD signal inside voxel over time", ("sans-serif", 20))
        .margin(5)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d(0f64..x_max, lo..hi)
        .map_err(backend_err)?;

    chart
        .configure_mesh()
        .x_desc("Timepoint")
        .y_desc("BOLD signal")
        .draw()
        .map_err(backend_err)?;

    chart
        .draw_series(LineSeries::new(
            series.iter().enumerate().map(|(t, &v)| (t as f64, v)),
            &BLUE,
        ))
        .map_err(backend_err)?;
    Ok(())
}

/// Min/max of the values, widened when flat so ranges stay non-degenerate.
fn value_range<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values {
        if v < lo {
            lo = v;
        }
        if v > hi {
            hi = v;
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if lo == hi {
        return (lo - 0.5, hi + 0.5);
    }
    (lo, hi)
}

fn iter_2d<X: Copy, Y>(
    x: impl IntoIterator<Item = X>,
    y: impl IntoIterator<Item = Y> + Clone,
) -> impl Iterator<Item = (X, Y)> {
    x.into_iter()
        .flat_map(move |x| y.clone().into_iter().map(move |y| (x, y)))
}

fn backend_err<E: std::error::Error>(e: E) -> PlotniiError {
    PlotniiError::Backend(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array3, Array4};

    const WIDTH: u32 = 400;
    const HEIGHT: u32 = 300;

    fn test_volume_4d() -> Array4<f64> {
        Array4::from_shape_fn((8, 9, 10, 6), |(i, j, k, t)| {
            (i + 2 * j + 3 * k) as f64 + (t as f64).sin()
        })
    }

    #[test]
    fn colormap_endpoints() {
        assert_eq!(ColorMap::Gray.sample(0.0), RGBColor(0, 0, 0));
        assert_eq!(ColorMap::Gray.sample(1.0), RGBColor(255, 255, 255));
        let cool = ColorMap::CoolWarm.sample(0.0);
        let warm = ColorMap::CoolWarm.sample(1.0);
        assert!(cool.2 > cool.0, "low end should lean blue");
        assert!(warm.0 > warm.2, "high end should lean red");
    }

    #[test]
    fn colormap_from_str() {
        assert_eq!("gray".parse::<ColorMap>().unwrap(), ColorMap::Gray);
        assert_eq!("grey".parse::<ColorMap>().unwrap(), ColorMap::Gray);
        assert_eq!("coolwarm".parse::<ColorMap>().unwrap(), ColorMap::CoolWarm);
        assert!(matches!(
            "jet".parse::<ColorMap>(),
            Err(PlotniiError::UnknownColorMap(_))
        ));
    }

    #[test]
    fn value_range_widens_flat_input() {
        let flat = [3.0, 3.0, 3.0];
        assert_eq!(value_range(flat.iter()), (2.5, 3.5));
        let spread = [1.0, 4.0, 2.0];
        assert_eq!(value_range(spread.iter()), (1.0, 4.0));
    }

    #[test]
    fn anatomical_slice_renders() {
        let vol = Array3::from_shape_fn((8, 9, 10), |(i, j, k)| (i + j + k) as f64);
        let mut buf = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
        {
            let area = BitMapBackend::with_buffer(&mut buf, (WIDTH, HEIGHT)).into_drawing_area();
            area.fill(&WHITE).unwrap();
            show_anatomical_slice(&area, vol.view(), Orientation::Axial, 4).unwrap();
            area.present().unwrap();
        }
        assert!(buf.iter().any(|&b| b != 255), "expected some drawn pixels");
    }

    #[test]
    fn functional_slice_aborts_before_drawing_on_bad_timepoint() {
        let vol = test_volume_4d();
        let mut buf = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
        {
            let area = BitMapBackend::with_buffer(&mut buf, (WIDTH, HEIGHT)).into_drawing_area();
            area.fill(&WHITE).unwrap();
            let result =
                show_functional_slice(&area, vol.view(), Orientation::Frontal, 2, 99, ColorMap::CoolWarm);
            assert!(matches!(
                result,
                Err(PlotniiError::IndexOutOfBounds { axis: "Time", .. })
            ));
        }
        assert!(buf.iter().all(|&b| b == 255), "nothing may be drawn after a failed extraction");
    }

    #[test]
    fn track_voxel_renders_all_panels() {
        let vol = test_volume_4d();
        let mut buf = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
        {
            let area = BitMapBackend::with_buffer(&mut buf, (WIDTH, HEIGHT)).into_drawing_area();
            area.fill(&WHITE).unwrap();
            track_voxel(
                &area,
                vol.view(),
                VoxelPosition::new(3, 4, 5),
                TrackOptions::default(),
            )
            .unwrap();
            area.present().unwrap();
        }
        assert!(buf.iter().any(|&b| b != 255));
    }

    #[test]
    fn track_voxel_rejects_out_of_range_position() {
        let vol = test_volume_4d();
        let mut buf = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
        let area = BitMapBackend::with_buffer(&mut buf, (WIDTH, HEIGHT)).into_drawing_area();
        let result = track_voxel(
            &area,
            vol.view(),
            VoxelPosition::new(3, 4, 50),
            TrackOptions::default(),
        );
        match result {
            Err(PlotniiError::IndexOutOfBounds { axis, size, index }) => {
                assert_eq!(axis, "Cranio-caudal");
                assert_eq!(size, 10);
                assert_eq!(index, 50);
            }
            other => panic!("expected IndexOutOfBounds, got {other:?}"),
        }
    }
}
