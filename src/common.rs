use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// set up enums and structs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Fixes the Medio-lateral axis.
    Sagittal,
    /// Fixes the Antero-posterior axis.
    Frontal,
    /// Fixes the Cranio-caudal axis.
    Axial,
}

impl Orientation {
    /// All orientations, in the order the voxel tracker lays out its panels.
    pub const ALL: [Orientation; 3] = [
        Orientation::Sagittal,
        Orientation::Frontal,
        Orientation::Axial,
    ];

    /// The array axis this orientation collapses when slicing.
    /// Indexing: [Medio-lateral, Antero-posterior, Cranio-caudal]
    pub fn axis(&self) -> usize {
        match self {
            Orientation::Sagittal => 0,
            Orientation::Frontal => 1,
            Orientation::Axial => 2,
        }
    }

    /// Name of the collapsed axis, used in out-of-bounds error messages.
    pub fn axis_name(&self) -> &'static str {
        match self {
            Orientation::Sagittal => "Medio-lateral",
            Orientation::Frontal => "Antero-posterior",
            Orientation::Axial => "Cranio-caudal",
        }
    }

    /// The (x, y) plot labels for the two retained axes.
    ///
    /// This is a fixed lookup table: the first retained array axis goes on
    /// x and the second on y.
    pub fn plot_labels(&self) -> (&'static str, &'static str) {
        match self {
            Orientation::Sagittal => ("Antero-posterior", "Cranio-caudal"),
            Orientation::Frontal => ("Medio-lateral", "Cranio-caudal"),
            Orientation::Axial => ("Medio-lateral", "Antero-posterior"),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Sagittal => write!(f, "sagittal"),
            Orientation::Frontal => write!(f, "frontal"),
            Orientation::Axial => write!(f, "axial"),
        }
    }
}

impl FromStr for Orientation {
    type Err = PlotniiError;

    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val {
            "sagittal" => Ok(Orientation::Sagittal),
            "frontal" => Ok(Orientation::Frontal),
            "axial" => Ok(Orientation::Axial),
            _ => Err(PlotniiError::InvalidOrientation(val.to_string())),
        }
    }
}

/// A single voxel location in [Medio-lateral, Antero-posterior,
/// Cranio-caudal] index coordinates. The position stays fixed across all
/// timepoints when tracking a voxel through a 4D volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoxelPosition {
    pub ml: usize,
    pub ap: usize,
    pub cc: usize,
}

impl VoxelPosition {
    pub fn new(ml: usize, ap: usize, cc: usize) -> Self {
        Self { ml, ap, cc }
    }

    /// The coordinate lying on the axis that `orientation` fixes, i.e. the
    /// slice number that passes through this voxel.
    pub fn slice_index(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Sagittal => self.ml,
            Orientation::Frontal => self.ap,
            Orientation::Axial => self.cc,
        }
    }

    /// Projects the voxel onto the slice plane of `orientation` by dropping
    /// the fixed coordinate. The remaining two keep their (ML, AP, CC)
    /// order, matching the slice's (x, y) plot axes.
    pub fn project(&self, orientation: Orientation) -> (usize, usize) {
        match orientation {
            Orientation::Sagittal => (self.ap, self.cc),
            Orientation::Frontal => (self.ml, self.cc),
            Orientation::Axial => (self.ml, self.ap),
        }
    }
}

#[derive(Error, Debug)]
pub enum PlotniiError {
    #[error("invalid orientation \"{0}\", choose from [\"sagittal\", \"frontal\", \"axial\"]")]
    InvalidOrientation(String),
    #[error("index {index} is out of bounds for the {axis} axis (size {size})")]
    IndexOutOfBounds {
        axis: &'static str,
        size: usize,
        index: usize,
    },
    #[error("unknown color map \"{0}\", choose from [\"gray\", \"coolwarm\"]")]
    UnknownColorMap(String),
    #[error("plotting backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_axes() {
        assert_eq!(Orientation::Sagittal.axis(), 0);
        assert_eq!(Orientation::Frontal.axis(), 1);
        assert_eq!(Orientation::Axial.axis(), 2);
    }

    #[test]
    fn orientation_labels() {
        assert_eq!(
            Orientation::Sagittal.plot_labels(),
            ("Antero-posterior", "Cranio-caudal")
        );
        assert_eq!(
            Orientation::Frontal.plot_labels(),
            ("Medio-lateral", "Cranio-caudal")
        );
        assert_eq!(
            Orientation::Axial.plot_labels(),
            ("Medio-lateral", "Antero-posterior")
        );
    }

    #[test]
    fn orientation_from_str() {
        assert_eq!(
            "sagittal".parse::<Orientation>().unwrap(),
            Orientation::Sagittal
        );
        assert_eq!("axial".parse::<Orientation>().unwrap(), Orientation::Axial);
        let err = "coronal".parse::<Orientation>().unwrap_err();
        assert!(matches!(err, PlotniiError::InvalidOrientation(_)));
        assert!(err.to_string().contains("sagittal"));
    }

    #[test]
    fn voxel_projection_drops_fixed_axis() {
        let pos = VoxelPosition::new(5, 7, 9);
        assert_eq!(pos.project(Orientation::Sagittal), (7, 9));
        assert_eq!(pos.project(Orientation::Frontal), (5, 9));
        assert_eq!(pos.project(Orientation::Axial), (5, 7));
    }

    #[test]
    fn voxel_slice_index_matches_fixed_axis() {
        let pos = VoxelPosition::new(5, 7, 9);
        assert_eq!(pos.slice_index(Orientation::Sagittal), 5);
        assert_eq!(pos.slice_index(Orientation::Frontal), 7);
        assert_eq!(pos.slice_index(Orientation::Axial), 9);
    }
}
