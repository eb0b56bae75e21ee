//! Quick commandline demo that renders slice and voxel-tracking figures
//! from a synthetic 4D volume.
//!
//! The library itself performs no file I/O, so this demo builds a small
//! phantom volume in memory (a blob of activity with a sinusoidal BOLD
//! response) and writes two PNG figures: one functional slice and one
//! voxel-tracking figure.

use clap::Parser;
use ndarray::Array4;
use plotters::prelude::*;
use std::fs;
use std::path::Path;

use plotnii::common::{Orientation, VoxelPosition};
use plotnii::plot::{show_functional_slice, track_voxel, ColorMap, TrackOptions};

// use clap to create commandline interface
#[derive(Parser, Debug)]
#[command(author, about, version, long_about)]
struct Args {
    /// an output directory for the generated PNG figures
    #[arg(short, long, default_value = "./")]
    output: String,

    /// the orientation of the single-slice figure
    /// (choose from "sagittal", "frontal", "axial")
    #[arg(long, default_value = "axial")]
    orientation: String,

    /// the slice number of the single-slice figure
    #[arg(short, long, default_value_t = 16)]
    slice: usize,

    /// the timepoint shown in both figures
    #[arg(short, long, default_value_t = 0)]
    timepoint: usize,

    /// voxel position to track, in Medio-lateral direction
    #[arg(long, default_value_t = 16)]
    ml: usize,

    /// voxel position to track, in Antero-posterior direction
    #[arg(long, default_value_t = 20)]
    ap: usize,

    /// voxel position to track, in Cranio-caudal direction
    #[arg(long, default_value_t = 12)]
    cc: usize,

    /// the color map for slice plotting ("gray" or "coolwarm")
    #[arg(long, default_value = "coolwarm")]
    color_map: String,

    /// width and height in pixels of each output figure
    #[arg(long, default_value_t = 900)]
    figure_size: u32,
}

/// Builds a phantom 4D volume: a spherical blob of signal around the volume
/// center whose amplitude oscillates over time, on a noiseless background.
///
/// Indexing: [Medio-lateral, Antero-posterior, Cranio-caudal, Time]
fn phantom_volume(shape: (usize, usize, usize, usize)) -> Array4<f64> {
    let (d0, d1, d2, _) = shape;
    let center = (d0 as f64 / 2.0, d1 as f64 / 2.0, d2 as f64 / 2.0);
    let radius = d0.min(d1).min(d2) as f64 / 4.0;
    Array4::from_shape_fn(shape, |(i, j, k, t)| {
        let dist = ((i as f64 - center.0).powi(2)
            + (j as f64 - center.1).powi(2)
            + (k as f64 - center.2).powi(2))
        .sqrt();
        if dist < radius {
            // BOLD-like oscillation inside the blob
            100.0 + 20.0 * (t as f64 * 0.4).sin() * (1.0 - dist / radius)
        } else {
            50.0
        }
    })
}

/// Main function that parses commandline arguments and renders the figures.
fn main() {
    let cli = Args::parse();
    let output = cli.output;
    let output_basepath = Path::new(&output);

    let orientation: Orientation = cli.orientation.parse().unwrap_or_else(|e| {
        eprintln!("Error! {}", e);
        std::process::exit(-2);
    });
    let color_map: ColorMap = cli.color_map.parse().unwrap_or_else(|e| {
        eprintln!("Error! {}", e);
        std::process::exit(-2);
    });

    fs::create_dir_all(output_basepath).unwrap_or_else(|e| {
        eprintln!("Error! {}", e);
        std::process::exit(-2);
    });

    let volume = phantom_volume((32, 40, 24, 50));
    println!("Phantom volume shape: {:?}", volume.shape());

    let size = (cli.figure_size, cli.figure_size);

    // single functional slice
    let slice_path = output_basepath.join(format!(
        "phantom_{}_slice-{:03}_t-{:03}.png",
        orientation, cli.slice, cli.timepoint
    ));
    {
        let root = BitMapBackend::new(&slice_path, size).into_drawing_area();
        root.fill(&WHITE).unwrap_or_else(|e| {
            eprintln!("Error! {}", e);
            std::process::exit(-2);
        });
        show_functional_slice(
            &root,
            volume.view(),
            orientation,
            cli.slice,
            cli.timepoint,
            color_map,
        )
        .unwrap_or_else(|e| {
            eprintln!("Error! {}", e);
            std::process::exit(-2);
        });
        root.present().unwrap_or_else(|e| {
            eprintln!("Error! {}", e);
            std::process::exit(-2);
        });
    }
    println!("Output: {}", slice_path.display());

    // voxel tracking figure
    let position = VoxelPosition::new(cli.ml, cli.ap, cli.cc);
    let track_path = output_basepath.join(format!(
        "phantom_voxel-{}-{}-{}.png",
        position.ml, position.ap, position.cc
    ));
    {
        let root = BitMapBackend::new(&track_path, size).into_drawing_area();
        root.fill(&WHITE).unwrap_or_else(|e| {
            eprintln!("Error! {}", e);
            std::process::exit(-2);
        });
        let options = TrackOptions {
            timepoint: cli.timepoint,
            color_map,
            ..TrackOptions::default()
        };
        track_voxel(&root, volume.view(), position, options).unwrap_or_else(|e| {
            eprintln!("Error! {}", e);
            std::process::exit(-2);
        });
        root.present().unwrap_or_else(|e| {
            eprintln!("Error! {}", e);
            std::process::exit(-2);
        });
    }
    println!("Output: {}", track_path.display());
}
