//! Far-field convergence
//!
//! Relative difference between the Fresnel and the Fraunhofer intensity maps
//! of the same obstacle for increasing obstacle to sensor distances

use indicatif::{ProgressBar, ProgressStyle};
use scalar_diffraction::{
    config::{Shape, SimulationConfig},
    propagation::{fraunhofer, fresnel},
    Grid,
};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "far-field", about = "Fresnel to Fraunhofer convergence")]
struct Opt {
    /// Obstacle shape: circle or square
    #[structopt(short, long, default_value = "circle")]
    shape: Shape,
    /// Circle radius or square edge [mm]
    #[structopt(long, default_value = "0.5")]
    size: f64,
    /// Shortest distance [cm]
    #[structopt(long, default_value = "10")]
    near: f64,
    /// Longest distance [cm]
    #[structopt(long, default_value = "1e6")]
    far: f64,
    /// Number of distances
    #[structopt(long, default_value = "13")]
    steps: usize,
    /// Number of samples along each side of the grid
    #[structopt(short = "n", long, default_value = "256")]
    grid_size: usize,
}

fn relative_difference(a: &Grid, b: &Grid) -> f64 {
    let (num, den) = a
        .iter()
        .zip(b.iter())
        .fold((0f64, 0f64), |(num, den), (a, b)| {
            (num + (a - b).powi(2), den + b * b)
        });
    (num / den).sqrt()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();
    anyhow::ensure!(opt.steps > 1, "at least 2 distances are required");
    anyhow::ensure!(
        opt.shape != Shape::Image,
        "only geometric obstacles are supported"
    );

    let base = SimulationConfig::default()
        .shape(opt.shape)
        .radius(opt.size)
        .edge(opt.size)
        .grid_size(opt.grid_size);
    let mask = base.clone().build()?.mask()?;

    let ratio = (opt.far / opt.near).powf(1. / (opt.steps - 1) as f64);
    let pb = ProgressBar::new(opt.steps as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Propagating");

    let mut rows = vec![];
    for k in 0..opt.steps {
        let distance = opt.near * ratio.powi(k as i32);
        let sim = base.clone().distance(distance).build()?;
        let params = sim.params();
        let difference =
            relative_difference(&fresnel(&mask, params)?, &fraunhofer(&mask, params)?);
        let number = sim
            .obstacle()
            .half_width_cm()
            .map(|a| params.fresnel_number(a))
            .unwrap_or(f64::NAN);
        rows.push((distance, number, difference));
        pb.inc(1);
    }
    pb.finish_with_message("Done");

    println!("{:>12} {:>14} {:>14}", "z [cm]", "Fresnel #", "rel. diff.");
    for (distance, number, difference) in rows {
        println!("{:>12.4e} {:>14.4e} {:>14.4e}", distance, number, difference);
    }
    Ok(())
}
