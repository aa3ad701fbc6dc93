use std::io::{self, Write};

use scalar_diffraction::{
    config::{Run, Shape, SimulationConfig},
    error_chain,
    prompt::{Menu, PromptError},
    view::PatternView,
    Method,
};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "diffraction",
    about = "Diffraction pattern of an obstacle with the Fresnel or the Fraunhofer approximation"
)]
struct Opt {
    /// Obstacle shape: circle, square or image; the interactive menu is used if omitted
    #[structopt(short, long)]
    shape: Option<Shape>,
    /// Circle radius [mm]
    #[structopt(short, long)]
    radius: Option<f64>,
    /// Square edge [mm]
    #[structopt(short, long)]
    edge: Option<f64>,
    /// Obstacle image file, it must be N x N pixels
    #[structopt(short, long)]
    image: Option<String>,
    /// Obstacle/sensor area side [cm]
    #[structopt(long)]
    side: Option<f64>,
    /// Obstacle to sensor distance [cm]
    #[structopt(short = "z", long)]
    distance: Option<f64>,
    /// Light wavelength [m]
    #[structopt(short = "l", long)]
    wavelength: Option<f64>,
    /// Diffraction method: fresnel or fraunhofer
    #[structopt(short, long)]
    method: Option<Method>,
    /// Number of samples along each side of the grid
    #[structopt(short = "n", long)]
    grid_size: Option<usize>,
    /// Fraction of the diffraction pattern to display
    #[structopt(long)]
    zoom: Option<f64>,
    /// Figure file name
    #[structopt(short, long, default_value = "diffraction.png")]
    output: String,
    /// Use the interactive menu
    #[structopt(long)]
    interactive: bool,
}
impl Opt {
    fn config(&self) -> SimulationConfig {
        let mut config = SimulationConfig::default();
        if let Some(arg) = self.shape {
            config = config.shape(arg);
        }
        if let Some(arg) = self.radius {
            config = config.radius(arg);
        }
        if let Some(arg) = self.edge {
            config = config.edge(arg);
        }
        if let Some(arg) = &self.image {
            config = config.image(arg);
        }
        if let Some(arg) = self.side {
            config = config.side(arg);
        }
        if let Some(arg) = self.distance {
            config = config.distance(arg);
        }
        if let Some(arg) = self.wavelength {
            config = config.wavelength(arg);
        }
        if let Some(arg) = self.method {
            config = config.method(arg);
        }
        if let Some(arg) = self.grid_size {
            config = config.grid_size(arg);
        }
        if let Some(arg) = self.zoom {
            config = config.zoom(arg);
        }
        config
    }
}

fn present(run: &Run, zoom: f64, output: &str) -> anyhow::Result<()> {
    let (_, peak) = run.intensity.extrema();
    println!("{} with the {} approximation", run.obstacle, run.method);
    println!(" - {}", run.params);
    println!(
        " - {} transmitting cells, peak intensity {:.6e} at {:?}",
        run.mask.n_set(),
        peak,
        run.intensity.argmax().unwrap_or_default()
    );
    let view = PatternView::new(run, zoom);
    #[cfg(feature = "plot")]
    {
        scalar_diffraction::render::pattern_view(output, &view)?;
        println!(" - figure saved to {output}");
    }
    #[cfg(not(feature = "plot"))]
    log::warn!(
        "\"{}\" not rendered ({}), enable the `plot` feature",
        output,
        view.caption
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();
    let config = opt.config();

    if !opt.interactive && opt.shape.is_some() {
        let sim = config.build()?;
        let run = sim.run()?;
        return present(&run, sim.zoom(), &opt.output);
    }

    let stdin = io::stdin();
    let mut menu = Menu::new(stdin.lock(), io::stdout());
    loop {
        let cycle = match menu.resolve(config.clone()) {
            Ok(Some(cycle)) => cycle,
            Ok(None) => break,
            Err(PromptError::Io(e)) => return Err(e.into()),
            Err(e) => {
                eprintln!("{}", error_chain(&e));
                continue;
            }
        };
        let outcome = cycle
            .build()
            .map_err(scalar_diffraction::Error::from)
            .and_then(|sim| {
                println!("Using the {} approximation...", sim.method());
                sim.run().map(|run| (run, sim.zoom()))
            });
        match outcome {
            Ok((run, zoom)) => {
                println!("DONE!");
                if let Err(e) = present(&run, zoom, &opt.output) {
                    eprintln!("{e:?}");
                }
            }
            Err(e) => eprintln!("{}", error_chain(&e)),
        }
        io::stdout().flush()?;
    }
    Ok(())
}
