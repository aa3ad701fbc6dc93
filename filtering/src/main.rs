use std::io;

use fourier_filtering::{apply_filter, menu, Filter, FilterKind};
use scalar_diffraction::{error_chain, loader::load_grayscale, prompt::Menu, Grid};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "fourier-filtering",
    about = "Applies a Fourier domain filter to a grayscale image"
)]
struct Opt {
    /// Image file
    #[structopt(short, long, default_value = "img/dog.jpg")]
    image: String,
    /// Filter: high-pass, low-pass, horizontal or vertical; the interactive menu is used if omitted
    #[structopt(short, long)]
    filter: Option<FilterKind>,
    /// Square instead of Gaussian high-pass and low-pass filters
    #[structopt(long)]
    square: bool,
    /// Removes the band instead of keeping it
    #[structopt(long)]
    negative: bool,
    /// Half-size of the square and band filters
    #[structopt(short, long)]
    size: Option<usize>,
    /// Dispersion of the Gaussian filters
    #[structopt(long, default_value = "10")]
    sigma: f64,
    /// Figure file name
    #[structopt(short, long, default_value = "filtering.png")]
    output: String,
}

fn filter_image(image: &str, filter: Filter, output: &str) -> anyhow::Result<()> {
    let image = load_grayscale(image)?;
    let mask = filter.mask(image.shape())?;
    println!("Applying {filter}...");
    let filtered = apply_filter(&image, &mask)?;
    println!("DONE!");
    present(&image, &mask, &filtered, &filter, output)
}

#[cfg(feature = "plot")]
fn present(
    image: &Grid,
    mask: &Grid,
    filtered: &Grid,
    filter: &Filter,
    output: &str,
) -> anyhow::Result<()> {
    use scalar_diffraction::view::Panel;
    let (rows, cols) = image.shape();
    let extent = [0., cols as f64, 0., rows as f64];
    let panel = |title: &str, grid: &Grid| {
        Panel::new(title, grid.clone(), extent).labels("column", "row")
    };
    scalar_diffraction::render::triptych(
        output,
        &filter.to_string(),
        [
            &panel("Image", image),
            &panel("Filter", mask),
            &panel("Filtered Image", filtered),
        ],
    )?;
    println!(" - figure saved to {output}");
    Ok(())
}
#[cfg(not(feature = "plot"))]
fn present(
    _image: &Grid,
    _mask: &Grid,
    filtered: &Grid,
    filter: &Filter,
    output: &str,
) -> anyhow::Result<()> {
    let (min, max) = filtered.extrema();
    println!(" - {filter}: filtered image in [{min:.3}, {max:.3}]");
    log::warn!("\"{}\" not rendered, enable the `plot` feature", output);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    if let Some(kind) = opt.filter {
        let filter = Filter::new(kind, opt.square, opt.negative, opt.size, opt.sigma);
        return filter_image(&opt.image, filter, &opt.output);
    }

    let stdin = io::stdin();
    let mut prompt = Menu::new(stdin.lock(), io::stdout());
    match menu::resolve(&mut prompt, &opt.image) {
        Ok(Some(selection)) => {
            if let Err(e) = filter_image(&selection.image, selection.filter, &opt.output) {
                eprintln!("{e:?}");
            }
        }
        Ok(None) => (),
        Err(e) => eprintln!("{}", error_chain(&e)),
    }
    Ok(())
}
