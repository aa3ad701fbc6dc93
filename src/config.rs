//! Simulation configuration
//!
//! [`SimulationConfig`] collects the user choices, starting from the defaults
//! of the interactive tool, and [`SimulationConfig::build`] validates them into
//! an immutable [`Simulation`].

use std::{
    env,
    f64::consts::PI,
    fmt,
    path::{Path, PathBuf},
    time::Instant,
};

use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    aperture::{self, MM_PER_CM},
    loader, propagation, Grid, Method, CM_PER_M,
};

/// Default sample plane side [cm]
pub const SIDE: f64 = 1.;
/// Default circle radius [mm]
pub const RADIUS: f64 = 0.5;
/// Default square edge [mm]
pub const EDGE: f64 = 1.;
/// Default wavelength [m]
pub const LDA: f64 = 600e-9;
/// Default obstacle to sensor distance [cm]
pub const Z: f64 = 100.;
/// Default obstacle image
pub const FNAME: &str = "img/atom.png";
/// Default number of samples along each side of the grid
pub const N: usize = 1000;
/// Default fraction of the diffraction pattern that is displayed
pub const ZOOM: f64 = 0.25;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a finite positive number, found {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("the grid size must be at least 1")]
    GridSize,
    #[error("the zoom must be in ]0,1], found {0}")]
    Zoom(f64),
    #[error("expected a {expected:?} mask, found {found:?}")]
    MaskShape {
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("propagation requires a square mask, found {0:?}")]
    NotSquare((usize, usize)),
    #[error("{len} samples do not fill a {shape:?} grid")]
    GridLength { len: usize, shape: (usize, usize) },
    #[error("unknown {kind} selection: {value:?}")]
    UnknownSelector { kind: &'static str, value: String },
}
type Result<T> = std::result::Result<T, ConfigError>;

fn positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0. {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

/// Optical setup shared by the mask generation and the propagation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpticalParameters {
    wavelength: f64,
    distance: f64,
    side: f64,
}
impl OpticalParameters {
    /// Validates the wavelength [m], the propagation distance [cm] and the sample plane side [cm]
    pub fn new(wavelength_m: f64, distance_cm: f64, side_cm: f64) -> Result<Self> {
        Ok(Self {
            wavelength: positive("wavelength", wavelength_m)?,
            distance: positive("distance", distance_cm)?,
            side: positive("side", side_cm)?,
        })
    }
    /// Wavelength [m]
    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }
    /// Obstacle to sensor distance [cm]
    pub fn distance(&self) -> f64 {
        self.distance
    }
    /// Obstacle to sensor distance [m]
    pub fn distance_m(&self) -> f64 {
        self.distance / CM_PER_M
    }
    /// Sample plane side [cm]
    pub fn side(&self) -> f64 {
        self.side
    }
    /// Wavenumber [rad/m]
    pub fn wavenumber(&self) -> f64 {
        2. * PI / self.wavelength
    }
    /// Intensity scaling factor `1/(λz)²` [m⁻⁴]
    pub fn intensity_scale(&self) -> f64 {
        (self.wavelength * self.distance_m()).powi(2).recip()
    }
    /// Fresnel number `a²/(λz)` of an aperture of half width `a` [cm]
    pub fn fresnel_number(&self, half_width_cm: f64) -> f64 {
        (half_width_cm / CM_PER_M).powi(2) / (self.wavelength * self.distance_m())
    }
}
impl fmt::Display for OpticalParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "λ={}m, z={}cm, side={}cm",
            self.wavelength, self.distance, self.side
        )
    }
}

/// Obstacle selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, EnumIter, Display)]
#[strum(ascii_case_insensitive)]
pub enum Shape {
    #[default]
    #[strum(to_string = "Circle")]
    Circle,
    #[strum(to_string = "Square", serialize = "rectangle")]
    Square,
    #[strum(to_string = "Image")]
    Image,
}

/// Obstacle and its size
#[derive(Debug, Clone, PartialEq)]
pub enum Obstacle {
    Circle { radius_mm: f64 },
    Square { edge_mm: f64 },
    Image { path: PathBuf },
}
impl Obstacle {
    pub fn shape(&self) -> Shape {
        match self {
            Obstacle::Circle { .. } => Shape::Circle,
            Obstacle::Square { .. } => Shape::Square,
            Obstacle::Image { .. } => Shape::Image,
        }
    }
    /// Half width of the obstacle [cm], if known before loading
    pub fn half_width_cm(&self) -> Option<f64> {
        match self {
            Obstacle::Circle { radius_mm } => Some(radius_mm / MM_PER_CM),
            Obstacle::Square { edge_mm } => Some(edge_mm / MM_PER_CM / 2.),
            Obstacle::Image { .. } => None,
        }
    }
}
impl fmt::Display for Obstacle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Obstacle::Circle { radius_mm } => write!(f, "circle of radius {radius_mm}mm"),
            Obstacle::Square { edge_mm } => write!(f, "square of edge {edge_mm}mm"),
            Obstacle::Image { path } => write!(f, "image {path:?}"),
        }
    }
}

/// Simulation settings builder
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    shape: Shape,
    side: f64,
    radius: f64,
    edge: f64,
    image: PathBuf,
    distance: f64,
    wavelength: f64,
    method: Method,
    grid_size: usize,
    zoom: f64,
}
impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            shape: Shape::default(),
            side: SIDE,
            radius: RADIUS,
            edge: EDGE,
            image: env::var("DIFFRACTION_IMAGE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(FNAME)),
            distance: Z,
            wavelength: LDA,
            method: Method::default(),
            grid_size: N,
            zoom: ZOOM,
        }
    }
}
impl SimulationConfig {
    pub fn shape(self, shape: Shape) -> Self {
        Self { shape, ..self }
    }
    /// Sample plane side [cm]
    pub fn side(self, side: f64) -> Self {
        Self { side, ..self }
    }
    /// Circle radius [mm]
    pub fn radius(self, radius: f64) -> Self {
        Self { radius, ..self }
    }
    /// Square edge [mm]
    pub fn edge(self, edge: f64) -> Self {
        Self { edge, ..self }
    }
    pub fn image<P: AsRef<Path>>(self, path: P) -> Self {
        Self {
            image: path.as_ref().to_path_buf(),
            ..self
        }
    }
    /// Obstacle to sensor distance [cm]
    pub fn distance(self, distance: f64) -> Self {
        Self { distance, ..self }
    }
    /// Wavelength [m]
    pub fn wavelength(self, wavelength: f64) -> Self {
        Self { wavelength, ..self }
    }
    pub fn method(self, method: Method) -> Self {
        Self { method, ..self }
    }
    pub fn grid_size(self, grid_size: usize) -> Self {
        Self { grid_size, ..self }
    }
    pub fn zoom(self, zoom: f64) -> Self {
        Self { zoom, ..self }
    }
    pub fn get_shape(&self) -> Shape {
        self.shape
    }
    pub fn get_side(&self) -> f64 {
        self.side
    }
    pub fn get_radius(&self) -> f64 {
        self.radius
    }
    pub fn get_edge(&self) -> f64 {
        self.edge
    }
    pub fn get_image(&self) -> &Path {
        self.image.as_path()
    }
    pub fn get_distance(&self) -> f64 {
        self.distance
    }
    pub fn get_wavelength(&self) -> f64 {
        self.wavelength
    }
    pub fn get_method(&self) -> Method {
        self.method
    }
    pub fn get_grid_size(&self) -> usize {
        self.grid_size
    }
    /// Validates the settings
    pub fn build(self) -> Result<Simulation> {
        let params = OpticalParameters::new(self.wavelength, self.distance, self.side)?;
        if self.grid_size == 0 {
            return Err(ConfigError::GridSize);
        }
        if !(self.zoom > 0. && self.zoom <= 1.) {
            return Err(ConfigError::Zoom(self.zoom));
        }
        let obstacle = match self.shape {
            Shape::Circle => Obstacle::Circle {
                radius_mm: positive("radius", self.radius)?,
            },
            Shape::Square => Obstacle::Square {
                edge_mm: positive("edge", self.edge)?,
            },
            Shape::Image => Obstacle::Image { path: self.image },
        };
        Ok(Simulation {
            obstacle,
            method: self.method,
            params,
            grid_size: self.grid_size,
            zoom: self.zoom,
        })
    }
}

/// Validated and immutable simulation settings
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    obstacle: Obstacle,
    method: Method,
    params: OpticalParameters,
    grid_size: usize,
    zoom: f64,
}
impl Simulation {
    pub fn obstacle(&self) -> &Obstacle {
        &self.obstacle
    }
    pub fn method(&self) -> Method {
        self.method
    }
    pub fn params(&self) -> &OpticalParameters {
        &self.params
    }
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }
    pub fn zoom(&self) -> f64 {
        self.zoom
    }
    /// Obstacle transmittance mask
    pub fn mask(&self) -> crate::Result<Grid> {
        let n = self.grid_size;
        let side = self.params.side();
        Ok(match &self.obstacle {
            Obstacle::Circle { radius_mm } => aperture::circle(*radius_mm, side, n),
            Obstacle::Square { edge_mm } => aperture::rectangle(*edge_mm, side, n),
            Obstacle::Image { path } => {
                aperture::from_grayscale(loader::load_grayscale(path)?, n)?
            }
        })
    }
    /// Generates the mask and propagates it to the sensor
    pub fn run(&self) -> crate::Result<Run> {
        log::info!(
            "{} with the {} approximation: {}",
            self.obstacle,
            self.method,
            self.params
        );
        if let Some(a) = self.obstacle.half_width_cm() {
            log::debug!("Fresnel number: {:.3}", self.params.fresnel_number(a));
        }
        let now = Instant::now();
        let mask = self.mask()?;
        log::info!("... mask generated in {:}ms", now.elapsed().as_millis());
        let intensity = propagation::propagate(&mask, self.method, &self.params)?;
        Ok(Run {
            obstacle: self.obstacle.clone(),
            method: self.method,
            params: self.params,
            mask,
            intensity,
        })
    }
}

/// Outcome of a simulation: the obstacle mask and the sensor intensity
#[derive(Debug, Clone)]
pub struct Run {
    pub obstacle: Obstacle,
    pub method: Method,
    pub params: OpticalParameters,
    pub mask: Grid,
    pub intensity: Grid,
}
