//! Interactive resolution of the simulation settings
//!
//! The [`Menu`] asks for the obstacle, its size, the optical parameters and
//! the propagation method. An empty answer keeps the value shown in the
//! question, an answer that is not a number is asked again.

use std::{
    fmt::Display,
    io::{self, BufRead, Write},
    str::FromStr,
};

use crate::{
    config::{ConfigError, Shape, SimulationConfig},
    Method,
};

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("failed to read or write the prompt")]
    Io(#[from] io::Error),
    #[error("invalid selection")]
    Config(#[from] ConfigError),
}
type Result<T> = std::result::Result<T, PromptError>;

/// Line oriented prompt over any input and output streams
pub struct Menu<R, W> {
    input: R,
    output: W,
}
impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
    /// Writes a line to the output
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }
    /// Reads one answer, `None` at the end of the input
    fn read_reply(&mut self) -> Result<Option<String>> {
        write!(self.output, "-> ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        writeln!(self.output)?;
        Ok(Some(line.trim().to_string()))
    }
    /// Asks `question` until the answer is empty or parses as a `T`
    pub fn ask<T>(&mut self, question: &str, default: T) -> Result<Option<T>>
    where
        T: FromStr + Display,
    {
        writeln!(self.output, "{} (default: {})", question, default)?;
        loop {
            match self.read_reply()? {
                None => return Ok(None),
                Some(reply) if reply.is_empty() => return Ok(Some(default)),
                Some(reply) => match reply.parse::<T>() {
                    Ok(value) => return Ok(Some(value)),
                    Err(_) => writeln!(self.output, "{:?} is not a valid value, try again", reply)?,
                },
            }
        }
    }
    /// Asks to pick one of `choices` by its number, the first choice is numbered `base`
    ///
    /// An empty answer picks the first choice.
    pub fn select<T: Copy>(
        &mut self,
        kind: &'static str,
        question: &str,
        choices: &[(&str, T)],
        base: usize,
    ) -> Result<Option<T>> {
        writeln!(self.output, "{}", question)?;
        for (i, (label, _)) in choices.iter().enumerate() {
            writeln!(self.output, "[{}] - {}", i + base, label)?;
        }
        let Some(reply) = self.read_reply()? else {
            return Ok(None);
        };
        if reply.is_empty() {
            return Ok(Some(choices[0].1));
        }
        reply
            .parse::<usize>()
            .ok()
            .and_then(|i| i.checked_sub(base))
            .and_then(|i| choices.get(i))
            .map(|(_, choice)| Some(*choice))
            .ok_or_else(|| {
                ConfigError::UnknownSelector {
                    kind,
                    value: reply.clone(),
                }
                .into()
            })
    }
    /// Walks through the questions, `None` if the input ends first
    ///
    /// The answers are applied on top of `config`.
    pub fn resolve(&mut self, config: SimulationConfig) -> Result<Option<SimulationConfig>> {
        macro_rules! answer {
            ($e:expr) => {
                match $e? {
                    Some(value) => value,
                    None => return Ok(None),
                }
            };
        }
        writeln!(self.output)?;
        writeln!(self.output, "### DIFFRACTION SIMULATOR ###")?;
        writeln!(self.output)?;
        let shape = answer!(self.select(
            "obstacle",
            "Select the shape of the obstacle: (default: Circle)",
            &[
                ("Circle", Shape::Circle),
                ("Square", Shape::Square),
                ("Image", Shape::Image),
            ],
            0,
        ));
        let mut config = config.shape(shape);
        if let Shape::Image = shape {
            let n = config.get_grid_size();
            let default = config.get_image().display().to_string();
            let path: String = answer!(self.ask(
                &format!("Image file name, the image must be {n}x{n} pixels:"),
                default,
            ));
            config = config.image(path);
        }
        let side = answer!(self.ask("Obstacle/sensor area side in cm:", config.get_side()));
        config = config.side(side);
        match shape {
            Shape::Circle => {
                let radius = answer!(self.ask("Circle radius in mm:", config.get_radius()));
                config = config.radius(radius);
            }
            Shape::Square => {
                let edge = answer!(self.ask("Square side in mm:", config.get_edge()));
                config = config.edge(edge);
            }
            Shape::Image => (),
        }
        let distance = answer!(self.ask(
            "Obstacle-sensor separation in cm:",
            config.get_distance()
        ));
        let wavelength = answer!(self.ask("Light wavelength in m:", config.get_wavelength()));
        let method = answer!(self.select(
            "method",
            "Choose the diffraction method: (default: Fresnel)",
            &[("Fresnel", Method::Fresnel), ("Fraunhofer", Method::Fraunhofer)],
            0,
        ));
        Ok(Some(
            config
                .distance(distance)
                .wavelength(wavelength)
                .method(method),
        ))
    }
}
