//! Interactive selection of the image and of the filter

use std::io::{BufRead, Write};

use scalar_diffraction::prompt::{Menu, PromptError};

use crate::{Filter, FilterKind, N_SPACING, P_SPACING, SIGMA};

/// Image file and filter picked from the menu
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub image: String,
    pub filter: Filter,
}

/// Asks for the image and the filter, `None` if the input ends first
pub fn resolve<R: BufRead, W: Write>(
    menu: &mut Menu<R, W>,
    image: &str,
) -> Result<Option<Selection>, PromptError> {
    macro_rules! answer {
        ($e:expr) => {
            match $e? {
                Some(value) => value,
                None => return Ok(None),
            }
        };
    }
    menu.say("")?;
    menu.say("### FOURIER TRANSFORM FILTERING ###")?;
    menu.say("")?;
    let image: String = answer!(menu.ask("Please, input the image file:", image.to_string()));
    let kind = answer!(menu.select(
        "filter",
        "Next, select the filter to apply: (default: High-pass)",
        &[
            ("High-pass", FilterKind::HighPass),
            ("Low-pass", FilterKind::LowPass),
            ("Horizontal", FilterKind::Horizontal),
            ("Vertical", FilterKind::Vertical),
        ],
        1,
    ));
    let filter = match kind {
        FilterKind::HighPass | FilterKind::LowPass => {
            let square = answer!(menu.select(
                "filter type",
                "Now select the type of filter: (default: Gaussian)",
                &[("Gaussian", false), ("Square", true)],
                1,
            ));
            if square {
                let default = if kind == FilterKind::HighPass {
                    N_SPACING
                } else {
                    P_SPACING
                };
                let size = answer!(menu.ask("Filter size?", default));
                Filter::new(kind, true, false, Some(size), SIGMA)
            } else {
                let sigma = answer!(menu.ask("Dispersion value sigma?", SIGMA));
                Filter::new(kind, false, false, None, sigma)
            }
        }
        FilterKind::Horizontal | FilterKind::Vertical => {
            let direction = if kind == FilterKind::Horizontal {
                "horizontal"
            } else {
                "vertical"
            };
            let retains = format!("Positive (retains {direction} frequencies)");
            let removes = format!("Negative (removes {direction} frequencies)");
            let negative = answer!(menu.select(
                "filter type",
                "Now select the type of filter: (default: Positive)",
                &[(retains.as_str(), false), (removes.as_str(), true)],
                1,
            ));
            let default = if negative { N_SPACING } else { P_SPACING };
            let size = answer!(menu.ask("Filter width?", default));
            Filter::new(kind, false, negative, Some(size), SIGMA)
        }
    };
    Ok(Some(Selection { image, filter }))
}

#[cfg(test)]
mod tests {
    use std::{error::Error, io::Cursor};

    use scalar_diffraction::config::ConfigError;

    use super::*;
    use crate::SRC;

    fn run(input: &str) -> Result<Option<Selection>, PromptError> {
        let mut menu = Menu::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        resolve(&mut menu, SRC)
    }

    #[test]
    fn defaults_to_gaussian_high_pass() -> Result<(), Box<dyn Error>> {
        let selection = run("\n\n\n\n")?.ok_or("input ended")?;
        assert_eq!(selection.image, SRC);
        assert_eq!(
            selection.filter,
            Filter::Gaussian {
                sigma: SIGMA,
                negative: true
            }
        );
        Ok(())
    }

    #[test]
    fn square_low_pass() -> Result<(), Box<dyn Error>> {
        let selection = run("img/cat.png\n2\n2\n\n")?.ok_or("input ended")?;
        assert_eq!(selection.image, "img/cat.png");
        assert_eq!(selection.filter, Filter::LowPass { size: P_SPACING });
        Ok(())
    }

    #[test]
    fn negative_vertical_band() -> Result<(), Box<dyn Error>> {
        let selection = run("\n4\n2\n7\n")?.ok_or("input ended")?;
        assert_eq!(
            selection.filter,
            Filter::Vertical {
                size: 7,
                negative: true
            }
        );
        let selection = run("\n3\n\n\n")?.ok_or("input ended")?;
        assert_eq!(
            selection.filter,
            Filter::Horizontal {
                size: P_SPACING,
                negative: false
            }
        );
        Ok(())
    }

    #[test]
    fn unknown_filter() {
        assert!(matches!(
            run("\n5\n"),
            Err(PromptError::Config(ConfigError::UnknownSelector {
                kind: "filter",
                ..
            }))
        ));
        assert!(matches!(
            run("\n0\n"),
            Err(PromptError::Config(ConfigError::UnknownSelector { .. }))
        ));
    }

    #[test]
    fn end_of_input() -> Result<(), Box<dyn Error>> {
        assert!(run("")?.is_none());
        assert!(run("\n1\n")?.is_none());
        Ok(())
    }
}
