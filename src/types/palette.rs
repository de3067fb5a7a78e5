//! Palette parsing and nearest-colour quantization.
//!
//! A palette is written as colon-separated entries of comma-separated
//! decimal components: `R,G,B[,A]:R,G,B[,A]:...`. Parsing is lenient:
//! malformed entries are dropped, never reported as errors.

use std::fmt;

use tracing::debug;

use super::Colour;

/// Distance metric used when snapping a colour onto the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColourMetric {
    /// Squared Euclidean distance over the RGB channels.
    #[default]
    Rgb,
    /// Euclidean distance in CIE L*a*b*.
    Lab,
}

impl fmt::Display for ColourMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColourMetric::Rgb => write!(f, "rgb"),
            ColourMetric::Lab => write!(f, "lab"),
        }
    }
}

/// An ordered list of colours to quantize against.
///
/// An empty palette is valid and means "no quantization".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    colours: Vec<Colour>,
    metric: ColourMetric,
    /// L*a*b* coordinates of `colours`, filled only for `ColourMetric::Lab`.
    lab: Vec<[f32; 3]>,
}

impl Palette {
    /// Create a palette from colours using the RGB metric.
    pub fn new(colours: Vec<Colour>) -> Self {
        Self {
            colours,
            metric: ColourMetric::Rgb,
            lab: Vec::new(),
        }
    }

    /// Parse a palette specification.
    ///
    /// Entries with fewer than three components or a non-integer RGB
    /// component are skipped. Missing or non-integer alpha becomes 255.
    /// Components are clamped to 0-255.
    pub fn parse(spec: &str) -> Self {
        let colours = spec
            .split(':')
            .filter_map(|entry| {
                let colour = parse_entry(entry);
                if colour.is_none() && !entry.trim().is_empty() {
                    debug!(entry, "dropping malformed palette entry");
                }
                colour
            })
            .collect();

        Self::new(colours)
    }

    /// Switch the distance metric used by [`Palette::nearest`].
    pub fn with_metric(mut self, metric: ColourMetric) -> Self {
        self.metric = metric;
        self.lab = match metric {
            ColourMetric::Rgb => Vec::new(),
            ColourMetric::Lab => self.colours.iter().map(|&c| to_lab(c)).collect(),
        };
        self
    }

    /// The metric in use.
    pub fn metric(&self) -> ColourMetric {
        self.metric
    }

    /// The palette colours in specification order.
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    /// Get the number of colours.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Check if the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Find the palette entry closest to `colour`.
    ///
    /// Returns `colour` unchanged when the palette is empty. Ties go to the
    /// entry that appears first in the palette.
    pub fn nearest(&self, colour: Colour) -> Colour {
        if self.colours.is_empty() {
            return colour;
        }

        let best = match self.metric {
            ColourMetric::Rgb => {
                first_minimum(self.colours.iter().map(|&p| rgb_distance(colour, p)))
            }
            ColourMetric::Lab => {
                let target = to_lab(colour);
                first_minimum(self.lab.iter().map(|p| lab_distance(&target, p)))
            }
        };

        self.colours[best]
    }
}

/// Parse one `R,G,B[,A]` entry.
fn parse_entry(entry: &str) -> Option<Colour> {
    let tokens: Vec<&str> = entry.split(',').map(str::trim).collect();
    if tokens.len() < 3 {
        return None;
    }

    let r = parse_component(tokens[0])?;
    let g = parse_component(tokens[1])?;
    let b = parse_component(tokens[2])?;
    let a = tokens.get(3).and_then(|t| parse_component(t)).unwrap_or(255);

    Some(Colour::new(r, g, b, a))
}

fn parse_component(token: &str) -> Option<u8> {
    token
        .parse::<i64>()
        .ok()
        .map(|v| v.clamp(0, 255) as u8)
}

/// Index of the first smallest value. `values` must be non-empty.
fn first_minimum<T: PartialOrd>(values: impl Iterator<Item = T>) -> usize {
    let mut best_index = 0;
    let mut best: Option<T> = None;

    for (i, v) in values.enumerate() {
        let better = match &best {
            Some(b) => v < *b,
            None => true,
        };
        if better {
            best = Some(v);
            best_index = i;
        }
    }

    best_index
}

/// Squared Euclidean RGB distance. Alpha does not participate.
fn rgb_distance(a: Colour, b: Colour) -> u32 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;

    (dr * dr + dg * dg + db * db) as u32
}

fn lab_distance(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    let dl = a[0] - b[0];
    let da = a[1] - b[1];
    let db = a[2] - b[2];
    dl * dl + da * da + db * db
}

fn to_lab(colour: Colour) -> [f32; 3] {
    use palette::{IntoColor, Lab, Srgb};

    let rgb: Srgb<f32> = Srgb::new(colour.r, colour.g, colour.b).into_format();
    let lab: Lab = rgb.into_color();
    [lab.l, lab.a, lab.b]
}
