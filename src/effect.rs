//! Effects: the four ways tessera can restyle an image.
//!
//! Every effect starts from the decoded source and produces a new RGBA image
//! of the same size. Triangle effects composite through
//! [`Compositor`](crate::render::Compositor) and always wait for every
//! triangle before returning.

use std::fmt;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::debug;

use crate::error::Result;
use crate::render::{default_jobs, Canvas, CompositeStats, Compositor};
use crate::triangulate::{
    DelaunayMeshProvider, EdgeBounds, ExternalMeshProvider, MeshProvider, OffsetSigns,
    PointSampler, DEFAULT_SAMPLES,
};
use crate::types::Palette;

/// An image effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Overlapping random triangles with edges in `[5, 65)`.
    Random,
    /// A Delaunay mesh over uniformly scattered points.
    Uniform,
    /// Random triangles with fixed 60px offsets, giving thin streaks.
    Lines,
    /// Per-pixel palette quantization, no triangles.
    Palette,
}

impl Effect {
    pub fn is_triangulation(self) -> bool {
        !matches!(self, Effect::Palette)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Random => write!(f, "random triangulation"),
            Effect::Uniform => write!(f, "uniform triangulation"),
            Effect::Lines => write!(f, "lines"),
            Effect::Palette => write!(f, "palette"),
        }
    }
}

/// Where uniform mode gets its mesh from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MeshSource {
    /// In-process Bowyer-Watson triangulation.
    #[default]
    Delaunay,
    /// An external program that writes `triangles.json`, run in
    /// `working_dir` (or the current directory).
    External {
        program: PathBuf,
        args: Vec<String>,
        working_dir: Option<PathBuf>,
    },
}

/// Settings shared by all effects.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub palette: Palette,
    pub jobs: usize,
    pub seed: Option<u64>,
    /// Point count for uniform mode.
    pub samples: usize,
    pub signs: OffsetSigns,
    pub mesh: MeshSource,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            jobs: default_jobs(),
            seed: None,
            samples: DEFAULT_SAMPLES,
            signs: OffsetSigns::Random,
            mesh: MeshSource::Delaunay,
        }
    }
}

impl RenderOptions {
    fn mesh_provider(&self) -> Box<dyn MeshProvider> {
        match &self.mesh {
            MeshSource::Delaunay => {
                Box::new(DelaunayMeshProvider::new(self.samples).with_seed(self.seed))
            }
            MeshSource::External {
                program,
                args,
                working_dir,
            } => {
                let provider = ExternalMeshProvider::new(program)
                    .with_args(args.iter().cloned())
                    .with_samples(self.samples);
                Box::new(match working_dir {
                    Some(dir) => provider.with_working_dir(dir),
                    None => provider,
                })
            }
        }
    }

    fn sampler(&self, bounds: EdgeBounds) -> PointSampler {
        let sampler = match self.seed {
            Some(seed) => PointSampler::seeded(bounds, seed),
            None => PointSampler::new(bounds),
        };
        sampler.with_signs(self.signs)
    }
}

/// The result of running an effect.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub image: RgbaImage,
    /// Triangles composited (zero for the palette effect).
    pub triangles: usize,
    pub stats: CompositeStats,
}

/// Run `effect` over `source`, which was decoded from `source_path`.
pub fn render(
    effect: Effect,
    source_path: &Path,
    source: &RgbaImage,
    options: &RenderOptions,
) -> Result<Rendered> {
    debug!(%effect, jobs = options.jobs, palette = options.palette.len(), "rendering");

    match effect {
        Effect::Random => render_random(source, EdgeBounds::DEFAULT, options),
        Effect::Lines => render_random(source, EdgeBounds::LINES, options),
        Effect::Uniform => render_uniform(source_path, source, options),
        Effect::Palette => Ok(Rendered {
            image: quantize_image(source, &options.palette),
            triangles: 0,
            stats: CompositeStats::default(),
        }),
    }
}

/// Snap every pixel of `source` to `palette`.
pub fn quantize_image(source: &RgbaImage, palette: &Palette) -> RgbaImage {
    Canvas::quantized(source, palette).into_image()
}

fn render_random(
    source: &RgbaImage,
    bounds: EdgeBounds,
    options: &RenderOptions,
) -> Result<Rendered> {
    let (width, height) = source.dimensions();
    let triangles = options.sampler(bounds).sample(width, height);

    let compositor = Compositor::new(source, &options.palette).with_jobs(options.jobs);
    let (canvas, stats) = compositor.composite(Canvas::new(width, height), &triangles)?;

    Ok(Rendered {
        image: canvas.into_image(),
        triangles: triangles.len(),
        stats,
    })
}

fn render_uniform(
    source_path: &Path,
    source: &RgbaImage,
    options: &RenderOptions,
) -> Result<Rendered> {
    let provider = options.mesh_provider();
    let mesh = provider.mesh(source_path, source)?;
    let triangles = mesh.triangles()?;
    debug!(provider = provider.name(), triangles = triangles.len(), "mesh ready");

    // Areas the mesh misses keep the quantized source instead of going transparent.
    let canvas = Canvas::quantized(source, &options.palette);

    let compositor = Compositor::new(source, &options.palette).with_jobs(options.jobs);
    let (canvas, stats) = compositor.composite(canvas, &triangles)?;

    Ok(Rendered {
        image: canvas.into_image(),
        triangles: triangles.len(),
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;

    fn options() -> RenderOptions {
        RenderOptions {
            jobs: 2,
            seed: Some(17),
            samples: 50,
            ..RenderOptions::default()
        }
    }

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Colour::rgb((x * 255 / width) as u8, (y * 255 / height) as u8, 90).into()
        })
    }

    #[test]
    fn test_palette_effect_solid_red_to_blue() {
        let source = RgbaImage::from_pixel(2, 2, Colour::rgb(255, 0, 0).into());
        let options = RenderOptions {
            palette: Palette::parse("0,0,255"),
            ..options()
        };

        let rendered = render(Effect::Palette, Path::new("red.png"), &source, &options).unwrap();
        assert_eq!(rendered.triangles, 0);
        assert_eq!(rendered.image.dimensions(), (2, 2));
        assert!(rendered.image.pixels().all(|p| p.0 == [0, 0, 255, 255]));
    }

    #[test]
    fn test_random_effect_dimensions_and_coverage() {
        let source = gradient(100, 100);
        let rendered = render(Effect::Random, Path::new("g.png"), &source, &options()).unwrap();

        assert_eq!(rendered.image.dimensions(), (100, 100));
        assert_eq!(rendered.triangles, PointSampler::triangle_count(100, 100));
        assert_eq!(rendered.stats.triangles, rendered.triangles);

        // A stroke with a colour covered at least one in-image pixel.
        let stats = rendered.stats;
        assert!(stats.painted >= stats.triangles - stats.empty);
        assert!(stats.empty < stats.triangles / 4, "{} empty", stats.empty);
        assert!(stats.painted >= rendered.triangles);

        let opaque = rendered.image.pixels().filter(|p| p.0[3] != 0).count();
        assert!(opaque > 0 && opaque <= 100 * 100);
    }

    #[test]
    fn test_random_effect_is_reproducible_with_seed() {
        let source = gradient(40, 30);
        let a = render(Effect::Lines, Path::new("g.png"), &source, &options()).unwrap();
        let b = render(Effect::Lines, Path::new("g.png"), &source, &options()).unwrap();
        assert!(a.image == b.image);
    }

    #[test]
    fn test_uniform_effect_covers_every_pixel() {
        let source = gradient(48, 32);
        let palette = Palette::parse("0,0,0:255,255,255:200,40,90");
        let options = RenderOptions {
            palette: palette.clone(),
            ..options()
        };

        let rendered = render(Effect::Uniform, Path::new("g.png"), &source, &options).unwrap();
        assert_eq!(rendered.image.dimensions(), (48, 32));
        assert!(rendered.triangles > 0);

        for p in rendered.image.pixels() {
            let c = Colour::from(*p);
            assert!(palette.colours().contains(&c), "{} not in palette", c);
        }
    }

    #[test]
    fn test_effect_display() {
        assert_eq!(Effect::Random.to_string(), "random triangulation");
        assert!(Effect::Lines.is_triangulation());
        assert!(!Effect::Palette.is_triangulation());
    }
}
