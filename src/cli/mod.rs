pub mod run;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::effect::{Effect, MeshSource, RenderOptions};
use crate::render::default_jobs;
use crate::triangulate::{OffsetSigns, DEFAULT_SAMPLES};
use crate::types::{ColourMetric, Palette};

pub use run::run;

/// Flags that are spelled with a single dash but more than one letter.
const MULTI_LETTER_FLAGS: [&str; 3] = ["tr", "tu", "cp"];

/// tessera - Low-poly triangle mosaics with palette quantization
#[derive(Parser, Debug)]
#[command(name = "tessera")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Source image
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Output PNG path
    #[arg(short = 'o', long = "output", default_value = "output.png")]
    pub output: PathBuf,

    /// Random triangulation with edges between 5 and 65 pixels
    #[arg(long = "random", visible_alias = "tr")]
    pub random: bool,

    /// Uniform Delaunay triangulation
    #[arg(long = "uniform", visible_alias = "tu")]
    pub uniform: bool,

    /// Random triangulation with fixed 60 pixel edges (streaks)
    #[arg(short = 'l', long = "lines")]
    pub lines: bool,

    /// Colour palette, e.g. 255,255,255:0,0,0:10,10,10,128
    #[arg(long = "palette", visible_alias = "cp", value_name = "SPEC")]
    pub palette: Option<String>,

    /// Distance metric for palette matching
    #[arg(long, value_enum, default_value_t = ColourMetric::Rgb)]
    pub metric: ColourMetric,

    /// Seed for reproducible triangles
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (defaults to available parallelism)
    #[arg(long, short = 'j')]
    pub jobs: Option<usize>,

    /// Points to triangulate in uniform mode
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    pub samples: usize,

    /// External program that writes triangles.json for uniform mode
    #[arg(long, value_name = "PROGRAM")]
    pub mesh_command: Option<PathBuf>,

    /// Argument passed to the mesh command (repeatable)
    #[arg(long = "mesh-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub mesh_args: Vec<String>,

    /// Always offset triangle vertices up and to the left
    #[arg(long)]
    pub legacy_offsets: bool,

    /// Only print errors
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl Cli {
    /// The palette spec, treating an empty string as absent.
    pub fn palette_spec(&self) -> Option<&str> {
        self.palette.as_deref().filter(|s| !s.is_empty())
    }

    /// Effects to run, in order.
    ///
    /// The palette effect only runs on its own; combined with a
    /// triangulation the palette is applied to the triangle colours instead.
    pub fn effects(&self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.random {
            effects.push(Effect::Random);
        }
        if self.uniform {
            effects.push(Effect::Uniform);
        }
        if self.lines {
            effects.push(Effect::Lines);
        }
        if effects.is_empty() && self.palette_spec().is_some() {
            effects.push(Effect::Palette);
        }
        effects
    }

    pub fn render_options(&self) -> RenderOptions {
        let palette = self
            .palette_spec()
            .map(Palette::parse)
            .unwrap_or_default()
            .with_metric(self.metric);

        let mesh = match &self.mesh_command {
            Some(program) => MeshSource::External {
                program: program.clone(),
                args: self.mesh_args.clone(),
                working_dir: None,
            },
            None => MeshSource::Delaunay,
        };

        RenderOptions {
            palette,
            jobs: self.jobs.unwrap_or_else(default_jobs).max(1),
            seed: self.seed,
            samples: self.samples,
            signs: if self.legacy_offsets {
                OffsetSigns::AlwaysNegative
            } else {
                OffsetSigns::Random
            },
            mesh,
        }
    }
}

/// Rewrite `-tr`, `-tu` and `-cp` to their double-dash form so clap does not
/// read them as bundled short flags. Arguments after `--` are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for arg in args {
        let arg: OsString = arg.into();
        if passthrough {
            out.push(arg);
            continue;
        }

        let rewritten = arg.to_str().and_then(|s| {
            if s == "--" {
                return None;
            }
            let rest = s.strip_prefix('-').filter(|r| !r.starts_with('-'))?;
            let name = rest.split('=').next().unwrap_or(rest);
            MULTI_LETTER_FLAGS
                .contains(&name)
                .then(|| OsString::from(format!("-{}", s)))
        });

        if arg == "--" {
            passthrough = true;
        }
        out.push(rewritten.unwrap_or(arg));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(normalize_args(args.iter().copied()))
    }

    #[test]
    fn test_normalize_args() {
        let args = normalize_args(["tessera", "-tr", "-tu", "-cp=1,2,3", "-l", "-f", "a.png", "--cp", "x"]);
        assert_eq!(
            args,
            vec!["tessera", "--tr", "--tu", "--cp=1,2,3", "-l", "-f", "a.png", "--cp", "x"]
                .into_iter()
                .map(OsString::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_normalize_stops_at_double_dash() {
        let args = normalize_args(["tessera", "--", "-tr"]);
        assert_eq!(args[2], OsString::from("-tr"));
    }

    #[test]
    fn test_go_style_flags() {
        let cli = parse(&["tessera", "-f", "in.png", "-tr", "-cp", "255,0,0:0,0,255"]);
        assert_eq!(cli.file, Some(PathBuf::from("in.png")));
        assert_eq!(cli.output, PathBuf::from("output.png"));
        assert!(cli.random);
        assert!(!cli.uniform);
        assert_eq!(cli.effects(), vec![Effect::Random]);

        let options = cli.render_options();
        assert_eq!(
            options.palette.colours(),
            &[Colour::rgb(255, 0, 0), Colour::rgb(0, 0, 255)]
        );
    }

    #[test]
    fn test_long_flags() {
        let cli = parse(&[
            "tessera", "--file", "in.png", "--uniform", "--lines", "-o", "out.png", "--seed", "3",
            "--jobs", "2",
        ]);
        assert_eq!(cli.effects(), vec![Effect::Uniform, Effect::Lines]);
        assert_eq!(cli.output, PathBuf::from("out.png"));

        let options = cli.render_options();
        assert_eq!(options.seed, Some(3));
        assert_eq!(options.jobs, 2);
        assert_eq!(options.mesh, MeshSource::Delaunay);
    }

    #[test]
    fn test_palette_alone_selects_palette_effect() {
        let cli = parse(&["tessera", "-f", "in.png", "-cp", "0,0,255"]);
        assert_eq!(cli.effects(), vec![Effect::Palette]);
    }

    #[test]
    fn test_empty_palette_is_no_effect() {
        let cli = parse(&["tessera", "-f", "in.png", "-cp", ""]);
        assert!(cli.effects().is_empty());
        assert!(cli.render_options().palette.is_empty());
    }

    #[test]
    fn test_mesh_command() {
        let cli = parse(&[
            "tessera", "-f", "in.png", "-tu", "--mesh-command", "python3", "--mesh-arg",
            "effects/main.py", "--legacy-offsets",
        ]);
        let options = cli.render_options();
        assert_eq!(
            options.mesh,
            MeshSource::External {
                program: PathBuf::from("python3"),
                args: vec!["effects/main.py".to_string()],
                working_dir: None,
            }
        );
        assert_eq!(options.signs, OffsetSigns::AlwaysNegative);
    }

    #[test]
    fn test_quiet_flag() {
        assert!(parse(&["tessera", "-q", "-f", "in.png", "-l"]).quiet);
        assert!(!parse(&["tessera", "-f", "in.png", "-l"]).quiet);
    }

    #[test]
    fn test_metric_flag() {
        let cli = parse(&["tessera", "-f", "in.png", "-cp", "0,0,0", "--metric", "lab"]);
        assert_eq!(cli.render_options().palette.metric(), ColourMetric::Lab);
    }
}
