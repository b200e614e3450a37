//! ucs - CAM02-UCS color appearance CLI
//!
//! Encode display RGB to CAM02-UCS, decode back, measure color differences
//! and convert between hue angle and hue composition.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use ucs_core::{
    Adaptation, Jab, Jmh, Rgb, Surround, ViewingConditions, composition_to_hue_batch, delta_e,
    hue_to_composition_batch, invert, jab_to_jmh, jmh_to_jab, srgb_to_ucs,
};

#[derive(Parser)]
#[command(name = "ucs")]
#[command(author, version, about = "CIECAM02 / CAM02-UCS color appearance tool")]
#[command(long_about = "
Forward and inverse CAM02-UCS transforms for gamma-2.2 display RGB.

Examples:
  ucs encode 0.2 0.4 0.6                # RGB → J' a' b'
  ucs encode --u8 255 128 0             # 8-bit input
  ucs decode 43.2 -10.5 -24.0 --bounded # J' a' b' → in-gamut RGB
  ucs delta 50 0 0 52 1 -1              # Distance between two Jab colors
  ucs jmh 50 3 4                        # Jab → JMh
  ucs hue 20.14 90 200                  # Hue angle → composition
  ucs --surround dim --white 80 encode 1 1 1
  ucs --conditions viewing.json conditions
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    conditions: ConditionsArgs,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads for batch work (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Args)]
struct ConditionsArgs {
    /// JSON file with viewing conditions
    #[arg(long, global = true, conflicts_with_all = ["white", "adapting", "background", "surround"])]
    conditions: Option<PathBuf>,

    /// Luminance of the reference white (cd/m²)
    #[arg(long, global = true)]
    white: Option<f64>,

    /// Adapting luminance L_A (default: white / 5)
    #[arg(long, global = true)]
    adapting: Option<f64>,

    /// Background luminance Y_b (default: white / 5)
    #[arg(long, global = true)]
    background: Option<f64>,

    /// Surround: average, dim or dark
    #[arg(long, global = true)]
    surround: Option<String>,

    /// Use the CIECAM02 degree of adaptation instead of full discounting
    #[arg(long, global = true)]
    partial_adaptation: bool,
}

impl ConditionsArgs {
    fn resolve(&self) -> Result<ViewingConditions> {
        let vc = if let Some(path) = &self.conditions {
            ViewingConditions::from_json_file(path)
                .with_context(|| format!("Failed to load conditions from {}", path.display()))?
        } else {
            let y_w = self.white.unwrap_or(ViewingConditions::DEFAULT.y_w());
            let surround = match &self.surround {
                Some(name) => name.parse::<Surround>()?,
                None => Surround::Average,
            };
            ViewingConditions::new(
                y_w,
                self.adapting.unwrap_or(y_w / 5.0),
                self.background.unwrap_or(y_w / 5.0),
                surround,
            )
            .context("Invalid viewing conditions")?
        };
        Ok(if self.partial_adaptation {
            vc.with_adaptation(Adaptation::Partial)
        } else {
            vc
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert RGB to CAM02-UCS J' a' b'
    #[command(visible_alias = "e")]
    Encode(EncodeArgs),

    /// Approximate RGB for a CAM02-UCS color
    #[command(visible_alias = "d")]
    Decode(DecodeArgs),

    /// Distance between two CAM02-UCS colors
    Delta(DeltaArgs),

    /// Convert J' a' b' to J' M' h
    Jmh(TripleArgs),

    /// Convert J' M' h to J' a' b'
    Jab(TripleArgs),

    /// Hue angle(s) h → hue composition H
    Hue(ValuesArgs),

    /// Hue composition(s) H → hue angle h
    Composition(ValuesArgs),

    /// Print the effective viewing conditions as JSON
    Conditions,
}

#[derive(Args)]
struct EncodeArgs {
    /// R G B
    #[arg(num_args = 3, required = true, allow_negative_numbers = true)]
    rgb: Vec<f64>,

    /// Read channels as 0-255
    #[arg(long)]
    u8: bool,
}

#[derive(Args)]
struct DecodeArgs {
    /// J' a' b'
    #[arg(num_args = 3, required = true, allow_negative_numbers = true)]
    jab: Vec<f64>,

    /// Restrict the result to the sRGB gamut
    #[arg(short, long)]
    bounded: bool,
}

#[derive(Args)]
struct DeltaArgs {
    /// J' a' b' of the first and second color
    #[arg(num_args = 6, required = true, allow_negative_numbers = true)]
    values: Vec<f64>,
}

#[derive(Args)]
struct TripleArgs {
    #[arg(num_args = 3, required = true, allow_negative_numbers = true)]
    values: Vec<f64>,
}

#[derive(Args)]
struct ValuesArgs {
    #[arg(required = true, allow_negative_numbers = true)]
    values: Vec<f64>,
}

fn triple(values: &[f64]) -> Result<[f64; 3]> {
    match values {
        [a, b, c] => Ok([*a, *b, *c]),
        _ => bail!("Expected 3 values, got {}", values.len()),
    }
}

fn channel_u8(v: f64) -> Result<u8> {
    if v.fract() != 0.0 || !(0.0..=255.0).contains(&v) {
        bail!("8-bit channels must be integers in 0-255, got {}", v);
    }
    Ok(v as u8)
}

fn print_triple(label: &str, v: [f64; 3]) {
    println!("{}: {:.6} {:.6} {:.6}", label, v[0], v[1], v[2]);
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let vc = cli.conditions.resolve()?;
    debug!(conditions = %vc, "Resolved viewing conditions");

    match cli.command {
        Commands::Encode(args) => {
            let [r, g, b] = triple(&args.rgb)?;
            let rgb = if args.u8 {
                Rgb::from_u8(channel_u8(r)?, channel_u8(g)?, channel_u8(b)?)
            } else {
                Rgb::new(r, g, b)
            };
            let jab = srgb_to_ucs(rgb, &vc);
            print_triple("Jab", jab.to_array());
        }
        Commands::Decode(args) => {
            let target = Jab::from_array(triple(&args.jab)?);
            let inv = invert(target, &vc, args.bounded);
            debug!(
                iterations = inv.iterations,
                termination = ?inv.termination,
                "Inversion finished"
            );
            print_triple("RGB", inv.rgb.to_array());
            println!("residual: {:.6}", inv.residual());
            if !inv.rgb.is_in_gamut() {
                println!("out of gamut (use --bounded for an in-gamut approximation)");
            }
        }
        Commands::Delta(args) => {
            let a = Jab::from_array(triple(&args.values[..3])?);
            let b = Jab::from_array(triple(&args.values[3..])?);
            println!("{:.6}", delta_e(a, b));
        }
        Commands::Jmh(args) => {
            let jmh = jab_to_jmh(Jab::from_array(triple(&args.values)?));
            print_triple("JMh", jmh.to_array());
        }
        Commands::Jab(args) => {
            let jab = jmh_to_jab(Jmh::from_array(triple(&args.values)?));
            print_triple("Jab", jab.to_array());
        }
        Commands::Hue(args) => {
            for (h, c) in args.values.iter().zip(hue_to_composition_batch(&args.values)) {
                println!("h={:.4} H={:.4}", h, c);
            }
        }
        Commands::Composition(args) => {
            for (c, h) in args.values.iter().zip(composition_to_hue_batch(&args.values)) {
                println!("H={:.4} h={:.4}", c, h);
            }
        }
        Commands::Conditions => {
            println!("{}", vc.to_json()?);
        }
    }

    Ok(())
}
