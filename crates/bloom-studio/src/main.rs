mod app;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use bloom_engine::coords::{ColorRgba, Viewport};
use bloom_engine::field::{FieldConfig, DEFAULT_SURFACE, DEFAULT_WIND};
use bloom_engine::logging::{init_logging, LoggingConfig};
use bloom_flora::FlowerKind;

use app::Studio;

#[derive(Parser, Debug)]
#[command(name = "bloom-studio")]
#[command(about = "Animated procedural flower fields")]
struct Args {
    /// Experience id or flower name; unknown ids show the default flower.
    #[arg(long, default_value = "default")]
    experience: String,

    #[arg(long, default_value_t = DEFAULT_SURFACE.width)]
    width: f32,

    #[arg(long, default_value_t = DEFAULT_SURFACE.height)]
    height: f32,

    /// Sway strength; 0 keeps the field still.
    #[arg(long, default_value_t = DEFAULT_WIND)]
    wind: f32,

    /// TrueType/OpenType font used for the glyph atlas.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Reproduce a field exactly.
    #[arg(long)]
    seed: Option<u64>,

    /// env_logger filter, e.g. "debug" or "bloom_engine=trace".
    #[arg(long)]
    log: Option<String>,

    /// Clear to transparent instead of the night backdrop.
    #[arg(long, default_value_t = false)]
    transparent: bool,

    /// Print the known flowers and exit.
    #[arg(long, default_value_t = false)]
    list: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging = LoggingConfig::default();
    if let Some(filter) = &args.log {
        logging = logging.with_filter(filter.clone());
    }
    init_logging(logging);

    if args.list {
        for kind in FlowerKind::ALL {
            println!("{}", kind.name());
        }
        return Ok(());
    }

    let field = FieldConfig::default()
        .with_experience(args.experience)
        .with_wind(args.wind)
        .with_seed(args.seed);

    let clear = if args.transparent { ColorRgba::transparent() } else { ColorRgba::night() };

    Studio::new()
        .title("bloom")
        .clear(clear)
        .size(Viewport::new(args.width, args.height))
        .font(args.font)
        .field(field)
        .run()
}
