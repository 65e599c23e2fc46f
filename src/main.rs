use std::path::PathBuf;

use clap::Parser;
use gasket::{GasketError, Options, Viewer};

/// Interactive Apollonian gasket explorer.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// TOML options file; defaults apply when absent.
    #[arg(long)]
    options: Option<PathBuf>,
    /// Image used for texture coloring.
    #[arg(long)]
    texture: Option<PathBuf>,
    /// Control record to load at start-up and to save into.
    #[arg(long)]
    control: Option<PathBuf>,
    /// Start in side-by-side stereo.
    #[arg(long)]
    stereo: bool,
}

fn run(cli: Cli) -> Result<(), GasketError> {
    let options = match cli.options.as_deref() {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };

    let mut builder = Viewer::builder()
        .with_options(options)
        .with_stereo(cli.stereo);
    if let Some(path) = cli.texture {
        builder = builder.with_texture(path);
    }
    if let Some(path) = cli.control {
        builder = builder.with_control(path);
    }
    builder.build().run()
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
