//! Command-line interface.

use clap::Parser;
use std::path::PathBuf;

/// Paint onto an image with a hand-tracking controller.
///
/// Keys: Esc quits, `s` saves to DEST, `v` switches the background to the live
/// camera. Up/Down/Left/Right adjust the brush sliders.
#[derive(Parser, Debug)]
#[command(name = "hand-painter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Image to paint on
    #[arg(value_name = "SRC")]
    pub source: PathBuf,

    /// Where `s` saves the painting
    #[arg(value_name = "DEST")]
    pub destination: PathBuf,

    /// Config file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Recorded tracking session (JSON lines) to play back as the device
    #[arg(short, long)]
    pub replay: Option<PathBuf>,

    /// Camera device index used by `v` (overrides the config)
    #[arg(long)]
    pub camera_index: Option<u32>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
