//! CLI argument parsing for makeupify-tui.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "makeupify-tui")]
#[command(
    about = "Makeupify terminal wizard - typically invoked via 'makeupify' command",
    version
)]
pub struct Cli {
    /// Photo to start with (skips the upload step)
    pub image: Option<PathBuf>,

    /// Config file (defaults to ~/.config/makeupify/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the generation model
    #[arg(long)]
    pub model: Option<String>,

    /// Directory downloads are written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Enable debug logging (logs to /tmp/makeupify-tui.log)
    #[arg(short, long)]
    pub debug: bool,
}
