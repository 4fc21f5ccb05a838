//! Makeupify CLI
//!
//! Unified entry point for Makeupify. Provides:
//! - Default: Start the terminal wizard
//! - Subcommands for one-shot generation and inspection

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use makeupify_core::acquire;
use makeupify_core::catalog::{self, QUICK_TAGS};
use makeupify_core::config::{Config, Directories};
use makeupify_core::generation::GeminiClient;
use makeupify_core::{Gender, MakeupMethod, PresetCategory, WizardController};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Find a binary, preferring the dev build next to this executable
fn find_binary(name: &str) -> PathBuf {
    if let Ok(exe) = std::env::current_exe()
        && let Some(dir) = exe.parent()
    {
        let dev_binary = dir.join(name);
        if dev_binary.exists() {
            return dev_binary;
        }
    }
    // Fall back to PATH lookup
    PathBuf::from(name)
}

/// Run a binary in the foreground with `args`, bailing on failure
fn run_foreground(name: &str, args: &[std::ffi::OsString]) -> Result<()> {
    let binary = find_binary(name);
    let status = Command::new(&binary)
        .args(args)
        .status()
        .with_context(|| format!("Failed to start {}. Is it installed?", binary.display()))?;
    if !status.success() {
        bail!("{name} exited with status: {status}");
    }
    Ok(())
}

/// Makeupify CLI
#[derive(Parser)]
#[command(name = "makeupify")]
#[command(about = "Makeupify - AI makeup makeovers from your terminal")]
#[command(version)]
#[command(after_help = "\
Examples:
  makeupify                                   Start the terminal wizard
  makeupify tui ~/Pictures/me.jpg             Start the wizard with a photo loaded
  makeupify presets --gender male             List looks available for men
  makeupify generate --image me.jpg --gender female --preset glam
  makeupify generate --image me.jpg --gender female --prompt \"red lips, winged liner\"
  makeupify generate --image me.jpg --gender female --reference look.png --out after.jpg
  makeupify config                            Show config paths and effective settings
  makeupify config --init                     Write a default config file

The generation credential is read from GEMINI_API_KEY (or GOOGLE_API_KEY),
or from generation.apiKey in the config file.
")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug, Default)]
struct GlobalArgs {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the generation model
    #[arg(long, global = true)]
    model: Option<String>,

    /// Directory downloads are saved to
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal wizard (default)
    Tui {
        /// Photo to start with
        image: Option<PathBuf>,
    },

    /// Generate one makeover without the wizard
    Generate(GenerateArgs),

    /// List the preset looks
    Presets {
        /// Only show presets for this gender
        #[arg(long)]
        gender: Option<Gender>,
    },

    /// Show config paths and the effective config
    Config {
        /// Write a default config file if none exists yet
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args, Debug)]
#[command(group(
    clap::ArgGroup::new("look")
        .required(true)
        .args(["preset", "prompt", "reference"]),
))]
struct GenerateArgs {
    /// Photo to apply the makeover to
    #[arg(long)]
    image: PathBuf,

    /// Who is in the photo (female or male)
    #[arg(long)]
    gender: Gender,

    /// Preset id (see `makeupify presets`)
    #[arg(long)]
    preset: Option<String>,

    /// Free-text description of the look
    #[arg(long)]
    prompt: Option<String>,

    /// Photo whose makeup should be copied
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Where to write the result (defaults to the configured output path)
    #[arg(long)]
    out: Option<PathBuf>,
}

impl GenerateArgs {
    fn method(&self) -> MakeupMethod {
        if self.preset.is_some() {
            MakeupMethod::Preset
        } else if self.prompt.is_some() {
            MakeupMethod::Text
        } else {
            MakeupMethod::Transfer
        }
    }
}

fn setup_logging(debug_flag: bool) {
    let level = if debug_flag { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn config_path(global: &GlobalArgs) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(|| Directories::new().config_file)
}

fn load_config(global: &GlobalArgs) -> Result<Config> {
    let path = config_path(global);
    let mut config = Config::load(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    if let Some(model) = &global.model {
        config.generation.model.clone_from(model);
    }
    if let Some(dir) = &global.output_dir {
        config.output.directory = Some(dir.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.global.debug);

    match cli.command {
        None => run_tui(&cli.global, None),
        Some(Commands::Tui { image }) => run_tui(&cli.global, image),
        Some(Commands::Generate(args)) => run_generate(&cli.global, args).await,
        Some(Commands::Presets { gender }) => {
            print!("{}", format_presets(gender));
            Ok(())
        }
        Some(Commands::Config { init }) => run_config(&cli.global, init),
    }
}

/// Launch the terminal wizard, forwarding global flags
fn run_tui(global: &GlobalArgs, image: Option<PathBuf>) -> Result<()> {
    run_foreground("makeupify-tui", &tui_args(global, image))
}

fn tui_args(global: &GlobalArgs, image: Option<PathBuf>) -> Vec<std::ffi::OsString> {
    let mut args = Vec::new();
    if let Some(config) = &global.config {
        args.push("--config".into());
        args.push(config.clone().into_os_string());
    }
    if let Some(model) = &global.model {
        args.push("--model".into());
        args.push(model.into());
    }
    if let Some(dir) = &global.output_dir {
        args.push("--output-dir".into());
        args.push(dir.clone().into_os_string());
    }
    if global.debug {
        args.push("--debug".into());
    }
    if let Some(image) = image {
        args.push(image.into_os_string());
    }
    args
}

/// Run one generation through the wizard controller, skipping the ad gate
async fn run_generate(global: &GlobalArgs, args: GenerateArgs) -> Result<()> {
    let config = load_config(global)?;
    let max_bytes = config.acquisition.max_bytes;

    let mut wizard = WizardController::new();
    let photo = acquire::acquire(&args.image, max_bytes)
        .await
        .with_context(|| format!("Failed to read photo {}", args.image.display()))?;
    wizard.image_acquired(photo);
    wizard.select_gender(args.gender);
    wizard.select_method(args.method());

    if let Some(id) = &args.preset {
        if catalog::find_preset(id).is_none() {
            bail!("Unknown preset '{id}'. Run `makeupify presets` to list them.");
        }
        if !wizard.select_preset(id) {
            bail!("Preset '{id}' is not available for {}", args.gender);
        }
    }
    if let Some(prompt) = &args.prompt {
        wizard.set_text_prompt(prompt.as_str());
    }
    if let Some(reference) = &args.reference {
        let image = acquire::acquire(reference, max_bytes)
            .await
            .with_context(|| format!("Failed to read reference {}", reference.display()))?;
        wizard.set_reference_image(image);
    }

    if !wizard.can_submit() {
        bail!("Nothing to generate: the {} input is empty", args.method().label());
    }

    let client = GeminiClient::new(&config.generation, config.resolve_api_key())
        .context("Failed to build generation client")?;
    let ticket = wizard
        .start_generation()
        .ok_or_else(|| anyhow!("Generation could not be started"))?;
    info!("Requesting makeover from {}", client.endpoint());
    eprintln!("Generating makeover...");

    let (seq, outcome) = ticket.run(&client).await;
    wizard.complete_generation(seq, outcome);
    if let Some(message) = &wizard.session().error {
        bail!("{message}");
    }

    let image = wizard
        .perform_download()
        .ok_or_else(|| anyhow!("Generation returned no image"))?;
    let target = args.out.unwrap_or_else(|| config.output.target_path());
    let path = save(&image, &target).await?;
    println!("{}", path.display());
    Ok(())
}

async fn save(image: &makeupify_core::EncodedImage, target: &Path) -> Result<PathBuf> {
    debug!("Saving {} to {}", image.mime_type(), target.display());
    acquire::save_image(image, target)
        .await
        .with_context(|| format!("Failed to write {}", target.display()))
}

/// Catalog listing grouped by category, then the quick tags
fn format_presets(gender: Option<Gender>) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for category in [PresetCategory::Style, PresetCategory::Retouch] {
        let presets: Vec<_> = catalog::PRESETS
            .iter()
            .filter(|p| p.category == category)
            .filter(|p| gender.is_none_or(|g| p.applies_to(g)))
            .collect();
        if presets.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}:", category.heading());
        for preset in presets {
            let genders: Vec<_> = preset.genders.iter().map(|g| g.as_str()).collect();
            let _ = writeln!(
                out,
                "  {:<18} {:<22} [{}]",
                preset.id,
                preset.label,
                genders.join(", ")
            );
        }
        out.push('\n');
    }
    let _ = writeln!(out, "Quick tags:");
    for tag in QUICK_TAGS {
        let _ = writeln!(out, "  {:<18} {}", tag.label, tag.value);
    }
    out
}

/// Write the default config to `path` unless a file is already there.
/// Returns whether a file was written.
fn init_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    Config::default()
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote default config to {}", path.display());
    Ok(true)
}

fn run_config(global: &GlobalArgs, init: bool) -> Result<()> {
    let dirs = Directories::new();
    let path = config_path(global);
    if init && !init_config(&path)? {
        eprintln!("Config already exists at {}, leaving it alone", path.display());
    }
    let config = load_config(global)?;

    println!("Config file:  {}", path.display());
    println!("Config dir:   {}", dirs.config.display());
    println!("Download to:  {}", config.output.target_path().display());
    println!(
        "Credential:   {}",
        if config.resolve_api_key().is_some() {
            "configured"
        } else {
            "missing"
        }
    );
    println!();

    let mut shown = config;
    if shown.generation.api_key.is_some() {
        shown.generation.api_key = Some("********".to_string());
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&shown).context("Failed to serialize config")?
    );
    Ok(())
}
