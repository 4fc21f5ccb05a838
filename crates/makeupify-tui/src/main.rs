//! Makeupify TUI - terminal front end for the makeover wizard.
//!
//! This is the main entry point for the TUI application. It loads the
//! config, builds the generation client and ad gate, and runs the event loop
//! that feeds keys, mouse input and background results into [`App`].

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use makeupify_core::ad_gate::{AdGate, AdOutcome, TokioTimer};
use makeupify_core::config::{Config, Directories};
use makeupify_core::generation::{GeminiClient, ImageGenerator};
use makeupify_core::preferences::Preferences;
use makeupify_core::{Effect, acquire};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod app;
mod cli;
mod colors;
mod gate;
mod render;
mod state;

use app::{App, AppEvent, Command};
use cli::Cli;
use gate::OverlayPresenter;
use state::AcquireTarget;

/// Set up logging with file output. TUI must log to file since it uses the terminal for display.
fn setup_logging(debug_flag: bool) {
    let level = if debug_flag || cfg!(debug_assertions) {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_filename = format!("makeupify-tui-{timestamp}.log");
    let log_path = std::path::Path::new("/tmp").join(&log_filename);

    let symlink_path = std::path::Path::new("/tmp/makeupify-tui.log");
    let _ = std::fs::remove_file(symlink_path);
    let _ = std::os::unix::fs::symlink(&log_path, symlink_path);

    let file_appender = tracing_appender::rolling::never("/tmp", &log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    std::mem::forget(guard);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => Directories::new().config_file,
    };
    let mut config = Config::load(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    if let Some(model) = &cli.model {
        config.generation.model.clone_from(model);
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = Some(dir.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    let config = load_config(&cli)?;
    let api_key = config.resolve_api_key();
    if api_key.is_none() {
        warn!("No API key configured; generation will report a configuration error");
    }
    let client = GeminiClient::new(&config.generation, api_key)
        .context("Failed to build generation client")?;
    info!("Using model endpoint {}", client.endpoint());

    run_tui(&config, Arc::new(client), cli.image).await
}

/// Runs commands on behalf of the app and reports back over the event channel
struct Runner {
    tx: mpsc::UnboundedSender<AppEvent>,
    gate: AdGate,
    generator: Arc<dyn ImageGenerator>,
    max_bytes: u64,
    download_target: PathBuf,
}

impl Runner {
    fn execute(&self, app: &mut App, command: Command) {
        match command {
            Command::Acquire { target, path } => self.acquire(target, path),
            Command::ShowAd(action) => {
                let tx = self.tx.clone();
                let outcome = self.gate.show(
                    action,
                    Box::new(move |action| {
                        let _ = tx.send(AppEvent::AdFinished(action));
                    }),
                );
                if outcome == AdOutcome::Scheduled {
                    app.ad_until = Some(Instant::now() + self.gate.dwell());
                }
            }
            Command::Perform(Effect::Generate(ticket)) => {
                let tx = self.tx.clone();
                let generator = Arc::clone(&self.generator);
                tokio::spawn(async move {
                    let (seq, outcome) = ticket.run(generator.as_ref()).await;
                    let preview = match &outcome {
                        Ok(image) => acquire::decode_preview(image)
                            .inspect_err(|e| warn!("Result preview unavailable: {e}"))
                            .ok(),
                        Err(e) => {
                            error!("Generation #{seq} failed: {}", e.detail());
                            None
                        }
                    };
                    let _ = tx.send(AppEvent::Generated {
                        seq,
                        outcome,
                        preview,
                    });
                });
            }
            Command::Perform(Effect::Download(image)) => {
                let tx = self.tx.clone();
                let target = self.download_target.clone();
                tokio::spawn(async move {
                    let result = acquire::save_image(&image, &target)
                        .await
                        .map_err(|e| e.to_string());
                    match &result {
                        Ok(path) => info!("Downloaded makeover to {}", path.display()),
                        Err(e) => error!("Download failed: {e}"),
                    }
                    let _ = tx.send(AppEvent::Saved(result));
                });
            }
        }
    }

    fn acquire(&self, target: AcquireTarget, path: PathBuf) {
        let tx = self.tx.clone();
        let max_bytes = self.max_bytes;
        tokio::spawn(async move {
            let result = async {
                let image = acquire::acquire(&path, max_bytes).await?;
                let pixels = acquire::decode_preview(&image)?;
                Ok::<_, makeupify_core::Error>((image, pixels))
            }
            .await
            .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::Acquired { target, result });
        });
    }
}

// Event loop with setup/teardown - input handling lives in App
async fn run_tui(
    config: &Config,
    generator: Arc<dyn ImageGenerator>,
    initial_image: Option<PathBuf>,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let prefs = Preferences {
        language: config.ui.language,
        theme: config.ui.theme,
    };
    let mut app = App::new(prefs, config.ui.slider_step);
    app.ad_dwell = Duration::from_millis(config.ad_gate.dwell_ms);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let presenter = OverlayPresenter::new(config.ad_gate.enabled, Arc::clone(&app.ad_showing));
    let runner = Runner {
        tx,
        gate: AdGate::new(
            Arc::new(presenter),
            Arc::new(TokioTimer),
            Duration::from_millis(config.ad_gate.dwell_ms),
        ),
        generator,
        max_bytes: config.acquisition.max_bytes,
        download_target: config.output.target_path(),
    };

    if let Some(path) = initial_image {
        app.acquiring = Some(AcquireTarget::Photo);
        runner.execute(
            &mut app,
            Command::Acquire {
                target: AcquireTarget::Photo,
                path,
            },
        );
    }

    let mut event_stream = EventStream::new();
    let mut prefs_rx = app.prefs.subscribe();
    let mut ticker = tokio::time::interval(Duration::from_millis(200));
    let mut needs_render = true;

    loop {
        if needs_render {
            terminal.draw(|f| render::ui(f, &mut app))?;
            needs_render = false;
        }

        let animating = app.ad_until.is_some()
            || app.acquiring.is_some()
            || app.wizard.session().is_loading;

        tokio::select! {
            Some(event) = rx.recv() => {
                if let Some(command) = app.handle_event(event) {
                    runner.execute(&mut app, command);
                }
                needs_render = true;
            }

            Some(event_result) = event_stream.next() => {
                let event = match event_result {
                    Ok(e) => e,
                    Err(e) => {
                        tracing::error!("Event stream error: {}", e);
                        continue;
                    }
                };

                match event {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        tracing::debug!("KEY EVENT: code={:?}, modifiers={:?}", key.code, key.modifiers);
                        if let Some(command) = app.handle_key(key) {
                            runner.execute(&mut app, command);
                        }
                    }
                    Event::Mouse(mouse) => app.handle_mouse(mouse),
                    Event::Resize(..) => {}
                    _ => continue,
                }
                needs_render = true;
            }

            Ok(()) = prefs_rx.changed() => {
                needs_render = true;
            }

            _ = ticker.tick(), if animating => {
                app.tick = app.tick.wrapping_add(1);
                needs_render = true;
            }
        }

        if app.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
