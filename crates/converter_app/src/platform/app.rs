use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use converter_core::{update, AppState, Endpoints, Msg};
use converter_engine::EngineConfig;
use converter_logging::{conv_info, conv_warn};

use super::config::{self, AppConfig, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::input::{parse_line, Command, HELP_TEXT};
use super::{logging, render};

const TICK_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Parser)]
#[command(
    name = "converter_app",
    about = "Convert CSV files to XLSX through a conversion server"
)]
struct Args {
    /// Configuration file (RON).
    #[arg(long, default_value = CONFIG_FILENAME)]
    config: PathBuf,
    /// Conversion server base URL, overrides the config file.
    #[arg(long)]
    server: Option<String>,
    /// Directory downloads are saved to, overrides the config file.
    #[arg(long)]
    download_dir: Option<PathBuf>,
    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,
}

pub fn run_app() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut config, config_error) = match config::load_config(&args.config) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    if let Some(server) = args.server {
        config.server_url = server;
    }
    if let Some(dir) = args.download_dir {
        config.download_dir = dir;
    }

    logging::initialize(
        config.log,
        converter_logging::level_from_name(&config.log_level),
    );
    if let Some(err) = config_error {
        conv_warn!("Using default configuration: {}", err);
        eprintln!("Warning: using default configuration: {err}");
    }

    if args.write_config {
        let path = config::save_config(&args.config, &config)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let endpoints = Endpoints::new(&config.server_url)
        .with_context(|| format!("invalid server url {:?}", config.server_url))?;
    conv_info!(
        "Using conversion server {} and download dir {:?}",
        endpoints.base(),
        config.download_dir
    );

    let (tx, rx) = mpsc::channel::<Command>();
    let runner = EffectRunner::new(
        EngineConfig {
            settings: config.client_settings(),
            download_dir: config.download_dir.clone(),
        },
        tx.clone(),
    )
    .context("failed to start network engine")?;
    spawn_stdin_reader(tx.clone())?;
    spawn_ticker(tx)?;

    println!("{HELP_TEXT}\n");
    let mut app = App {
        state: AppState::with_endpoints(endpoints),
        runner,
    };
    app.dispatch(Msg::Started);
    app.print();

    let mut quitting = false;
    while let Ok(command) = rx.recv() {
        match command {
            Command::Msg(msg) => app.dispatch(msg),
            Command::Show => app.print(),
            Command::Help => println!("{HELP_TEXT}\n"),
            Command::Quit => {
                quitting = true;
                if app.state.is_busy() {
                    println!("Waiting for running requests to finish...");
                }
            }
        }
        if quitting && !app.state.is_busy() {
            break;
        }
    }

    conv_info!("Shutting down");
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
        if self.state.consume_dirty() {
            self.print();
        }
    }

    fn print(&self) {
        let view = self.state.view();
        for line in render::render(&view) {
            println!("{line}");
        }
        println!();
    }
}

fn spawn_stdin_reader(tx: mpsc::Sender<Command>) -> io::Result<()> {
    thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                match parse_line(&line) {
                    Ok(Some(command)) => {
                        if tx.send(command).is_err() {
                            return;
                        }
                    }
                    Ok(None) => {}
                    Err(err) => eprintln!("{err}"),
                }
            }
            let _ = tx.send(Command::Quit);
        })?;
    Ok(())
}

/// Background tick so expired notifications disappear without user input.
fn spawn_ticker(tx: mpsc::Sender<Command>) -> io::Result<()> {
    thread::Builder::new()
        .name("tick".to_string())
        .spawn(move || {
            while tx.send(Command::Msg(Msg::Tick)).is_ok() {
                thread::sleep(TICK_INTERVAL);
            }
        })?;
    Ok(())
}
