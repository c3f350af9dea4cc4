use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use dashboard_core::{update, Msg, SessionState};
use dashboard_engine::ReqwestPageFetcher;
use engine_logging::{engine_info, engine_warn};

use super::config::DashboardConfig;
use super::effects::EffectRunner;
use super::ui;
use super::ui::input::Command;

pub fn run_app() -> anyhow::Result<()> {
    let config = DashboardConfig::load()?;
    engine_logging::initialize(config.log_destination, config.log_level()?, &config.log_file);
    engine_info!(
        "Starting dashboard resource={} refresh={:?}",
        config.resource,
        config.refresh_interval()
    );

    let fetcher = ReqwestPageFetcher::new(config.endpoint()?, config.fetch_settings())
        .context("configuring page fetcher")?;
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(Arc::new(fetcher), msg_tx.clone(), config.refresh_interval())
        .context("starting engine runtime")?;
    spawn_input_reader(msg_tx).context("starting input reader")?;

    let mut view = DashboardLoop {
        state: SessionState::with_highlight_categories(config.highlight_categories.clone()),
        runner,
        out: io::stdout(),
    };

    view.dispatch(Msg::Activated)?;
    while let Ok(msg) = msg_rx.recv() {
        let teardown = msg == Msg::TornDown;
        view.dispatch(msg)?;
        if teardown {
            break;
        }
    }
    engine_info!("Dashboard stopped");
    Ok(())
}

/// Owns the session for the lifetime of the view; all mutation happens here.
struct DashboardLoop {
    state: SessionState,
    runner: EffectRunner,
    out: io::Stdout,
}

impl DashboardLoop {
    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let redraw = state.consume_dirty();
        let view = redraw.then(|| state.view());
        self.state = state;

        self.runner.run(effects);
        if let Some(view) = view {
            let mut out = self.out.lock();
            writeln!(out)?;
            for line in ui::render::render(&view) {
                writeln!(out, "{line}")?;
            }
            out.flush()?;
        }
        Ok(())
    }
}

/// Reads operator commands from stdin. End of input tears the view down.
fn spawn_input_reader(msg_tx: mpsc::Sender<Msg>) -> io::Result<()> {
    thread::Builder::new()
        .name("dashboard-input".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        engine_warn!("Failed to read input: {}", err);
                        break;
                    }
                };
                match ui::input::parse_command(&line) {
                    None => {}
                    Some(Command::Intent(msg)) => {
                        if msg_tx.send(msg).is_err() {
                            return;
                        }
                    }
                    Some(Command::Help) => {
                        for help in ui::render::help_lines() {
                            println!("{help}");
                        }
                    }
                    Some(Command::Unknown(text)) => {
                        println!("Unknown command {text:?}; 'h' for help");
                    }
                    Some(Command::Quit) => break,
                }
            }
            let _ = msg_tx.send(Msg::TornDown);
        })?;
    Ok(())
}
