use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use compare_core::{update, AppState, Msg, Phase};
use compare_engine::EngineHandle;
use compare_logging::{compare_info, compare_warn};

use super::config::Cli;
use super::effects::EffectRunner;
use super::{logging, ui};

const TICK_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log);

    let engine = EngineHandle::new(cli.search_settings()).context("failed to start engine")?;
    compare_info!("Using backend at {}", engine.endpoint());

    if cli.health {
        return match engine.health() {
            Ok(()) => {
                println!("Backend at {} is up", engine.endpoint());
                Ok(())
            }
            Err(err) => bail!("Backend at {} is not healthy: {}", engine.endpoint(), err),
        };
    }

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(engine, msg_tx);
    let mut session = Session::new(runner, msg_rx);

    if cli.products.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read product name from stdin")?;
            session.search(line)?;
        }
    } else {
        for product in cli.products {
            session.search(product)?;
        }
    }
    Ok(())
}

/// Owns the state machine for the lifetime of the program.
struct Session {
    state: AppState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    last_frame: Vec<String>,
}

impl Session {
    fn new(runner: EffectRunner, msg_rx: mpsc::Receiver<Msg>) -> Self {
        Self {
            state: AppState::new(),
            runner,
            msg_rx,
            last_frame: Vec::new(),
        }
    }

    /// Submits one product name and waits until its search settles.
    fn search(&mut self, product: String) -> anyhow::Result<()> {
        self.dispatch_msg(Msg::InputChanged(product))?;
        self.dispatch_msg(Msg::SearchSubmitted)?;

        while self.state.phase() == Phase::Searching {
            match self.msg_rx.recv_timeout(TICK_INTERVAL) {
                Ok(msg) => self.dispatch_msg(msg)?,
                Err(mpsc::RecvTimeoutError::Timeout) => self.dispatch_msg(Msg::Tick)?,
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    compare_warn!("Engine event loop ended mid-search");
                    bail!("search engine stopped unexpectedly");
                }
            }
        }
        Ok(())
    }

    fn dispatch_msg(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = was_dirty.then(|| state.view());
        self.state = state;
        self.runner.enqueue(effects);

        match view {
            Some(view) => self.render(&ui::render::render(&view)),
            None => Ok(()),
        }
    }

    /// Prints a frame unless it repeats the previous one.
    fn render(&mut self, frame: &[String]) -> io::Result<()> {
        if frame.is_empty() || frame == self.last_frame.as_slice() {
            return Ok(());
        }
        let mut out = io::stdout().lock();
        for line in frame {
            writeln!(out, "{line}")?;
        }
        writeln!(out)?;
        out.flush()?;
        self.last_frame = frame.to_vec();
        Ok(())
    }
}
