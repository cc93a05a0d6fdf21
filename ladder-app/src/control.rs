use crate::view;
use anyhow::{Context, Result};
use chrono::Utc;
use ladder_core::{simulation::state::IndustryState, SimulationEngine};
use ladder_schemas::command::Command;
use std::{
    io::{self, BufRead},
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc, Arc,
    },
    thread,
    time::{Duration, Instant},
};

pub const SAVE_DISABLED: &str = "save disabled in developer mode";

#[derive(Debug, Clone)]
pub struct ControlOptions {
    pub tick_interval: Duration,
    pub save_path: PathBuf,
}

/// Everything the control loop reacts to, merged onto one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    Input(String),
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    PrevIndustry,
    NextIndustry,
    PrevWorker,
    NextWorker,
    Buy,
    Run,
    RunLowest,
    Upgrade,
    ToggleBuyMax,
    Save,
    Load,
    Show,
    Quit,
}

impl Input {
    pub fn parse(line: &str) -> Option<Input> {
        let input = match line.trim().to_ascii_lowercase().as_str() {
            "a" | "left" => Input::PrevIndustry,
            "d" | "right" => Input::NextIndustry,
            "w" | "up" => Input::PrevWorker,
            "s" | "down" => Input::NextWorker,
            "b" | "buy" => Input::Buy,
            "r" | "run" => Input::Run,
            "q" => Input::RunLowest,
            "u" | "upgrade" => Input::Upgrade,
            "m" => Input::ToggleBuyMax,
            "t" | "save" => Input::Save,
            "y" | "load" => Input::Load,
            "" | "l" => Input::Show,
            "x" | "esc" | "quit" | "exit" => Input::Quit,
            _ => return None,
        };
        Some(input)
    }
}

/// The selected industry tab and worker row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub industry: usize,
    pub worker: usize,
}

impl Selection {
    /// Moves across industry tabs, wrapping at both ends. The worker row resets.
    pub fn shift_industry(&mut self, forward: bool, industry_count: usize) {
        if industry_count == 0 {
            return;
        }
        self.industry = if forward {
            (self.industry + 1) % industry_count
        } else {
            (self.industry + industry_count - 1) % industry_count
        };
        self.worker = 0;
    }

    /// Moves through worker rows, stopping at the first and last row.
    pub fn shift_worker(&mut self, forward: bool, worker_count: usize) {
        if forward {
            self.worker = (self.worker + 1).min(worker_count.saturating_sub(1));
        } else {
            self.worker = self.worker.saturating_sub(1);
        }
    }

    pub fn clamp_to(&mut self, industries: &[IndustryState]) {
        self.industry = self.industry.min(industries.len().saturating_sub(1));
        let workers = industries.get(self.industry).map_or(0, |i| i.workers.len());
        self.worker = self.worker.min(workers.saturating_sub(1));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The player's view of one running engine.
pub struct Session {
    engine: SimulationEngine,
    selection: Selection,
    save_path: PathBuf,
    status: Option<String>,
}

impl Session {
    pub fn new(engine: SimulationEngine, save_path: PathBuf) -> Self {
        Self {
            engine,
            selection: Selection::default(),
            save_path,
            status: None,
        }
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn tick(&mut self) -> Result<()> {
        self.engine.tick(Utc::now()).context("Failed to advance simulation")
    }

    pub fn handle_line(&mut self, line: &str) -> Flow {
        match Input::parse(line) {
            Some(input) => self.handle(input),
            None => {
                self.status = Some(format!("unknown command '{}'", line.trim()));
                Flow::Continue
            }
        }
    }

    pub fn handle(&mut self, input: Input) -> Flow {
        log::debug!("input {:?} at {:?}", input, self.selection);
        let Selection { industry, worker } = self.selection;
        let command = match input {
            Input::PrevIndustry | Input::NextIndustry => {
                let count = self.engine.industries().len();
                self.selection.shift_industry(input == Input::NextIndustry, count);
                return Flow::Continue;
            }
            Input::PrevWorker | Input::NextWorker => {
                let count = self.engine.industries()[industry].workers.len();
                self.selection.shift_worker(input == Input::NextWorker, count);
                return Flow::Continue;
            }
            Input::Show => return Flow::Continue,
            Input::Quit => return Flow::Quit,
            Input::Save => {
                self.status = Some(self.save());
                return Flow::Continue;
            }
            Input::Load => {
                self.status = Some(self.load());
                return Flow::Continue;
            }
            Input::Buy => Command::Buy { industry, worker },
            Input::Run => Command::StartRun { industry, worker },
            Input::RunLowest => Command::RunLowestAvailable { industry },
            Input::Upgrade => Command::Upgrade { industry, worker },
            Input::ToggleBuyMax => Command::ToggleBuyMax,
        };

        self.status = Some(match self.engine.execute(command, Utc::now()) {
            Ok(message) => message,
            Err(e) => {
                log::debug!("{:?} rejected: {}", command, e);
                e.to_string()
            }
        });
        Flow::Continue
    }

    fn save(&self) -> String {
        if self.engine.dev_mode() {
            return SAVE_DISABLED.to_string();
        }
        match self.engine.save_to_file(&self.save_path) {
            Ok(()) => format!("saved to {}", self.save_path.display()),
            Err(e) => format!("save failed: {}", e),
        }
    }

    fn load(&mut self) -> String {
        if self.engine.dev_mode() {
            return SAVE_DISABLED.to_string();
        }
        match self.engine.load_from_file(&self.save_path) {
            Ok(()) => {
                self.selection.clamp_to(self.engine.industries());
                format!("loaded {}", self.save_path.display())
            }
            Err(e) => format!("load failed: {}", e),
        }
    }

    fn render(&self) {
        for line in view::status_lines(&self.engine, self.selection, Utc::now()) {
            println!("{}", line);
        }
        if let Some(status) = &self.status {
            println!("> {}", status);
        }
    }
}

/// Runs the engine until the player quits or stdin closes.
///
/// Player input arrives from a reader thread; between inputs the engine is
/// ticked every `tick_interval`.
///
/// Stdin reads cannot be interrupted, so after a quit the reader thread stays
/// blocked until the next line or EOF and only then sees the shutdown flag.
/// It holds nothing but the sender, and the process exits right after this
/// returns.
pub fn run(engine: SimulationEngine, options: ControlOptions) -> Result<SimulationEngine> {
    let (tx, rx) = mpsc::channel();
    let shutdown = Arc::new(AtomicBool::new(false));
    let reader_shutdown = Arc::clone(&shutdown);
    thread::spawn(move || read_input(io::stdin().lock(), tx, reader_shutdown));

    let mut session = Session::new(engine, options.save_path);
    session.tick()?;
    session.render();

    let mut last_tick = Instant::now();
    loop {
        match rx.recv_timeout(options.tick_interval) {
            Ok(ControlEvent::Input(line)) => {
                session.tick()?;
                if session.handle_line(&line) == Flow::Quit {
                    break;
                }
                session.render();
            }
            Ok(ControlEvent::InputClosed) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }

        if last_tick.elapsed() >= options.tick_interval {
            session.tick()?;
            last_tick = Instant::now();
        }
    }

    shutdown.store(true, Ordering::Relaxed);
    Ok(session.engine)
}

fn read_input<R: BufRead>(mut reader: R, tx: mpsc::Sender<ControlEvent>, shutdown: Arc<AtomicBool>) {
    let mut line = String::new();
    while !shutdown.load(Ordering::Relaxed) {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                if tx.send(ControlEvent::Input(line.clone())).is_err() {
                    return;
                }
            }
        }
    }
    let _ = tx.send(ControlEvent::InputClosed);
}
