/*!
# Rust Terminal Module

This Rust module is the command line driver. It reads the source file,
runs the machine, performs all of its I/O and supervises `async` children.

*/

extern crate ansi_term;
extern crate ctrlc;

mod coordinator;

pub use coordinator::{Coordinator, Wait};

use crate::error;
use crate::lang::Error;
use crate::mach::{inspect, Event, Listing, Program, Runtime};
use ansi_term::Style;
use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const CYCLES: usize = 5000;

/// Command line of the `asm` binary.
#[derive(Parser, Debug)]
#[command(name = "asm", version)]
#[command(about = "Run a register machine assembly program", long_about = None)]
pub struct Args {
    /// Program source file
    pub file: PathBuf,

    /// Run only this function
    pub function: Option<String>,

    /// Style dumps and errors with ANSI colors
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self, terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Colors {
    stdout: bool,
    stderr: bool,
}

impl Colors {
    fn new(choice: ColorChoice) -> Colors {
        Colors {
            stdout: choice.enabled(io::stdout().is_terminal()),
            stderr: choice.enabled(io::stderr().is_terminal()),
        }
    }

    /// The choice handed to children, whose streams are always pipes.
    fn child_choice(self) -> &'static str {
        if self.stdout {
            "always"
        } else {
            "never"
        }
    }
}

pub fn main() {
    let args = Args::parse();
    init_logging();
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        warn!(%error, "Ctrl-C handler not installed");
    }
    let status = match main_loop(&args, &interrupted) {
        Ok(status) => status,
        Err(error) => {
            eprintln!("{}", error);
            1
        }
    };
    let _ = io::stdout().flush();
    process::exit(status);
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("ASM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn report(error: &Error, colors: Colors) {
    if colors.stderr {
        eprintln!("{}", Style::new().bold().paint(error.to_string()));
    } else {
        eprintln!("{}", error);
    }
}

fn load(args: &Args) -> Result<Runtime, Error> {
    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(e) => {
            return Err(error!(Io; "Could not read {}: {}", args.file.display(), e));
        }
    };
    let program = Program::compile(Listing::from_source(&source))?;
    debug!(lines = program.len(), file = %args.file.display(), "program loaded");
    match &args.function {
        Some(function) => Runtime::with_entry(program, function),
        None => Ok(Runtime::new(program)),
    }
}

fn main_loop(args: &Args, interrupted: &AtomicBool) -> io::Result<i32> {
    let colors = Colors::new(args.color);
    let mut runtime = match load(args) {
        Ok(runtime) => runtime,
        Err(error) => {
            report(&error, colors);
            return Ok(1);
        }
    };
    let child_args: Vec<OsString> = vec![
        args.file.clone().into_os_string(),
        "--color".into(),
        colors.child_choice().into(),
    ];
    let mut coordinator = Coordinator::new(std::env::current_exe()?, child_args);
    let stdout = io::stdout();

    loop {
        if interrupted.swap(false, Ordering::SeqCst) {
            runtime.interrupt();
        }
        if let Some(status) = coordinator.reap() {
            return Ok(status);
        }
        match runtime.execute(CYCLES) {
            Event::Stopped => return finish(&mut coordinator, interrupted, colors),
            Event::Running => {}
            Event::Print(s) => {
                let mut out = stdout.lock();
                out.write_all(s.as_bytes())?;
                out.flush()?;
            }
            Event::Inspect(dump) => {
                let mut out = stdout.lock();
                writeln!(out, "{}", inspect(&dump, colors.stdout))?;
                out.flush()?;
            }
            Event::Warning(error) => eprintln!("{}", error),
            Event::Error(error) => {
                report(&error, colors);
                return Ok(1);
            }
            Event::Async {
                function,
                line_number,
            } => {
                if let Err(e) = coordinator.spawn(&function) {
                    let error = error!(Io, Some(line_number);
                        "Could not start async call {}: {}", function, e
                    );
                    report(&error, colors);
                    return Ok(1);
                }
            }
            Event::Sleep(duration) => match coordinator.sleep(duration, interrupted) {
                Wait::Failed(status) => return Ok(status),
                Wait::Done | Wait::Interrupted => {}
            },
            Event::Exit(0) => return finish(&mut coordinator, interrupted, colors),
            Event::Exit(status) => return Ok(status),
        }
    }
}

/// Successful completion waits for every `async` child.
fn finish(coordinator: &mut Coordinator, interrupted: &AtomicBool, colors: Colors) -> io::Result<i32> {
    debug!(outstanding = coordinator.outstanding(), "draining async calls");
    Ok(match coordinator.drain(interrupted) {
        Wait::Done => 0,
        Wait::Failed(status) => status,
        Wait::Interrupted => {
            report(&error!(Interrupted), colors);
            1
        }
    })
}
