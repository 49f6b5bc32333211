//! xidmon: report XInput2 device enable/disable bursts on stdout.
//!
//! Run with: xidmon [-h] [-V]
//!
//! Set `RUST_LOG=debug` to trace connection setup and bursts on stderr.

use std::io::{self, Write};
use std::process::ExitCode;
use xidmon::cli::{self, Command};
use xidmon::{Error, Monitor, MonitorConfig, Reporter, open_source};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match cli::parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    match command {
        Command::Help => print_and_exit(cli::HELP),
        Command::Version => print_and_exit(cli::VERSION),
        Command::Run => match run() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                if !e.is_clean_shutdown() {
                    eprintln!("{}", e);
                }
                ExitCode::from(e.exit_code())
            }
        },
    }
}

fn run() -> Result<(), Error> {
    let source = open_source()?;
    let config = MonitorConfig::from_env();
    log::info!("monitoring device hierarchy, window {:?}", config.window);

    let reporter = Reporter::new(io::stdout().lock()).publish_line_state();
    let mut monitor = Monitor::with_reporter(source, reporter, config);
    monitor.run()
}

fn print_and_exit(text: &str) -> ExitCode {
    let mut out = io::stdout().lock();
    match out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
