//! Command-line entry point for inifmt.

use std::io::Write as _;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod logging;

fn run(args: &cli::Cli, log: &logging::Logger) -> Result<()> {
    let mut out = std::io::stdout().lock();
    let global = &args.global;
    match &args.command {
        cli::Command::Sections(opts) => commands::sections::run(global, opts, log, &mut out),
        cli::Command::Keys(opts) => commands::keys::run(global, opts, log, &mut out),
        cli::Command::Get(opts) => commands::get::run(global, opts, log, &mut out),
        cli::Command::Set(opts) => commands::set::run(global, opts, log),
        cli::Command::Unset(opts) => commands::unset::run(global, opts, log),
        cli::Command::AddSection(opts) => commands::add_section::run(global, opts, log),
        cli::Command::RemoveSection(opts) => commands::remove_section::run(global, opts, log),
        cli::Command::Fmt(opts) => commands::fmt::run(global, opts, log),
        cli::Command::Export(opts) => commands::export::run(global, opts, log, &mut out),
        cli::Command::Version => commands::version::run(&mut out),
    }?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = logging::Logger::new(args.command.name());

    match run(&args, &log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{} failed: {e:#}", log.command()));
            ExitCode::FAILURE
        }
    }
}
