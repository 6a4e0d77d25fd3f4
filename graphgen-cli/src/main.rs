//! CLI entry point for sampling constrained random graphs.
//!
//! Parses arguments with clap, samples one graph, renders it to stdout and
//! maps failures to a non-zero exit code with a structured error event.

use std::{
    io::{self, BufWriter, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use graphgen_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to sample graph")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render graph")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let core = err.downcast_ref::<CliError>().map(|cli_error| match cli_error {
            CliError::Core(core) => core,
        });
        let code = core.map(|core| field::display(core.code().as_str()));
        let configuration_code = core
            .and_then(|core| core.configuration_code())
            .map(|code| field::display(code.as_str()));
        let draw_code = core
            .and_then(|core| core.draw_code())
            .map(|code| field::display(code.as_str()));

        error!(
            error = %format!("{err:#}"),
            code,
            configuration_code,
            draw_code,
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
