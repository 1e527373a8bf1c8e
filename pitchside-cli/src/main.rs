//! Entry point for the `pitchside` command-line interface.
#![forbid(unsafe_code)]

use pitchside_cli::CliError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match pitchside_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => fail(&err),
    }
}

#[expect(
    clippy::print_stderr,
    reason = "fatal errors are reported on stderr before exiting"
)]
fn fail(err: &CliError) -> ! {
    eprintln!("pitchside: {err}");
    std::process::exit(1);
}
