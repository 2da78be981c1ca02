use clap::Parser;
use codefirst_cli::Cli;
use console::style;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.init_tracing();

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}
