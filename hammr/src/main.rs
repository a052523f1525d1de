mod cli;
mod exit_codes;
mod output;
mod report;
mod run;

use clap::Parser;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    let cli = match cli::Cli::try_parse() {
        Ok(v) => v,
        Err(err) => {
            use clap::error::ErrorKind;
            let _ = err.print();
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    exit_codes::ExitCode::Success.as_i32()
                }
                _ => exit_codes::ExitCode::InvalidInput.as_i32(),
            };
            std::process::exit(code);
        }
    };

    let code = match cli.command {
        cli::Command::Run(args) => match run::run(args).await {
            Ok(()) => exit_codes::ExitCode::Success.as_i32(),
            Err(err) => {
                eprintln!("{err:#}");
                exit_code_for(&err).as_i32()
            }
        },
    };

    std::process::exit(code);
}

fn exit_code_for(err: &anyhow::Error) -> exit_codes::ExitCode {
    // Catalog/config precondition violations are user input problems; the
    // rest (io, join failures) are runtime errors.
    if err.downcast_ref::<hammr_core::Error>().is_some() {
        exit_codes::ExitCode::InvalidInput
    } else {
        exit_codes::ExitCode::RuntimeError
    }
}
