#![allow(clippy::cargo_common_metadata)]
use anyhow::Result;
use std::process::ExitCode;
use xslt_transformer::{
    cli::{self, Invocation, Outcome},
    error::FAILURE_EXIT_CODE,
    setup_logging,
    utils::ProcessEnv,
};

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::from(FAILURE_EXIT_CODE)
        }
    }
}

fn try_main() -> Result<ExitCode> {
    // Parse command line arguments
    let args = match cli::parse_args() {
        Ok(Invocation::Run(args)) => args,
        Ok(Invocation::Help) => {
            print!("{}", cli::usage());
            return Ok(ExitCode::SUCCESS);
        }
        Ok(Invocation::Version) => {
            println!("{}", cli::version_line());
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            cli::render_error(&e, &mut std::io::stderr())?;
            return Ok(ExitCode::from(e.exit_code()));
        }
    };

    // Setup logging based on debug flag
    setup_logging(args.debug)?;

    let prompter = cli::prompter_for(args.assume_yes);
    match cli::run(&args, &ProcessEnv, &*prompter) {
        Ok(Outcome::Generated(report)) => {
            println!(
                "File {} successfully generated.",
                report.output_path.display()
            );
            Ok(ExitCode::SUCCESS)
        }
        Ok(Outcome::Cancelled { .. }) => {
            println!("Exiting the transformation...");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            cli::render_error(&e, &mut std::io::stderr())?;
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
