//! `patchpilot` 바이너리 진입점.

use patchpilot::interface::cli::{Cli, CliAction};
use patchpilot::interface::composition::AppComposition;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let action = match Cli::parse_action() {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    match action {
        CliAction::InspectConfig => {
            match AppComposition::default().inspect_config_usecase().execute() {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("error: {err:#}");
                    std::process::exit(1);
                }
            }
        }
        CliAction::Generate { options, quiet } => {
            if let Err(err) = patchpilot::run_blocking(options, quiet) {
                eprintln!("Error generating patch: {err:#}");
                std::process::exit(1);
            }
        }
    }
}
