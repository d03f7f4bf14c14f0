use std::{error::Error, fs::OpenOptions, sync::Mutex};

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use provisiong::{
    cli::{Cli, Commands, parse_args},
    config::load_config,
    controller::CommandController,
    provisioner::Provisioner,
};

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args();
    init_logging(&args)?;

    match args.command {
        Commands::Provision { config } => {
            let config = load_config(Some(&config)).inspect_err(|err| {
                error!("Failed to load configuration: {err}");
            })?;

            let controller = CommandController::from_system_dir();
            let provisioner = Provisioner::new(&config, &controller);

            let report = provisioner.run().inspect_err(|err| {
                error!("Provisioning aborted: {err}");
            })?;

            if !report.all_succeeded() {
                for (service, reason) in &report.failed {
                    eprintln!("provisioning failed for '{service}': {reason}");
                }
                std::process::exit(1);
            }
        }
        Commands::Check { config } => {
            let config = load_config(Some(&config)).inspect_err(|err| {
                error!("Failed to load configuration: {err}");
            })?;

            info!(
                "Configuration valid: {} service(s) declared.",
                config.services.len()
            );
            println!(
                "config ok: {} service(s), wrapper folder '{}', destination '{}'",
                config.services.len(),
                config.nssm_folder,
                config.dest_folder
            );
            for spec in &config.services {
                println!("  {} <- {}", spec.service_name, spec.source_bat_path);
            }
        }
    }

    Ok(())
}

fn init_logging(args: &Cli) -> Result<(), Box<dyn Error>> {
    let filter = if let Some(level) = args.log_level {
        EnvFilter::new(level.as_str())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    match &args.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }

    Ok(())
}
