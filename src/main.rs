use clap::Parser;
use taskpad::cli::commands::Cli;
use taskpad::io::config_io::load_config;
use taskpad::io::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = start(&cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn start(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    // Dropping the handle would stop the logger
    let _logger = init_logging(&config.log.level, config.log.dir.as_deref())?;

    taskpad::tui::run(&config)
}
