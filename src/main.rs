use anyhow::Result;
use clap::Parser;
use vistext::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli::load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("vistext: error: {e:#}");
            std::process::exit(1);
        }
    };

    // CLI --log-level wins over RUST_LOG, which wins over config.
    let level = vistext::debug::init_log_bridge(cli.log_level, config.log_level);
    log::info!("vistext {} starting (log level {level})", vistext::VERSION);

    let result = cli::run(&cli, &config);

    if let Err(e) = result {
        log::error!("{e:#}");
        log::logger().flush();
        eprintln!("vistext: error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
