use anyhow::Result;
use clap::Parser;
use glyphmint::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI --log-level takes highest precedence, then RUST_LOG, then config (applied later).
    glyphmint::debug::init_log_bridge(cli.log_level, cli.log_file.as_deref());

    log::info!("Starting glyphmint {}", env!("CARGO_PKG_VERSION"));

    match glyphmint::app::run(&cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("glyphmint: error: {e}");
            log::logger().flush();
            // No destructors with side effects are pending at this point.
            std::process::exit(e.exit_code());
        }
    }
}
