use anyhow::Result;
use clap::Parser;
use par_canvas::cli::{Cli, LogLevelArg};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Routes log::info!() etc. to the debug log file. CLI --log-level takes
    // highest precedence, then RUST_LOG, then config (applied later).
    par_canvas::debug::init_log_bridge(cli.log_level.map(LogLevelArg::to_level_filter));

    let result = par_canvas::cli::run(cli);
    if let Err(ref e) = result {
        log::error!("par-canvas: {e:#}");
    }
    log::Log::flush(log::logger());
    result
}
