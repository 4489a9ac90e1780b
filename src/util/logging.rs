use anyhow::Result;
use env_logger::Builder;
use log::LevelFilter;

/// Initialize the logging system with env_logger.
///
/// The `verbose` flag turns on debug logs for this crate; `RUST_LOG`
/// still overrides everything. Call once at host startup.
pub fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module("melody_engine", level)
        .try_init()?;

    Ok(())
}
