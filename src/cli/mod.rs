use env_logger::Env;
use log::LevelFilter;

pub mod decode;
pub mod header;

/// Set up error reporting and logging
pub fn init(verbose: bool) -> color_eyre::Result<()> {
    color_eyre::install()?;
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_env(Env::new().filter("RASTERFEED_LOG"))
        .init();
    Ok(())
}
