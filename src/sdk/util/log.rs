use env_logger::{Builder, Env};

const DEFAULT_FILTER: &str = "info";

fn builder() -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    builder.format_timestamp_secs().format_module_path(false);
    builder
}

/// Loads `.env` (if any) so `RUST_LOG` and the `ROUTE_API_*` settings can live
/// there, then installs the logger. Fails if a logger is already installed.
pub fn try_init_logging() -> Result<(), ::log::SetLoggerError> {
    let env_file = dotenvy::dotenv().ok();
    builder().try_init()?;
    if let Some(path) = env_file {
        ::log::debug!("Loaded environment from {}", path.display());
    }
    Ok(())
}

pub fn init_logging() {
    if let Err(e) = try_init_logging() {
        eprintln!("Logger already initialised: {e}");
    }
}
