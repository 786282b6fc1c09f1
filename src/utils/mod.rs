use tracing_subscriber::EnvFilter;

/// Initialize tracing for the hosting process.
///
/// Dev mode lowers the default level to `debug`; `RUST_LOG` overrides both.
/// `json` switches to structured output for log shippers.
pub fn init_tracing(dev_mode: bool, json: bool) {
    let default_level = if dev_mode { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Filesystem-safe timestamp for artifact filenames, e.g. `08232026 14-03-59`.
pub fn filename_timestamp() -> String {
    chrono::Local::now().format("%m%d%Y %H-%M-%S").to_string()
}
