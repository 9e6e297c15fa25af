//! Logging initialization

/// Initialize logging based on debug flag
///
/// Logs go to stderr so stdout carries only the report. Without the debug
/// flag nothing is installed and the tool stays silent.
pub fn init_logging(debug: bool) {
    if !debug {
        return;
    }

    let result = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .try_init();

    if let Err(e) = result {
        eprintln!("Failed to initialize debug logging: {}", e);
    }
}
