use tracing_subscriber::EnvFilter;

/// Installs the global subscriber for the interactive binary.
///
/// Timestamps are suppressed: log lines share the terminal with prompts and
/// report output. `RUST_LOG` overrides the default directive.
pub fn init_cli_logger(verbose: bool) {
    let default_directive = if verbose {
        "bikeshare_explorer=debug"
    } else {
        "bikeshare_explorer=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}
