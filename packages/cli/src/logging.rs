use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise the storefront crates log at `info`,
/// or `debug` with `verbose`.
pub fn init(verbose: bool) {
    let default = if verbose {
        "storefront=debug,storefront_stores=debug,storefront_http=debug"
    } else {
        "storefront=info,storefront_stores=info,storefront_http=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
