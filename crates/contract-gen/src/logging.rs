use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "contract_gen=info";

/// Installs the stderr subscriber. `RUST_LOG` adds to the default directive.
pub fn init() {
    let filter = match DEFAULT_DIRECTIVE.parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();
}
