pub mod build_info;
pub mod paths;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

/// Directives applied when the configuration does not name any.
pub const DEFAULT_LOG_FILTER: &str = "showbudget=info";

/// Installs the global fmt subscriber on stderr. `filter` holds comma-separated directives
/// added on top of `RUST_LOG`; directives that do not parse are skipped.
pub fn init_tracing(filter: &str) {
    let filter = parse_directives(filter)
        .into_iter()
        .fold(EnvFilter::from_default_env(), EnvFilter::add_directive);

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn parse_directives(filter: &str) -> Vec<Directive> {
    let directives: Vec<Directive> = filter
        .split(',')
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .filter_map(|raw| raw.parse().ok())
        .collect();
    if directives.is_empty() && filter != DEFAULT_LOG_FILTER {
        return parse_directives(DEFAULT_LOG_FILTER);
    }
    directives
}
