use showbudget::{cli::run_cli, init_with_filter, utils::paths::configured_log_filter};

fn main() {
    init_with_filter(&configured_log_filter());

    if let Err(err) = run_cli() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
