use snipexport::constants::DEFAULT_LOG_FILTER;
use snipexport::{cli, reporter::Reporter};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let program = env::args_os()
        .next()
        .map(|arg0| arg0.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    let mut reporter = Reporter::stderr(program);

    process::exit(cli::run(env::args_os(), &mut reporter));
}
