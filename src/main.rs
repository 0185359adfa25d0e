//! `hookgen` command line entry point.

fn main() {
    hookgen::init_tracing();
    let code = hookgen::run_cli(std::env::args().collect());
    std::process::exit(code);
}
