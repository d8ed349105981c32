//! docbench CLI entry point.

fn main() {
    if let Err(e) = docbench_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
