//! The `diary` binary is a thin shell around [`cli::run`]: everything
//! terminal-related lives in `cli/`, everything else in the `diary` library.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
