use std::process::exit;

fn main() {
    if let Err(e) = oncoview::app::run_cli() {
        eprintln!("error: {e}");
        exit(1);
    }
}
