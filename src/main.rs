fn main() {
    if let Err(e) = modelselect::cli::run_cli() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
