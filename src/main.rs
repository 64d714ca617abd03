fn main() {
    if let Err(e) = attrgen::cli::run_cli() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
