fn main() {
    if let Err(e) = stitch_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
