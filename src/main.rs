fn main() {
    if let Err(err) = binpick::cli::run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
