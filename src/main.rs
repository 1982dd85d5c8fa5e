fn main() {
    if let Err(err) = resdeck::cli::main() {
        eprintln!("❌ {err}");
        std::process::exit(1);
    }
}
