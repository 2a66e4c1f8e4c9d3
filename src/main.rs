fn main() {
    if let Err(error) = earthsight::run_cli() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
