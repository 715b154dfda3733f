fn main() {
    if let Err(err) = denote_menu::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
