//! Short binary name (`dm`) that forwards to the `denote_menu` library.
//! Keeping the alias as a real binary avoids shell alias requirements.

fn main() {
    if let Err(err) = denote_menu::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
