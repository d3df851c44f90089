fn main() {
    if let Err(err) = formtag::run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
