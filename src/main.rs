fn main() {
    if let Err(err) = fingraph_hover::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
