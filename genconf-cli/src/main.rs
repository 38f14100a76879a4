//! Binary entrypoint for fc-genconf

fn main() {
    if let Err(err) = genconf_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
