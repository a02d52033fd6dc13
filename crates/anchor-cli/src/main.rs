use std::process;

fn main() {
    match anchor_cli::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("anchor-link error: {err}");
            process::exit(1);
        }
    }
}
