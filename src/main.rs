use env_logger::{Builder, Env};
use log::error;

fn init_logger() {
    // Level comes from RUST_LOG, otherwise default is warn so the wrapper
    // stays silent in front of the program it runs.
    // Example: RUST_LOG=debug snapwrap vi notes.txt
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    match snapwrap::cli::run() {
        // On the normal path this is the target program's own exit code.
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    }
}
