//! Generate an ebInterface invoice from a JSON request.
//!
//! ```text
//! cargo run --example generate -- demos/invoice.json [config.json]
//! RUST_LOG=ebrechnung=debug cargo run --example generate -- demos/invoice.json
//! ```
//!
//! Prints the XML on success, or the error envelope on stderr.

use std::process::ExitCode;

use ebrechnung::{CodecConfig, transform_json};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    let mut args = std::env::args().skip(1);
    let Some(request_path) = args.next() else {
        eprintln!("usage: generate <request.json> [config.json]");
        return ExitCode::from(2);
    };

    let config = match args.next() {
        Some(path) => {
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|s| CodecConfig::from_json(&s).map_err(|e| e.to_string()));
            match loaded {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("cannot load config {path}: {e}");
                    return ExitCode::from(2);
                }
            }
        }
        None => CodecConfig::default(),
    };

    let body = match std::fs::read(&request_path) {
        Ok(body) => body,
        Err(e) => {
            eprintln!("cannot read {request_path}: {e}");
            return ExitCode::from(2);
        }
    };

    match transform_json(&body, &config) {
        Ok(xml) => {
            println!("{}", String::from_utf8_lossy(&xml));
            ExitCode::SUCCESS
        }
        Err(e) => {
            let response = e.response();
            eprintln!("HTTP {}", response.status);
            eprintln!("{}", response.to_json());
            ExitCode::FAILURE
        }
    }
}
