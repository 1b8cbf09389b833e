pub mod chat;
pub mod config;
pub mod goal;
pub mod mood;
pub mod notify;
pub mod plan;
pub mod stats;
pub mod task;
pub mod timer;

use serde::Serialize;

/// Every command writes one pretty-printed JSON document to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
