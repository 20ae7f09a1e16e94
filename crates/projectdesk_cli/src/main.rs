//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `projectdesk_core` linkage.
//! - Open an in-memory database and report the applied schema version.

use projectdesk_core::db::migrations::latest_version;
use projectdesk_core::{core_version, open_db_in_memory};

fn main() {
    println!("projectdesk_core version={}", core_version());
    match open_db_in_memory() {
        Ok(_conn) => println!("schema_version={}", latest_version()),
        Err(err) => {
            eprintln!("database bootstrap failed: {err}");
            std::process::exit(1);
        }
    }
}
