//! Generate JSON Schema for the form-modal configuration
//!
//! Prints the schema of `form_modal::config::Config` so editors can
//! validate and complete config files.
//!
//! Usage:
//!   cargo run --features dev-bins --bin generate_schema > config-schema.json

use form_modal::config::Config;
use schemars::schema_for;

fn main() {
    let schema = schema_for!(Config);
    let json = serde_json::to_string_pretty(&schema).expect("Failed to serialize schema");
    println!("{}", json);
}
