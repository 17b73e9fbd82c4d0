// Shared test utilities

pub mod harness;
