// tests/integration/main.rs
#[path = "../common/mod.rs"]
mod common;

mod config_tests;
mod enrollment_tests;
