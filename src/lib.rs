// Library module for romhasher
// Re-exports modules for use in integration tests and external crates

pub mod catalog;
pub mod hasher;
pub mod ui;
