// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive catalog
// manager.
//
// Module responsibilities:
// - `catalog`: Core data model (`Book`, `Status`) and the `Catalog`
//   operations (add, remove, search, list, change status) plus year
//   validation.
// - `storage`: The `Storage` trait and the JSON file backend the catalog
//   persists through.
// - `ui`: Implements the terminal menu flows and delegates everything
//   else to `catalog`.
//
// Keeping this separation makes it easier to test the catalog logic
// against an in-memory backend or replace the UI in the future.
pub mod catalog;
pub mod storage;
pub mod ui;
