// Stormwatch - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library, serde, chrono.
// Must NOT depend on: ui, platform, app, net, or any I/O crate directly.

pub mod alerts;
pub mod conditions;
pub mod export;
pub mod fixtures;
pub mod forecast;
pub mod model;
