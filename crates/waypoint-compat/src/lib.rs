//! File, CLI and HTTP front ends for `waypoint-core`.

pub mod config;
pub mod input;
pub mod output;
pub mod server;
