// Library exports for dashboard-server
// This allows other crates in the workspace to use dashboard-server modules

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod state;
