//! LightsTrail HTTP API.
//!
//! Axum server exposing alert-preference CRUD and thin space-weather proxy
//! endpoints, plus the process wiring that hosts the alert scheduler.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
