// src/lib.rs
//! Component health registry with a minimal HTTP probe endpoint.
//!
//! Components report themselves healthy or unhealthy on a [`health::Checker`];
//! a [`server::ProbeServer`] answers every TCP connection with `200 OK` while
//! all components are healthy and `503 SERVICE UNAVAILABLE` otherwise, with a
//! JSON breakdown of the components as the body.
pub mod config;
pub mod health;
pub mod server;
