//! Core library components.
//!
//! The spreading engine and everything it depends on: the variable domain
//! model, platform backends, scope name resolution and configuration.

pub mod config;
pub mod constants;
pub mod domain;
pub mod driver;
pub mod naming;
pub mod platform;
pub mod resolver;
pub mod spread;
pub mod types;
