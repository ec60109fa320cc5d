//! Bacheo Core - Domain models, geometry engine, and configuration
//!
//! This crate contains the pothole record model, the measurement-driven
//! polygon engine, and the layered configuration shared by every adapter.

pub mod config;
pub mod error;
pub mod geometry;
pub mod models;

pub use error::{BacheoError, Result};
