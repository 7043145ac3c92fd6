//! Baker's Calculator (bakerscale) Library
//!
//! Recipe scaling, cooking unit conversion with ingredient densities,
//! baker's percentages, and a saved recipe store.

pub mod build_info;
pub mod config;
pub mod conversion;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod scaling;
pub mod tools;
