//! Tools module
//!
//! MCP tool implementations for the Baker's Calculator.

pub mod calculator;
pub mod recipes;
pub mod status;
