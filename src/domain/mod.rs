//! Core domain types and logic.

pub mod config;
pub mod config_validation;
pub mod error;
pub mod indicator;
pub mod screening;
pub mod series;
pub mod strategy;
pub mod universe;
