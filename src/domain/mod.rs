//! Core domain types and logic.

pub mod action;
pub mod error;
pub mod filename;
pub mod indicator;
pub mod report;
pub mod security;
pub mod snapshot;
pub mod strategy;
pub mod stream;
