//! Port traits the domain talks to.

pub mod action_state_port;
pub mod config_port;
pub mod data_port;
pub mod report_port;
