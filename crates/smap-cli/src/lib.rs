//! CLI library components for the semantic mapping workstation.

pub mod logging;
pub mod review;
