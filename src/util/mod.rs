//! Shared utilities.

pub mod score_color;
