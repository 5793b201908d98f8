//! UI utilities for terminal output
//!
//! This module provides the progress spinner shown during long operations.

mod spinner;

pub use spinner::{create_spinner, finish_spinner};
