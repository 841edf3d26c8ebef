//! Utility functions for the application

pub mod retry;
