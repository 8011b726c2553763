//! Progress indicators for long-running dockets

pub mod reporter;
