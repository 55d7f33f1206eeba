//! Shared CLI utilities and types

pub mod api_client;
pub mod completions;
pub mod display;
pub mod oneshot;
