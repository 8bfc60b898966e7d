//! Bridge between the UI command queue and the worker that owns the view state.

pub mod commands;
pub mod runtime;
