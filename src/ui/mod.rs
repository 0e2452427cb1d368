//! Terminal presentation: command parsing, colors and text rendering.

pub mod commands;
pub mod theme;
pub mod view;
