//! Build pipeline for the Corona theme.
//!
//! Concatenates style-sheet fragments into `theme.css` (see [`assembler`])
//! and optionally mirrors the result into an external theme directory
//! (see [`mirror`]). [`pipeline::run_build`] ties the two together.

pub mod assembler;
pub mod mirror;
pub mod pipeline;
