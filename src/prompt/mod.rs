//! Prompt module
//!
//! Builds generation instructions from the static corpus and normalizes
//! completion text back into odai lists

pub mod builder;
pub mod catalog;
pub mod parser;

pub use builder::{build_prompt, build_prompt_with_rng};
pub use parser::parse_response;
