//! CLI command implementations

pub mod utils;

pub mod completions;
pub mod forecast;
pub mod mtbf;
pub mod normalize;
pub mod report;
pub mod summary;
pub mod template;
pub mod validate;
