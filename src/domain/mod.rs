// Domain layer - File name rules and media descriptions

pub mod errors;
pub mod merge;
pub mod model;
pub mod rules;
