pub mod limit;
pub mod parse;
