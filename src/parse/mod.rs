//! Env file parsing: line splitting and value tokenizing

pub mod lines;
pub mod tokenizer;

pub use lines::parse_lines;
pub use tokenizer::tokenize;
