//! Variable resolution and escape processing

pub mod escape;
pub mod resolver;

pub use escape::unescape;
pub use resolver::Resolver;
