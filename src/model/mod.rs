pub mod context;
pub mod parser;
pub mod types;

pub use context::*;
pub use parser::*;
pub use types::*;
