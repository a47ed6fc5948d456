pub mod ast;
pub mod builder;
pub mod modifiers;
pub mod operators;

pub use ast::*;
pub use builder::*;
pub use modifiers::*;
pub use operators::*;
