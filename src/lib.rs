//! # C# ambience
//!
//! Turns resolved semantic-model entities (types, members, variables) into
//! the declaration text an editor shows in tooltips and quick-info panels:
//!
//! ```text
//! public static int Foo(string bar, int baz)
//! ```
//!
//! Conversion goes entity → declaration syntax ([`syntax`]) → text
//! ([`renderer`]), orchestrated by [`CSharpAmbience`] under a set of
//! [`ConversionFlags`].

pub mod ambience;
pub mod error;
pub mod model;
pub mod renderer;
pub mod syntax;

pub use ambience::*;
pub use error::*;
pub use model::*;

#[cfg(test)]
mod tests;
