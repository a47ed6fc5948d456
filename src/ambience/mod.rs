pub mod csharp;
pub mod flags;

pub use csharp::*;
pub use flags::*;

use crate::error::Result;
use crate::model::{EntityHandle, ResolvedType, TypeReference, TypeResolveContext, Variable};

/// Converts semantic-model entities into declaration text for one language.
pub trait Ambience {
    fn conversion_flags(&self) -> ConversionFlags;

    fn set_conversion_flags(&mut self, flags: ConversionFlags);

    /// Declaration header of a type definition or member, e.g.
    /// `public static int Foo(string bar)`.
    fn convert_entity<C: TypeResolveContext>(&self, entity: EntityHandle, context: &C) -> Result<String>;

    fn convert_variable<C: TypeResolveContext>(&self, variable: &Variable, context: &C) -> String;

    fn convert_type(&self, ty: &ResolvedType) -> String;

    fn convert_type_reference<C: TypeResolveContext>(&self, reference: &TypeReference, context: &C) -> String;

    fn wrap_attribute(&self, attribute: &str) -> String;

    fn wrap_comment(&self, comment: &str) -> String;
}
