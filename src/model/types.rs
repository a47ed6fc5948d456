use serde::Deserialize;
use std::fmt;

/// Index of a type definition inside a [`ProjectContent`](super::ProjectContent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub usize);

/// A member is addressed by its declaring type and its position in that type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberId {
    pub declaring_type: TypeId,
    pub index: usize,
}

/// Handle for anything the ambience can print a declaration header for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityHandle {
    Type(TypeId),
    Member(MemberId),
}

impl From<TypeId> for EntityHandle {
    fn from(id: TypeId) -> Self {
        EntityHandle::Type(id)
    }
}

impl From<MemberId> for EntityHandle {
    fn from(id: MemberId) -> Self {
        EntityHandle::Member(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    #[default]
    None,
    Private,
    Public,
    Protected,
    Internal,
    ProtectedOrInternal,
}

/// Non-accessibility modifiers as the type system reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityModifier {
    Static,
    Abstract,
    Sealed,
    Virtual,
    Override,
    New,
    Readonly,
    Const,
    Volatile,
    Extern,
    Unsafe,
    Partial,
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    /// Static-only container emitted by other .NET languages (VB modules).
    Module,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Method,
    Property,
    Indexer,
    Constructor,
    Destructor,
    Operator,
    Field,
    Event,
}

impl MemberKind {
    /// Kinds that take a parameter list. Properties never do, even when the
    /// type system models them as parameterized.
    pub fn is_parameterized(self) -> bool {
        matches!(
            self,
            MemberKind::Method
                | MemberKind::Constructor
                | MemberKind::Destructor
                | MemberKind::Operator
                | MemberKind::Indexer
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variance {
    #[default]
    Invariant,
    Covariant,
    Contravariant,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeParameter {
    pub name: String,
    #[serde(default)]
    pub variance: Variance,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variance: Variance::Invariant,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterModifier {
    Ref,
    Out,
    Params,
    This,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: TypeReference,
    #[serde(default)]
    pub modifier: Option<ParameterModifier>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, parameter_type: TypeReference) -> Self {
        Self {
            name: name.into(),
            parameter_type,
            modifier: None,
        }
    }

    pub fn with_modifier(mut self, modifier: ParameterModifier) -> Self {
        self.modifier = Some(modifier);
        self
    }
}

/// An unresolved reference to a type, as written in the model snapshot.
///
/// `Named` uses reflection syntax: `System.Collections.Generic.List` for a
/// top-level type and `Acme.Outer+Inner` for a nested one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeReference {
    Named {
        name: String,
        #[serde(default)]
        type_arguments: Vec<TypeReference>,
    },
    TypeParameter {
        name: String,
    },
    Array {
        element: Box<TypeReference>,
        #[serde(default = "default_rank")]
        rank: usize,
    },
    Pointer {
        element: Box<TypeReference>,
    },
    ByReference {
        element: Box<TypeReference>,
    },
}

fn default_rank() -> usize {
    1
}

impl TypeReference {
    pub fn named(name: impl Into<String>) -> Self {
        TypeReference::Named {
            name: name.into(),
            type_arguments: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, type_arguments: Vec<TypeReference>) -> Self {
        TypeReference::Named {
            name: name.into(),
            type_arguments,
        }
    }

    pub fn type_parameter(name: impl Into<String>) -> Self {
        TypeReference::TypeParameter { name: name.into() }
    }

    pub fn array(element: TypeReference, rank: usize) -> Self {
        TypeReference::Array {
            element: Box::new(element),
            rank,
        }
    }

    pub fn void() -> Self {
        Self::named("System.Void")
    }
}

impl Default for TypeReference {
    fn default() -> Self {
        Self::void()
    }
}

/// Splits a reflection name into namespace and the `+`-separated type path.
pub fn split_reflection_name(name: &str) -> (&str, Vec<&str>) {
    let (namespace, path) = match name.split('+').next().and_then(|outer| outer.rfind('.')) {
        Some(dot) => (&name[..dot], &name[dot + 1..]),
        None => ("", name),
    };
    (namespace, path.split('+').collect())
}

/// `System` types that C# spells with a keyword.
pub const BUILTIN_TYPES: &[(&str, &str)] = &[
    ("Object", "object"),
    ("Boolean", "bool"),
    ("Char", "char"),
    ("SByte", "sbyte"),
    ("Byte", "byte"),
    ("Int16", "short"),
    ("UInt16", "ushort"),
    ("Int32", "int"),
    ("UInt32", "uint"),
    ("Int64", "long"),
    ("UInt64", "ulong"),
    ("Single", "float"),
    ("Double", "double"),
    ("Decimal", "decimal"),
    ("String", "string"),
    ("Void", "void"),
];

pub fn builtin_keyword(namespace: &str, name: &str) -> Option<&'static str> {
    if namespace != "System" {
        return None;
    }
    BUILTIN_TYPES
        .iter()
        .find(|(type_name, _)| *type_name == name)
        .map(|(_, keyword)| *keyword)
}

/// A type after resolution. Self-contained: it carries every name needed to
/// print it, so rendering does not need the resolve context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    Definition(DefinitionType),
    /// A reference the context could not resolve; printed as written.
    Unknown {
        namespace: String,
        name: String,
        type_arguments: Vec<ResolvedType>,
    },
    TypeParameter {
        name: String,
    },
    Array {
        element: Box<ResolvedType>,
        rank: usize,
    },
    Pointer(Box<ResolvedType>),
    ByReference(Box<ResolvedType>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionType {
    pub namespace: String,
    pub name: String,
    pub declaring_type: Option<Box<DefinitionType>>,
    pub type_arguments: Vec<ResolvedType>,
}

impl DefinitionType {
    pub fn top_level(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            declaring_type: None,
            type_arguments: Vec::new(),
        }
    }

    /// Namespace of the outermost enclosing type.
    pub fn root_namespace(&self) -> &str {
        match &self.declaring_type {
            Some(outer) => outer.root_namespace(),
            None => &self.namespace,
        }
    }
}

impl ResolvedType {
    pub fn builtin(name: &str) -> Self {
        ResolvedType::Definition(DefinitionType::top_level("System", name))
    }
}

/// Compile-time constant carried by a variable.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Null,
    Bool(bool),
    Integer(i64),
    Char(char),
    String(String),
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Null => write!(f, "null"),
            ConstantValue::Bool(value) => write!(f, "{}", value),
            ConstantValue::Integer(value) => write!(f, "{}", value),
            ConstantValue::Char(value) => write!(f, "'{}'", escape_literal(&value.to_string(), '\'')),
            ConstantValue::String(value) => write!(f, "\"{}\"", escape_literal(value, '"')),
        }
    }
}

fn escape_literal(text: &str, quote: char) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\0' => escaped.push_str("\\0"),
            c if c == quote => {
                escaped.push('\\');
                escaped.push(c);
            }
            c => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    pub id: TypeId,
    pub kind: TypeKind,
    pub namespace: String,
    pub name: String,
    pub accessibility: Accessibility,
    pub modifiers: Vec<EntityModifier>,
    pub type_parameters: Vec<TypeParameter>,
    pub declaring_type: Option<TypeId>,
    pub nested_types: Vec<TypeId>,
    pub members: Vec<Member>,
}

impl TypeDefinition {
    pub fn has_modifier(&self, modifier: EntityModifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub kind: MemberKind,
    pub name: String,
    pub accessibility: Accessibility,
    pub modifiers: Vec<EntityModifier>,
    pub return_type: TypeReference,
    pub parameters: Vec<Parameter>,
    pub type_parameters: Vec<TypeParameter>,
}

impl Member {
    pub fn declaring_type(&self) -> TypeId {
        self.id.declaring_type
    }

    pub fn has_modifier(&self, modifier: EntityModifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

/// A local, constant or parameter. Variables are owned by the caller rather
/// than the project, so they are passed by reference instead of by handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub variable_type: TypeReference,
    pub modifier: Option<ParameterModifier>,
    pub is_const: bool,
    pub constant_value: Option<ConstantValue>,
}

impl Variable {
    pub fn local(name: impl Into<String>, variable_type: TypeReference) -> Self {
        Self {
            name: name.into(),
            variable_type,
            modifier: None,
            is_const: false,
            constant_value: None,
        }
    }

    pub fn constant(name: impl Into<String>, variable_type: TypeReference, value: ConstantValue) -> Self {
        Self {
            is_const: true,
            constant_value: Some(value),
            ..Self::local(name, variable_type)
        }
    }

    pub fn parameter(
        name: impl Into<String>,
        variable_type: TypeReference,
        modifier: ParameterModifier,
    ) -> Self {
        Self {
            modifier: Some(modifier),
            ..Self::local(name, variable_type)
        }
    }
}
