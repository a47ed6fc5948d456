use crate::model::{ConstantValue, MemberKind, ParameterModifier, Variance};
use crate::syntax::modifiers::Modifiers;

// Declaration syntax built from the semantic model. Nodes are created for a
// single conversion and thrown away once rendered.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstType {
    /// `int`, `string`, `void`, ...
    Primitive(&'static str),
    Simple {
        identifier: String,
        type_arguments: Vec<AstType>,
    },
    /// `Target.Name`, used for namespaces and enclosing types alike.
    Member {
        target: Box<AstType>,
        member_name: String,
        type_arguments: Vec<AstType>,
    },
    Array {
        element: Box<AstType>,
        rank: usize,
    },
    Pointer(Box<AstType>),
    Nullable(Box<AstType>),
}

impl AstType {
    pub fn simple(identifier: impl Into<String>) -> Self {
        AstType::Simple {
            identifier: identifier.into(),
            type_arguments: Vec::new(),
        }
    }

    pub fn member(self, member_name: impl Into<String>, type_arguments: Vec<AstType>) -> Self {
        AstType::Member {
            target: Box::new(self),
            member_name: member_name.into(),
            type_arguments,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassType {
    Class,
    Struct,
    Interface,
    Enum,
    Module,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameterDeclaration {
    pub name: String,
    pub variance: Variance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDeclaration {
    pub modifier: Option<ParameterModifier>,
    pub parameter_type: AstType,
    /// `None` when parameter names are hidden.
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub modifiers: Modifiers,
    pub class_type: ClassType,
    pub name: String,
    pub type_parameters: Vec<TypeParameterDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDeclaration {
    pub kind: MemberKind,
    pub modifiers: Modifiers,
    /// Absent for constructors, destructors and conversion operators.
    pub return_type: Option<AstType>,
    pub name: String,
    pub type_parameters: Vec<TypeParameterDeclaration>,
    pub parameters: Vec<ParameterDeclaration>,
}

impl MemberDeclaration {
    pub fn is_indexer(&self) -> bool {
        self.kind == MemberKind::Indexer
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarationStatement {
    pub modifiers: Modifiers,
    pub variable_type: AstType,
    pub name: String,
    pub initializer: Option<ConstantValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VariableNode {
    Statement(VariableDeclarationStatement),
    Parameter(ParameterDeclaration),
}
