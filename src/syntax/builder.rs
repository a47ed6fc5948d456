use crate::error::{AmbienceError, Result};
use crate::model::*;
use crate::syntax::ast::*;
use crate::syntax::modifiers::Modifiers;
use crate::syntax::operators::OperatorType;

/// Converts resolved types to [`AstType`]. Needs no resolve context.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeBuilder {
    /// `List<int>` instead of `System.Collections.Generic.List<int>`.
    pub always_use_short_type_names: bool,
}

impl TypeBuilder {
    pub fn new(always_use_short_type_names: bool) -> Self {
        Self {
            always_use_short_type_names,
        }
    }

    pub fn convert_type(&self, ty: &ResolvedType) -> AstType {
        match ty {
            ResolvedType::Definition(definition) => {
                if definition.declaring_type.is_none() && definition.type_arguments.is_empty() {
                    if let Some(keyword) = builtin_keyword(&definition.namespace, &definition.name) {
                        return AstType::Primitive(keyword);
                    }
                }
                if let Some(underlying) =
                    nullable_argument(definition.root_namespace(), &definition.name, &definition.type_arguments)
                {
                    return AstType::Nullable(Box::new(self.convert_type(underlying)));
                }
                self.convert_definition(definition)
            }
            ResolvedType::Unknown {
                namespace,
                name,
                type_arguments,
            } => {
                if let Some(underlying) = nullable_argument(namespace, name, type_arguments) {
                    return AstType::Nullable(Box::new(self.convert_type(underlying)));
                }
                let mut segments: Vec<&str> = name.split('.').collect();
                let last = segments.pop().unwrap_or_default();
                let mut target = self.namespace_type(namespace);
                for segment in segments {
                    target = Some(match target {
                        Some(target) => target.member(segment, Vec::new()),
                        None => AstType::simple(segment),
                    });
                }
                self.attach(target, last, type_arguments)
            }
            ResolvedType::TypeParameter { name } => AstType::simple(name.as_str()),
            ResolvedType::Array { element, rank } => AstType::Array {
                element: Box::new(self.convert_type(element)),
                rank: *rank,
            },
            ResolvedType::Pointer(element) => AstType::Pointer(Box::new(self.convert_type(element))),
            // By-reference is a parameter modifier in C#, not part of the type.
            ResolvedType::ByReference(element) => self.convert_type(element),
        }
    }

    fn convert_definition(&self, definition: &DefinitionType) -> AstType {
        let target = match &definition.declaring_type {
            Some(outer) => Some(self.convert_definition(outer)),
            None => self.namespace_type(&definition.namespace),
        };
        self.attach(target, &definition.name, &definition.type_arguments)
    }

    fn attach(&self, target: Option<AstType>, name: &str, type_arguments: &[ResolvedType]) -> AstType {
        let type_arguments = type_arguments.iter().map(|arg| self.convert_type(arg)).collect();
        match target {
            Some(target) => target.member(name, type_arguments),
            None => AstType::Simple {
                identifier: name.to_string(),
                type_arguments,
            },
        }
    }

    fn namespace_type(&self, namespace: &str) -> Option<AstType> {
        if self.always_use_short_type_names || namespace.is_empty() {
            return None;
        }
        let mut parts = namespace.split('.');
        let first = AstType::simple(parts.next()?);
        Some(parts.fold(first, |target, part| target.member(part, Vec::new())))
    }
}

fn nullable_argument<'a>(
    namespace: &str,
    name: &str,
    type_arguments: &'a [ResolvedType],
) -> Option<&'a ResolvedType> {
    match type_arguments {
        [underlying] if namespace == "System" && name == "Nullable" => Some(underlying),
        _ => None,
    }
}

/// Builds declaration syntax for entities of one project content.
///
/// The `show_*` switches decide which parts of the semantic model make it
/// into the node at all; the ambience then decides which parts of the node
/// get printed.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationBuilder<'a> {
    context: &'a ProjectContent,
    pub types: TypeBuilder,
    pub show_modifiers: bool,
    pub show_accessibility: bool,
    pub show_parameter_names: bool,
}

impl<'a> DeclarationBuilder<'a> {
    pub fn new(context: &'a ProjectContent) -> Self {
        Self {
            context,
            types: TypeBuilder::default(),
            show_modifiers: true,
            show_accessibility: true,
            show_parameter_names: true,
        }
    }

    pub fn convert_type_reference(&self, reference: &TypeReference) -> AstType {
        self.types.convert_type(&self.context.resolve(reference))
    }

    /// Header node of a class, struct, interface, enum or module. Delegates
    /// are declared through their `Invoke` signature and have no header.
    pub fn convert_type_definition(&self, definition: &TypeDefinition) -> Result<TypeDeclaration> {
        let class_type = match definition.kind {
            TypeKind::Class => ClassType::Class,
            TypeKind::Struct => ClassType::Struct,
            TypeKind::Interface => ClassType::Interface,
            TypeKind::Enum => ClassType::Enum,
            TypeKind::Module => ClassType::Module,
            TypeKind::Delegate => {
                return Err(AmbienceError::InternalInconsistency(format!(
                    "{} is a delegate and has no type declaration header",
                    definition.name
                )))
            }
        };

        Ok(TypeDeclaration {
            modifiers: self.type_modifiers(definition),
            class_type,
            name: definition.name.clone(),
            type_parameters: self.convert_type_parameters(&definition.type_parameters),
        })
    }

    pub fn convert_member(&self, member: &Member) -> Result<MemberDeclaration> {
        let declaring = self.type_definition(member.declaring_type())?;

        let return_type = match member.kind {
            MemberKind::Constructor | MemberKind::Destructor => None,
            MemberKind::Operator
                if OperatorType::from_identifier(&member.name).is_some_and(OperatorType::is_conversion) =>
            {
                None
            }
            _ => Some(self.convert_type_reference(&member.return_type)),
        };

        let type_parameters = if member.kind == MemberKind::Method {
            self.convert_type_parameters(&member.type_parameters)
        } else {
            Vec::new()
        };

        let parameters = if member.kind.is_parameterized() {
            member.parameters.iter().map(|p| self.convert_parameter(p)).collect()
        } else {
            Vec::new()
        };

        Ok(MemberDeclaration {
            kind: member.kind,
            modifiers: self.member_modifiers(member, declaring),
            return_type,
            name: member.name.clone(),
            type_parameters,
            parameters,
        })
    }

    pub fn convert_parameter(&self, parameter: &Parameter) -> ParameterDeclaration {
        let (parameter_type, modifier) = match self.context.resolve(&parameter.parameter_type) {
            ResolvedType::ByReference(element) => (
                self.types.convert_type(&element),
                parameter.modifier.or(Some(ParameterModifier::Ref)),
            ),
            resolved => (self.types.convert_type(&resolved), parameter.modifier),
        };

        ParameterDeclaration {
            modifier,
            parameter_type,
            name: self.show_parameter_names.then(|| parameter.name.clone()),
        }
    }

    pub fn convert_variable(&self, variable: &Variable) -> VariableNode {
        if let Some(modifier) = variable.modifier {
            let parameter = Parameter::new(variable.name.clone(), variable.variable_type.clone())
                .with_modifier(modifier);
            return VariableNode::Parameter(self.convert_parameter(&parameter));
        }

        let modifiers = if self.show_modifiers && variable.is_const {
            Modifiers::CONST
        } else {
            Modifiers::NONE
        };

        VariableNode::Statement(VariableDeclarationStatement {
            modifiers,
            variable_type: self.convert_type_reference(&variable.variable_type),
            name: variable.name.clone(),
            initializer: if variable.is_const {
                variable.constant_value.clone()
            } else {
                None
            },
        })
    }

    pub fn convert_type_parameters(&self, type_parameters: &[TypeParameter]) -> Vec<TypeParameterDeclaration> {
        type_parameters
            .iter()
            .map(|tp| TypeParameterDeclaration {
                name: tp.name.clone(),
                variance: tp.variance,
            })
            .collect()
    }

    fn type_definition(&self, id: TypeId) -> Result<&'a TypeDefinition> {
        self.context.type_definition(id).ok_or_else(|| {
            AmbienceError::InternalInconsistency(format!("no type definition for handle {:?}", id))
        })
    }

    fn type_modifiers(&self, definition: &TypeDefinition) -> Modifiers {
        let mut modifiers = Modifiers::NONE;
        if self.show_accessibility {
            modifiers |= Modifiers::from_accessibility(definition.accessibility);
        }
        if !self.show_modifiers {
            return modifiers;
        }

        let is_class = definition.kind == TypeKind::Class;
        let is_abstract = definition.has_modifier(EntityModifier::Abstract);
        let is_sealed = definition.has_modifier(EntityModifier::Sealed);
        if definition.has_modifier(EntityModifier::Static) || (is_class && is_abstract && is_sealed) {
            modifiers |= Modifiers::STATIC;
        } else if is_class {
            if is_abstract {
                modifiers |= Modifiers::ABSTRACT;
            }
            if is_sealed {
                modifiers |= Modifiers::SEALED;
            }
        }
        for (entity_modifier, modifier) in [
            (EntityModifier::New, Modifiers::NEW),
            (EntityModifier::Unsafe, Modifiers::UNSAFE),
            (EntityModifier::Partial, Modifiers::PARTIAL),
        ] {
            if definition.has_modifier(entity_modifier) {
                modifiers |= modifier;
            }
        }
        modifiers
    }

    fn member_modifiers(&self, member: &Member, declaring: &TypeDefinition) -> Modifiers {
        // Finalizers take no modifiers at all.
        if member.kind == MemberKind::Destructor {
            return Modifiers::NONE;
        }

        let is_interface_member = declaring.kind == TypeKind::Interface;
        let is_static = member.has_modifier(EntityModifier::Static);
        let is_static_constructor = member.kind == MemberKind::Constructor && is_static;

        let mut modifiers = Modifiers::NONE;
        if self.show_accessibility && !is_interface_member && !is_static_constructor {
            modifiers |= Modifiers::from_accessibility(member.accessibility);
        }
        if !self.show_modifiers {
            return modifiers;
        }

        let is_const = member.has_modifier(EntityModifier::Const);
        if is_static {
            // Constants are implicitly static.
            if !is_const {
                modifiers |= Modifiers::STATIC;
            }
        } else {
            let is_abstract = member.has_modifier(EntityModifier::Abstract);
            let is_override = member.has_modifier(EntityModifier::Override);
            if is_abstract && !is_interface_member {
                modifiers |= Modifiers::ABSTRACT;
            }
            if is_override {
                modifiers |= Modifiers::OVERRIDE;
            }
            if member.has_modifier(EntityModifier::Virtual) && !is_abstract && !is_override {
                modifiers |= Modifiers::VIRTUAL;
            }
            if member.has_modifier(EntityModifier::Sealed) {
                modifiers |= Modifiers::SEALED;
            }
        }
        for (entity_modifier, modifier) in [
            (EntityModifier::New, Modifiers::NEW),
            (EntityModifier::Readonly, Modifiers::READONLY),
            (EntityModifier::Const, Modifiers::CONST),
            (EntityModifier::Volatile, Modifiers::VOLATILE),
            (EntityModifier::Extern, Modifiers::EXTERN),
            (EntityModifier::Unsafe, Modifiers::UNSAFE),
            (EntityModifier::Partial, Modifiers::PARTIAL),
            (EntityModifier::Fixed, Modifiers::FIXED),
        ] {
            if member.has_modifier(entity_modifier) {
                modifiers |= modifier;
            }
        }
        modifiers
    }
}
