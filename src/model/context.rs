use std::collections::{HashMap, HashSet};
use std::ops::Deref;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::ModelError;
use crate::model::parser::{MemberDocument, TypeDocument};
use crate::model::types::*;

/// Read access to the semantic model.
///
/// Every public ambience entry point calls [`synchronize`](Self::synchronize)
/// exactly once and keeps the returned guard for the whole conversion, so the
/// model cannot change underneath a half-printed declaration.
pub trait TypeResolveContext {
    type Synchronized<'a>: Deref<Target = ProjectContent>
    where
        Self: 'a;

    fn synchronize(&self) -> Self::Synchronized<'_>;
}

/// All type definitions of one project, flattened into an arena.
#[derive(Debug, Default, Clone)]
pub struct ProjectContent {
    types: Vec<TypeDefinition>,
    by_name: HashMap<(String, usize), TypeId>,
}

impl ProjectContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type definition (and, recursively, its nested types).
    ///
    /// The whole document is checked before anything is registered, so a
    /// rejected document leaves the content untouched.
    pub fn add_type(
        &mut self,
        document: TypeDocument,
        declaring_type: Option<TypeId>,
    ) -> Result<TypeId, ModelError> {
        let (namespace, outer_name) = match declaring_type {
            Some(id) => {
                let outer = self
                    .type_definition(id)
                    .ok_or(ModelError::UnknownDeclaringType(id))?;
                (outer.namespace.clone(), Some(self.reflection_name(outer)))
            }
            None => (document.namespace.clone(), None),
        };

        let mut pending = HashSet::new();
        self.validate_document(&document, &namespace, outer_name.as_deref(), &mut pending)?;
        Ok(self.insert_type(document, namespace, declaring_type))
    }

    fn validate_document(
        &self,
        document: &TypeDocument,
        namespace: &str,
        outer_name: Option<&str>,
        pending: &mut HashSet<(String, usize)>,
    ) -> Result<(), ModelError> {
        validate_name(&document.name)?;
        let key = (
            qualified_name(namespace, outer_name, &document.name),
            document.type_parameters.len(),
        );
        if self.by_name.contains_key(&key) || !pending.insert(key.clone()) {
            return Err(ModelError::DuplicateType(key.0));
        }
        if document.members.iter().any(|member| member.name.is_empty()) {
            return Err(ModelError::InvalidName {
                name: String::new(),
                reason: "member names must not be empty",
            });
        }
        for nested in &document.nested_types {
            self.validate_document(nested, namespace, Some(&key.0), pending)?;
        }
        Ok(())
    }

    fn insert_type(&mut self, document: TypeDocument, namespace: String, declaring_type: Option<TypeId>) -> TypeId {
        let id = TypeId(self.types.len());
        let outer_name = declaring_type
            .and_then(|outer| self.type_definition(outer))
            .map(|outer| self.reflection_name(outer));
        let key = (
            qualified_name(&namespace, outer_name.as_deref(), &document.name),
            document.type_parameters.len(),
        );

        let TypeDocument {
            kind,
            name,
            accessibility,
            modifiers,
            type_parameters,
            members,
            nested_types,
            ..
        } = document;

        let members: Vec<Member> = members
            .into_iter()
            .enumerate()
            .map(|(index, member)| {
                into_member(
                    member,
                    MemberId {
                        declaring_type: id,
                        index,
                    },
                )
            })
            .collect();

        tracing::trace!(name = %key.0, ?id, "registering type definition");
        self.by_name.insert(key, id);
        self.types.push(TypeDefinition {
            id,
            kind,
            namespace: namespace.clone(),
            name,
            accessibility,
            modifiers,
            type_parameters,
            declaring_type,
            nested_types: Vec::new(),
            members,
        });

        if let Some(outer) = declaring_type.and_then(|outer| self.types.get_mut(outer.0)) {
            outer.nested_types.push(id);
        }
        for nested in nested_types {
            self.insert_type(nested, namespace.clone(), Some(id));
        }

        id
    }

    /// `Namespace.Outer+Inner`, the form [`TypeReference::Named`] uses.
    pub fn reflection_name(&self, definition: &TypeDefinition) -> String {
        let outer_name = definition
            .declaring_type
            .and_then(|outer| self.type_definition(outer))
            .map(|outer| self.reflection_name(outer));
        qualified_name(&definition.namespace, outer_name.as_deref(), &definition.name)
    }

    pub fn type_definition(&self, id: TypeId) -> Option<&TypeDefinition> {
        self.types.get(id.0)
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.type_definition(id.declaring_type)
            .and_then(|definition| definition.members.get(id.index))
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.iter()
    }

    pub fn top_level_types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.iter().filter(|t| t.declaring_type.is_none())
    }

    pub fn find_type(&self, reflection_name: &str, type_parameter_count: usize) -> Option<TypeId> {
        self.by_name
            .get(&(reflection_name.to_string(), type_parameter_count))
            .copied()
    }

    /// The type a definition declares, with its own type parameters as
    /// arguments (`List<T>` for `List<T>`).
    pub fn definition_type(&self, id: TypeId) -> Option<DefinitionType> {
        let definition = self.type_definition(id)?;
        let declaring_type = match definition.declaring_type {
            Some(outer) => Some(Box::new(self.definition_type(outer)?)),
            None => None,
        };
        Some(DefinitionType {
            namespace: definition.namespace.clone(),
            name: definition.name.clone(),
            declaring_type,
            type_arguments: definition
                .type_parameters
                .iter()
                .map(|tp| ResolvedType::TypeParameter {
                    name: tp.name.clone(),
                })
                .collect(),
        })
    }

    pub fn resolve(&self, reference: &TypeReference) -> ResolvedType {
        match reference {
            TypeReference::Named {
                name,
                type_arguments,
            } => {
                let arguments: Vec<ResolvedType> =
                    type_arguments.iter().map(|arg| self.resolve(arg)).collect();
                if let Some(mut definition) = self
                    .find_type(name, type_arguments.len())
                    .and_then(|id| self.definition_type(id))
                {
                    definition.type_arguments = arguments;
                    return ResolvedType::Definition(definition);
                }

                let (namespace, path) = split_reflection_name(name);
                if arguments.is_empty() && path.len() == 1 && builtin_keyword(namespace, path[0]).is_some() {
                    return ResolvedType::builtin(path[0]);
                }

                tracing::trace!(%name, "type reference did not resolve");
                ResolvedType::Unknown {
                    namespace: namespace.to_string(),
                    name: path.join("."),
                    type_arguments: arguments,
                }
            }
            TypeReference::TypeParameter { name } => {
                ResolvedType::TypeParameter { name: name.clone() }
            }
            TypeReference::Array { element, rank } => ResolvedType::Array {
                element: Box::new(self.resolve(element)),
                rank: *rank,
            },
            TypeReference::Pointer { element } => {
                ResolvedType::Pointer(Box::new(self.resolve(element)))
            }
            TypeReference::ByReference { element } => {
                ResolvedType::ByReference(Box::new(self.resolve(element)))
            }
        }
    }
}

fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.is_empty() {
        return Err(ModelError::InvalidName {
            name: name.to_string(),
            reason: "type names must not be empty",
        });
    }
    if name.contains(['.', '+']) {
        return Err(ModelError::InvalidName {
            name: name.to_string(),
            reason: "nest types instead of using qualified names",
        });
    }
    Ok(())
}

fn qualified_name(namespace: &str, outer_name: Option<&str>, name: &str) -> String {
    match outer_name {
        Some(outer) => format!("{}+{}", outer, name),
        None if namespace.is_empty() => name.to_string(),
        None => format!("{}.{}", namespace, name),
    }
}

fn into_member(document: MemberDocument, id: MemberId) -> Member {
    Member {
        id,
        kind: document.kind,
        name: document.name,
        accessibility: document.accessibility,
        modifiers: document.modifiers,
        return_type: document.return_type,
        parameters: document.parameters,
        type_parameters: document.type_parameters,
    }
}

impl TypeResolveContext for ProjectContent {
    type Synchronized<'a> = &'a ProjectContent;

    fn synchronize(&self) -> Self::Synchronized<'_> {
        self
    }
}

/// Project content shared between threads. Conversions take the read lock;
/// model updates take the write lock.
#[derive(Debug, Default)]
pub struct SharedProjectContent {
    inner: RwLock<ProjectContent>,
}

impl SharedProjectContent {
    pub fn new(content: ProjectContent) -> Self {
        Self {
            inner: RwLock::new(content),
        }
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, ProjectContent> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TypeResolveContext for SharedProjectContent {
    type Synchronized<'a> = RwLockReadGuard<'a, ProjectContent>;

    fn synchronize(&self) -> Self::Synchronized<'_> {
        // Readers never leave the model half-written, so a poisoned lock is
        // still safe to read from.
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}
