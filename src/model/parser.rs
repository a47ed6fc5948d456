use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ModelError;
use crate::model::context::ProjectContent;
use crate::model::types::*;

// Snapshot format: the semantic model as an already-resolved JSON tree.

#[derive(Debug, Deserialize)]
pub struct AssemblyDocument {
    #[serde(default)]
    pub name: Option<String>,
    pub types: Vec<TypeDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeDocument {
    /// Ignored for nested types, which live in their outer type's namespace.
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub modifiers: Vec<EntityModifier>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub members: Vec<MemberDocument>,
    #[serde(default)]
    pub nested_types: Vec<TypeDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberDocument {
    pub kind: MemberKind,
    pub name: String,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub modifiers: Vec<EntityModifier>,
    #[serde(default)]
    pub return_type: TypeReference,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
}

/// Loads model snapshots into a [`ProjectContent`].
pub struct AssemblyParser;

impl AssemblyParser {
    pub fn from_path(path: impl AsRef<Path>) -> Result<ProjectContent, ModelError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading model snapshot");
        let json = fs::read_to_string(path)?;
        Self::from_str(&json)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> Result<ProjectContent, ModelError> {
        let document: AssemblyDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    pub fn from_value(value: serde_json::Value) -> Result<ProjectContent, ModelError> {
        let document: AssemblyDocument = serde_json::from_value(value)?;
        Self::from_document(document)
    }

    pub fn from_document(document: AssemblyDocument) -> Result<ProjectContent, ModelError> {
        let mut content = ProjectContent::new();
        for type_document in document.types {
            content.add_type(type_document, None)?;
        }
        tracing::debug!(
            assembly = document.name.as_deref().unwrap_or("unnamed"),
            types = content.types().count(),
            "model snapshot loaded"
        );
        Ok(content)
    }
}
