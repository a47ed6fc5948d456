use tracing::{debug, trace};

use crate::ambience::{Ambience, ConversionFlags};
use crate::error::{AmbienceError, Result};
use crate::model::*;
use crate::renderer::{FormattingOptions, ModifierRenderer, TextRenderer};
use crate::syntax::*;

/// C# ambience.
///
/// Holds nothing but the display options, so one value can be shared freely
/// between threads; every call builds its own syntax and renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CSharpAmbience {
    pub conversion_flags: ConversionFlags,
}

impl CSharpAmbience {
    pub fn new(conversion_flags: ConversionFlags) -> Self {
        Self { conversion_flags }
    }

    fn has(&self, flag: ConversionFlags) -> bool {
        self.conversion_flags.contains(flag)
    }

    fn type_builder(&self) -> TypeBuilder {
        TypeBuilder::new(!self.has(ConversionFlags::USE_FULLY_QUALIFIED_TYPE_NAMES))
    }

    fn create_builder<'a>(&self, context: &'a ProjectContent) -> DeclarationBuilder<'a> {
        let mut builder = DeclarationBuilder::new(context);
        builder.types = self.type_builder();
        builder.show_modifiers = self.has(ConversionFlags::SHOW_MODIFIERS);
        builder.show_accessibility = self.has(ConversionFlags::SHOW_ACCESSIBILITY);
        builder.show_parameter_names = self.has(ConversionFlags::SHOW_PARAMETER_NAMES);
        builder
    }

    fn create_printer(&self) -> TextRenderer {
        TextRenderer::new(FormattingOptions::new())
    }

    fn convert_type_declaration(&self, definition: &TypeDefinition, context: &ProjectContent) -> Result<String> {
        let builder = self.create_builder(context);
        let declaration = builder.convert_type_definition(definition)?;

        let mut output = String::new();
        self.print_modifiers(declaration.modifiers, &mut output);

        if self.has(ConversionFlags::SHOW_DEFINITION_KEYWORD) {
            output.push_str(match declaration.class_type {
                ClassType::Class => "class",
                ClassType::Struct => "struct",
                ClassType::Interface => "interface",
                ClassType::Enum => "enum",
                ClassType::Module => {
                    return Err(AmbienceError::InternalInconsistency(format!(
                        "invalid class type {:?} for {}",
                        declaration.class_type, definition.name
                    )))
                }
            });
            output.push(' ');
        }

        self.write_type_declaration_name(definition, &declaration, &builder, context, &mut output)?;
        Ok(output.trim_end().to_string())
    }

    fn write_type_declaration_name(
        &self,
        definition: &TypeDefinition,
        declaration: &TypeDeclaration,
        builder: &DeclarationBuilder<'_>,
        context: &ProjectContent,
        output: &mut String,
    ) -> Result<()> {
        let mut enclosing = Vec::new();
        let mut outer = definition.declaring_type;
        while let Some(id) = outer {
            let outer_definition = context.type_definition(id).ok_or_else(|| {
                AmbienceError::InternalInconsistency(format!(
                    "enclosing type {:?} of {} is missing",
                    id, definition.name
                ))
            })?;
            enclosing.push(outer_definition);
            outer = outer_definition.declaring_type;
        }

        if enclosing.is_empty()
            && self.has(ConversionFlags::USE_FULLY_QUALIFIED_MEMBER_NAMES)
            && !definition.namespace.is_empty()
        {
            output.push_str(&definition.namespace);
            output.push('.');
        }

        let show_type_parameters = self.has(ConversionFlags::SHOW_TYPE_PARAMETER_LIST);
        let printer = self.create_printer();
        for outer_definition in enclosing.iter().rev() {
            output.push_str(&outer_definition.name);
            if show_type_parameters {
                let type_parameters = builder.convert_type_parameters(&outer_definition.type_parameters);
                output.push_str(&printer.render_type_parameters(&type_parameters));
            }
            output.push('.');
        }
        output.push_str(&definition.name);

        if show_type_parameters {
            output.push_str(&printer.render_type_parameters(&declaration.type_parameters));
        }
        Ok(())
    }

    fn convert_member_declaration(&self, member: &Member, context: &ProjectContent) -> Result<String> {
        let builder = self.create_builder(context);
        let declaration = builder.convert_member(member)?;
        let declaring = context.type_definition(member.declaring_type()).ok_or_else(|| {
            AmbienceError::InternalInconsistency(format!("declaring type of {} is missing", member.name))
        })?;

        let mut output = String::new();
        self.print_modifiers(declaration.modifiers, &mut output);

        if self.has(ConversionFlags::SHOW_RETURN_TYPE) {
            if let Some(return_type) = &declaration.return_type {
                output.push_str(&self.create_printer().render(return_type));
                output.push(' ');
            }
        }

        self.write_member_declaration_name(member, declaring, &builder, context, &mut output)?;

        if self.has(ConversionFlags::SHOW_TYPE_PARAMETER_LIST) && member.kind == MemberKind::Method {
            output.push_str(&self.create_printer().render_type_parameters(&declaration.type_parameters));
        }

        if self.has(ConversionFlags::SHOW_PARAMETER_LIST) && member.kind.is_parameterized() {
            let (open, close) = if declaration.is_indexer() { ('[', ']') } else { ('(', ')') };
            output.push(open);
            output.push_str(&self.create_printer().render_list(&declaration.parameters));
            output.push(close);
        }

        Ok(output.trim_end().to_string())
    }

    fn write_member_declaration_name(
        &self,
        member: &Member,
        declaring: &TypeDefinition,
        builder: &DeclarationBuilder<'_>,
        context: &ProjectContent,
        output: &mut String,
    ) -> Result<()> {
        if self.has(ConversionFlags::USE_FULLY_QUALIFIED_MEMBER_NAMES) {
            let declaring_type = context.definition_type(declaring.id).ok_or_else(|| {
                AmbienceError::InternalInconsistency(format!("cannot qualify {} with {}", member.name, declaring.name))
            })?;
            output.push_str(&self.convert_type(&ResolvedType::Definition(declaring_type)));
            output.push('.');
        }

        match member.kind {
            MemberKind::Indexer => output.push_str("this"),
            MemberKind::Constructor => output.push_str(&declaring.name),
            MemberKind::Destructor => {
                output.push('~');
                output.push_str(&declaring.name);
            }
            MemberKind::Operator => match OperatorType::from_identifier(&member.name) {
                Some(operator) if operator.is_conversion() => {
                    output.push_str(operator.token());
                    output.push_str(" operator ");
                    let target = builder.convert_type_reference(&member.return_type);
                    output.push_str(&self.create_printer().render(&target));
                }
                Some(operator) => {
                    output.push_str("operator ");
                    output.push_str(operator.token());
                }
                None => {
                    trace!(name = %member.name, "unrecognized operator identifier");
                    output.push_str("operator ");
                    output.push_str(&member.name);
                }
            },
            MemberKind::Method | MemberKind::Property | MemberKind::Field | MemberKind::Event => {
                output.push_str(&member.name)
            }
        }
        Ok(())
    }

    fn print_modifiers(&self, modifiers: Modifiers, output: &mut String) {
        if self.has(ConversionFlags::SHOW_MODIFIERS) {
            output.push_str(&ModifierRenderer.render_modifiers(modifiers));
        }
    }
}

fn missing_entity(entity: EntityHandle) -> AmbienceError {
    AmbienceError::InternalInconsistency(format!("{:?} does not belong to this context", entity))
}

impl Ambience for CSharpAmbience {
    fn conversion_flags(&self) -> ConversionFlags {
        self.conversion_flags
    }

    fn set_conversion_flags(&mut self, flags: ConversionFlags) {
        self.conversion_flags = flags;
    }

    fn convert_entity<C: TypeResolveContext>(&self, entity: EntityHandle, context: &C) -> Result<String> {
        let guard = context.synchronize();
        let content: &ProjectContent = &guard;
        debug!(?entity, flags = %self.conversion_flags, "converting entity");

        let text = match entity {
            EntityHandle::Type(id) => {
                let definition = content.type_definition(id).ok_or_else(|| missing_entity(entity))?;
                self.convert_type_declaration(definition, content)?
            }
            EntityHandle::Member(id) => {
                let member = content.member(id).ok_or_else(|| missing_entity(entity))?;
                self.convert_member_declaration(member, content)?
            }
        };

        trace!(%text, "converted entity");
        Ok(text)
    }

    fn convert_variable<C: TypeResolveContext>(&self, variable: &Variable, context: &C) -> String {
        let guard = context.synchronize();
        let builder = self.create_builder(&guard);
        let node = builder.convert_variable(variable);
        let text = self.create_printer().render(&node);
        text.trim_end_matches([';', '\r', '\n']).to_string()
    }

    fn convert_type(&self, ty: &ResolvedType) -> String {
        let ast = self.type_builder().convert_type(ty);
        self.create_printer().render(&ast)
    }

    fn convert_type_reference<C: TypeResolveContext>(&self, reference: &TypeReference, context: &C) -> String {
        let guard = context.synchronize();
        let resolved = guard.resolve(reference);
        self.convert_type(&resolved)
    }

    fn wrap_attribute(&self, attribute: &str) -> String {
        format!("[{}]", attribute)
    }

    fn wrap_comment(&self, comment: &str) -> String {
        format!("// {}", comment)
    }
}
