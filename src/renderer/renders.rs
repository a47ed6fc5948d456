use crate::renderer::components::*;
use crate::renderer::traits::*;
use crate::syntax::*;

impl Render for AstType {
    fn render(&self, options: &FormattingOptions) -> String {
        let generics = GenericsRenderer;

        match self {
            AstType::Primitive(keyword) => keyword.to_string(),
            AstType::Simple {
                identifier,
                type_arguments,
            } => {
                let mut output = identifier.clone();
                output.push_str(&generics.render_type_arguments(type_arguments, options));
                output
            }
            AstType::Member {
                target,
                member_name,
                type_arguments,
            } => {
                let mut output = target.render(options);
                output.push('.');
                output.push_str(member_name);
                output.push_str(&generics.render_type_arguments(type_arguments, options));
                output
            }
            AstType::Array { element, rank } => {
                let mut output = element.render(options);
                output.push_str(&generics.render_array_rank(*rank, options));
                output
            }
            AstType::Pointer(element) => format!("{}*", element.render(options)),
            AstType::Nullable(element) => format!("{}?", element.render(options)),
        }
    }
}

impl Render for TypeParameterDeclaration {
    fn render(&self, _options: &FormattingOptions) -> String {
        format!("{}{}", ModifierRenderer.render_variance(self.variance), self.name)
    }
}

impl Render for ParameterDeclaration {
    fn render(&self, options: &FormattingOptions) -> String {
        let mut output = String::new();
        output.push_str(ModifierRenderer.render_parameter_modifier(self.modifier));
        output.push_str(&self.parameter_type.render(options));

        // Hidden names leave just the type
        if let Some(name) = &self.name {
            output.push(' ');
            output.push_str(name);
        }
        output
    }
}

impl Render for VariableDeclarationStatement {
    fn render(&self, options: &FormattingOptions) -> String {
        let mut output = ModifierRenderer.render_modifiers(self.modifiers);
        output.push_str(&self.variable_type.render(options));
        output.push(' ');
        output.push_str(&self.name);

        if let Some(value) = &self.initializer {
            output.push_str(if options.space_around_assignment { " = " } else { "=" });
            output.push_str(&value.to_string());
        }

        output.push(';');
        output.push_str(options.newline);
        output
    }
}

impl Render for VariableNode {
    fn render(&self, options: &FormattingOptions) -> String {
        match self {
            VariableNode::Statement(statement) => statement.render(options),
            VariableNode::Parameter(parameter) => parameter.render(options),
        }
    }
}
