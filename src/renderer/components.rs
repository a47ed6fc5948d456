use crate::model::{ParameterModifier, Variance};
use crate::renderer::traits::*;
use crate::syntax::{AstType, Modifiers, TypeParameterDeclaration};

/// Helper for rendering modifier keywords
pub struct ModifierRenderer;

impl ModifierRenderer {
    /// Every keyword followed by exactly one space, in canonical order.
    pub fn render_modifiers(&self, modifiers: Modifiers) -> String {
        let mut output = String::new();
        for token in modifiers.tokens() {
            output.push_str(token);
            output.push(' ');
        }
        output
    }

    pub fn render_parameter_modifier(&self, modifier: Option<ParameterModifier>) -> &'static str {
        match modifier {
            Some(ParameterModifier::Ref) => "ref ",
            Some(ParameterModifier::Out) => "out ",
            Some(ParameterModifier::Params) => "params ",
            Some(ParameterModifier::This) => "this ",
            None => "",
        }
    }

    pub fn render_variance(&self, variance: Variance) -> &'static str {
        match variance {
            Variance::Invariant => "",
            Variance::Covariant => "out ",
            Variance::Contravariant => "in ",
        }
    }
}

/// Helper for the bracketed lists of generic syntax
pub struct GenericsRenderer;

impl GenericsRenderer {
    pub fn render_type_arguments(&self, arguments: &[AstType], options: &FormattingOptions) -> String {
        if arguments.is_empty() {
            return String::new();
        }

        let argument_strs: Vec<String> = arguments.iter().map(|arg| arg.render(options)).collect();
        format!("<{}>", argument_strs.join(options.type_argument_separator()))
    }

    /// `<in T, out U>`; constraints are never part of this list.
    pub fn render_type_parameters(
        &self,
        type_parameters: &[TypeParameterDeclaration],
        options: &FormattingOptions,
    ) -> String {
        if type_parameters.is_empty() {
            return String::new();
        }

        let param_strs: Vec<String> = type_parameters.iter().map(|tp| tp.render(options)).collect();
        format!("<{}>", param_strs.join(options.type_argument_separator()))
    }

    pub fn render_array_rank(&self, rank: usize, options: &FormattingOptions) -> String {
        let separator = if options.space_after_array_rank_comma {
            ", "
        } else {
            ","
        };
        format!("[{}]", vec![""; rank.max(1)].join(separator))
    }
}
