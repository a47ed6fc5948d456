use crate::renderer::components::*;
use crate::renderer::traits::*;
use crate::syntax::TypeParameterDeclaration;

/// Serializes syntax nodes with one set of formatting options.
///
/// Cheap to build; the ambience creates one per rendered fragment instead of
/// keeping a renderer around between calls.
pub struct TextRenderer {
    options: FormattingOptions,
}

impl TextRenderer {
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    pub fn render<N: Render + ?Sized>(&self, node: &N) -> String {
        node.render(&self.options)
    }

    pub fn render_type_parameters(&self, type_parameters: &[TypeParameterDeclaration]) -> String {
        GenericsRenderer.render_type_parameters(type_parameters, &self.options)
    }

    /// Items joined by `, `.
    pub fn render_list<N: Render>(&self, nodes: &[N]) -> String {
        let strs: Vec<String> = nodes.iter().map(|node| self.render(node)).collect();
        strs.join(", ")
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(FormattingOptions::default())
    }
}
