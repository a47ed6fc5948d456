/// Spacing conventions for rendered C# text.
///
/// The ambience builds a fresh value for every call, so nothing here is ever
/// shared between conversions.
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    /// `Dictionary<string, int>` rather than `Dictionary<string,int>`.
    pub space_after_type_argument_comma: bool,
    /// `int[, ]` rather than `int[,]`.
    pub space_after_array_rank_comma: bool,
    /// `x = 5` rather than `x=5`.
    pub space_around_assignment: bool,
    pub newline: &'static str,
}

impl FormattingOptions {
    pub fn new() -> Self {
        Self {
            space_after_type_argument_comma: true,
            space_after_array_rank_comma: false,
            space_around_assignment: true,
            newline: "\n",
        }
    }

    pub fn type_argument_separator(&self) -> &'static str {
        if self.space_after_type_argument_comma {
            ", "
        } else {
            ","
        }
    }
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Core rendering trait for all syntax nodes
pub trait Render {
    fn render(&self, options: &FormattingOptions) -> String;
}
