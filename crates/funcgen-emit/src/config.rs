use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitterConfig {
    pub use_colors: bool,
    pub indent_style: IndentStyle,
    /// Group definitions by placement section instead of one flat sequence.
    pub group_by_placement: bool,
    /// Write `;; placeholder: name` where a placeholder would have been emitted.
    pub annotate_placeholders: bool,
    /// Close the output with the list of entry points.
    pub emit_entry_points: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            use_colors: false,
            indent_style: IndentStyle::Spaces(4),
            group_by_placement: false,
            annotate_placeholders: false,
            emit_entry_points: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IndentStyle {
    Spaces(usize),
    Tabs,
}

impl IndentStyle {
    pub fn to_string(&self) -> String {
        match self {
            IndentStyle::Spaces(n) => " ".repeat(*n),
            IndentStyle::Tabs => "\t".to_string(),
        }
    }
}
