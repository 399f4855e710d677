//! Tone selection: the closed set of tone labels a user can pick, and how a
//! selection is rendered into the instructions.

use serde::{Deserialize, Serialize};

/// Rendered tone when nothing was selected.
pub const FALLBACK_TONE: &str = "natural, confident";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    Natural,
    Professional,
    Confident,
    Conversational,
    Enthusiastic,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Natural,
        Tone::Professional,
        Tone::Confident,
        Tone::Conversational,
        Tone::Enthusiastic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tone::Natural => "Natural",
            Tone::Professional => "Professional",
            Tone::Confident => "Confident",
            Tone::Conversational => "Conversational",
            Tone::Enthusiastic => "Enthusiastic",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(label))
    }
}

/// Appends `tone` unless already selected, so a selection behaves like a set
/// while keeping the order the user picked.
pub fn push_unique(selection: &mut Vec<Tone>, tone: Tone) {
    if !selection.contains(&tone) {
        selection.push(tone);
    }
}

/// Comma-joins the selected labels in input order, or returns the fallback.
pub fn render_tone(selection: &[Tone]) -> String {
    if selection.is_empty() {
        return FALLBACK_TONE.to_string();
    }
    selection
        .iter()
        .map(|t| t.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_uses_fallback() {
        assert_eq!(render_tone(&[]), "natural, confident");
    }

    #[test]
    fn test_selection_joined_in_input_order() {
        assert_eq!(
            render_tone(&[Tone::Confident, Tone::Natural]),
            "Confident, Natural"
        );
        assert_eq!(
            render_tone(&[Tone::Natural, Tone::Confident]),
            "Natural, Confident"
        );
    }

    #[test]
    fn test_push_unique_ignores_repeats() {
        let mut selection = Vec::new();
        push_unique(&mut selection, Tone::Enthusiastic);
        push_unique(&mut selection, Tone::Professional);
        push_unique(&mut selection, Tone::Enthusiastic);
        assert_eq!(selection, vec![Tone::Enthusiastic, Tone::Professional]);
    }

    #[test]
    fn test_from_label_is_case_insensitive() {
        assert_eq!(Tone::from_label(" conversational"), Some(Tone::Conversational));
        assert_eq!(Tone::from_label("Sarcastic"), None);
    }
}
