//! Language/Formality guide table.
//!
//! Static lookup keyed by (`Language`, `Formality`), supplying the style,
//! cultural and avoidance fragments quoted into the generated instructions,
//! plus a greeting template with a single `(#)` recipient placeholder.
//!
//! English is the default language: it has no formality distinction, no
//! guide bundle, and always greets with `Dear (#)`.

use serde::{Deserialize, Serialize};

/// Greeting used whenever no language-specific template applies.
pub const DEFAULT_GREETING: &str = "Dear (#)";

/// Formality description used when no register applies (English, or none chosen).
pub const STANDARD_TONE: &str = "Standard business tone";

/// Target language of the generated reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Dutch,
    French,
    German,
    Spanish,
    Italian,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::English,
        Language::Dutch,
        Language::French,
        Language::German,
        Language::Spanish,
        Language::Italian,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Dutch => "Dutch",
            Language::French => "French",
            Language::German => "German",
            Language::Spanish => "Spanish",
            Language::Italian => "Italian",
        }
    }

    /// Case-insensitive match on the display label.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.label().eq_ignore_ascii_case(label))
    }

    pub fn is_default(self) -> bool {
        self == Language::English
    }

    /// The user-facing label for a formality level, e.g. `Informal (je)`.
    /// `None` for English, which has no formal/informal distinction.
    pub fn formality_label(self, formality: Formality) -> Option<&'static str> {
        let (formal, informal) = match self {
            Language::English => return None,
            Language::Dutch => ("Formal (u)", "Informal (je)"),
            Language::French => ("Formal (vous)", "Informal (tu)"),
            Language::German => ("Formal (Sie)", "Informal (du)"),
            Language::Spanish => ("Formal (usted)", "Informal (tú)"),
            Language::Italian => ("Formal (Lei)", "Informal (tu)"),
        };
        Some(match formality {
            Formality::Formal => formal,
            Formality::Informal => informal,
        })
    }

    /// Parses one of this language's two formality labels. The bare words
    /// `formal` / `informal` are accepted as well. Case-insensitive.
    pub fn formality_from_label(self, label: &str) -> Option<Formality> {
        let label = label.trim();
        Formality::ALL.into_iter().find(|&f| {
            self.formality_label(f)
                .is_some_and(|l| l.eq_ignore_ascii_case(label))
                || f.register().eq_ignore_ascii_case(label)
        })
    }

    /// Drops any formality for the default language, which only has the
    /// standard business tone.
    pub fn resolve_formality(self, formality: Option<Formality>) -> Option<Formality> {
        if self.is_default() {
            None
        } else {
            formality
        }
    }

    /// Text shown for the chosen register: the per-language label, or the
    /// standard-tone sentinel when none applies.
    pub fn formality_description(self, formality: Option<Formality>) -> &'static str {
        self.resolve_formality(formality)
            .and_then(|f| self.formality_label(f))
            .unwrap_or(STANDARD_TONE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formality {
    Formal,
    Informal,
}

impl Formality {
    pub const ALL: [Formality; 2] = [Formality::Formal, Formality::Informal];

    pub fn register(self) -> &'static str {
        match self {
            Formality::Formal => "formal",
            Formality::Informal => "informal",
        }
    }
}

/// Guidance fragments for one (language, formality) cell, quoted verbatim
/// into the language-instruction block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideBundle {
    pub style: &'static str,
    pub cultural: &'static str,
    pub avoid: &'static str,
}

impl GuideBundle {
    pub const EMPTY: GuideBundle = GuideBundle {
        style: "",
        cultural: "",
        avoid: "",
    };

    pub fn is_empty(&self) -> bool {
        self.style.is_empty() && self.cultural.is_empty() && self.avoid.is_empty()
    }
}

/// Looks up the guide bundle. English yields the empty bundle; a missing
/// formality on any other language resolves to its formal cell.
pub fn guide_bundle(language: Language, formality: Option<Formality>) -> GuideBundle {
    use Formality::{Formal, Informal};

    let formality = formality.unwrap_or(Formal);
    match (language, formality) {
        (Language::English, _) => GuideBundle::EMPTY,

        (Language::Dutch, Formal) => GuideBundle {
            style: "Use natural, business-appropriate Dutch with 'u' for formal address. Avoid overly formal constructions like 'ik ben goed uitgerust om de taak' - use more natural expressions like 'ik heb ervaring met' or 'ik zou graag bijdragen aan'. Include typical Dutch business expressions like 'graag', 'bijzonder', 'uitstekend'.",
            cultural: "Dutch business culture values directness and efficiency. Be straightforward but polite. Use natural, conversational tone even in formal contexts.",
            avoid: "Avoid overly formal or literal translations from English. Don't use constructions like 'goed uitgerust zijn om' - this sounds unnatural in Dutch.",
        },
        (Language::Dutch, Informal) => GuideBundle {
            style: "Use natural, friendly Dutch with 'je' for informal address. Keep it professional but approachable. Use common Dutch expressions and natural sentence structures.",
            cultural: "Dutch informal business communication is still professional but more relaxed and personal.",
            avoid: "Avoid overly casual expressions that might be unprofessional in a business context.",
        },

        (Language::French, Formal) => GuideBundle {
            style: "Use formal French with proper business etiquette. Use 'vous' form throughout. Include sophisticated vocabulary and proper French business expressions.",
            cultural: "French business culture appreciates elegance and sophistication. Use refined language and show appreciation for the company's values.",
            avoid: "Avoid overly complex sentence structures that might sound unnatural.",
        },
        (Language::French, Informal) => GuideBundle {
            style: "Use 'tu' form but maintain professional tone. French informal business communication still requires elegance.",
            cultural: "French informal business communication maintains a certain level of sophistication.",
            avoid: "Avoid overly casual expressions that might be inappropriate in business contexts.",
        },

        (Language::German, Formal) => GuideBundle {
            style: "Use formal German (Sie form). German business communication is precise and structured. Use compound words appropriately and maintain professional tone.",
            cultural: "German business culture values precision, reliability, and thoroughness. Be specific about qualifications and achievements.",
            avoid: "Avoid overly complex compound words that might be hard to read.",
        },
        (Language::German, Informal) => GuideBundle {
            style: "Use 'du' form but maintain professional structure and precision typical of German business communication.",
            cultural: "German informal business communication still values clarity and precision.",
            avoid: "Avoid overly casual expressions that might seem unprofessional.",
        },

        (Language::Spanish, Formal) => GuideBundle {
            style: "Use formal Spanish with usted form. Include appropriate business vocabulary and maintain professional but warm tone typical of Spanish business culture.",
            cultural: "Spanish business culture values personal relationships and enthusiasm. Show genuine interest and passion for the role.",
            avoid: "Avoid overly formal expressions that might sound cold or distant.",
        },
        (Language::Spanish, Informal) => GuideBundle {
            style: "Use 'tú' form but maintain professional warmth and enthusiasm typical of Spanish business culture.",
            cultural: "Spanish informal business communication still emphasizes personal connection and enthusiasm.",
            avoid: "Avoid overly casual expressions that might be inappropriate in business contexts.",
        },

        (Language::Italian, Formal) => GuideBundle {
            style: "Use formal Italian with Lei form. Italian business communication balances professionalism with warmth and personal touch.",
            cultural: "Italian business culture appreciates passion, creativity, and personal connection. Show enthusiasm while maintaining professionalism.",
            avoid: "Avoid overly formal expressions that might sound cold or distant.",
        },
        (Language::Italian, Informal) => GuideBundle {
            style: "Use 'tu' form but maintain the warmth and personal touch typical of Italian business communication.",
            cultural: "Italian informal business communication still emphasizes passion and personal connection.",
            avoid: "Avoid overly casual expressions that might be inappropriate in business contexts.",
        },
    }
}

/// Greeting template for the opening line. Always contains exactly one
/// `(#)`; the builder embeds it unfilled.
pub fn greeting_template(language: Language, formality: Option<Formality>) -> &'static str {
    let formality = formality.unwrap_or(Formality::Formal);
    match (language, formality) {
        (Language::English, _) => DEFAULT_GREETING,
        (Language::Dutch, Formality::Formal) => "Geachte (#)",
        (Language::Dutch, Formality::Informal) => "Beste (#)",
        (Language::French, Formality::Formal) => "Madame/Monsieur (#)",
        (Language::French, Formality::Informal) => "Bonjour (#)",
        (Language::German, Formality::Formal) => "Sehr geehrte/r (#)",
        (Language::German, Formality::Informal) => "Hallo (#)",
        (Language::Spanish, Formality::Formal) => "Estimado/a (#)",
        (Language::Spanish, Formality::Informal) => "Hola (#)",
        (Language::Italian, Formality::Formal) => "Gentile (#)",
        (Language::Italian, Formality::Informal) => "Salve (#)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Token the model must reproduce in place of the recipient name.
    const NAME_PLACEHOLDER: &str = "(#)";

    fn all_cells() -> Vec<(Language, Option<Formality>)> {
        Language::ALL
            .into_iter()
            .flat_map(|l| {
                [None, Some(Formality::Formal), Some(Formality::Informal)]
                    .into_iter()
                    .map(move |f| (l, f))
            })
            .collect()
    }

    #[test]
    fn test_every_greeting_has_exactly_one_placeholder() {
        for (language, formality) in all_cells() {
            let greeting = greeting_template(language, formality);
            assert_eq!(
                greeting.matches(NAME_PLACEHOLDER).count(),
                1,
                "{language:?}/{formality:?} greeting must carry one placeholder: {greeting}"
            );
        }
    }

    #[test]
    fn test_english_has_empty_bundle_and_default_greeting() {
        for formality in [None, Some(Formality::Formal), Some(Formality::Informal)] {
            assert!(guide_bundle(Language::English, formality).is_empty());
            assert_eq!(greeting_template(Language::English, formality), DEFAULT_GREETING);
        }
    }

    #[test]
    fn test_non_default_languages_have_full_bundles() {
        for (language, formality) in all_cells() {
            if language.is_default() {
                continue;
            }
            let bundle = guide_bundle(language, formality);
            assert!(!bundle.style.is_empty(), "{language:?} style");
            assert!(!bundle.cultural.is_empty(), "{language:?} cultural");
            assert!(!bundle.avoid.is_empty(), "{language:?} avoid");
        }
    }

    #[test]
    fn test_dutch_greetings_follow_formality() {
        assert_eq!(greeting_template(Language::Dutch, Some(Formality::Formal)), "Geachte (#)");
        assert_eq!(greeting_template(Language::Dutch, Some(Formality::Informal)), "Beste (#)");
        assert_eq!(greeting_template(Language::Dutch, None), "Geachte (#)");
    }

    #[test]
    fn test_missing_formality_resolves_to_formal_cell() {
        assert_eq!(
            guide_bundle(Language::German, None),
            guide_bundle(Language::German, Some(Formality::Formal))
        );
    }

    #[test]
    fn test_informal_label_does_not_match_formal() {
        // "Informal (je)" contains the substring "formal"; it must still parse as informal.
        assert_eq!(
            Language::Dutch.formality_from_label("Informal (je)"),
            Some(Formality::Informal)
        );
        assert_eq!(
            Language::Dutch.formality_from_label("formal (U)"),
            Some(Formality::Formal)
        );
        assert_eq!(
            Language::Spanish.formality_from_label("informal"),
            Some(Formality::Informal)
        );
    }

    #[test]
    fn test_foreign_formality_label_is_rejected() {
        assert_eq!(Language::Dutch.formality_from_label("Informal (tu)"), None);
        assert_eq!(Language::English.formality_from_label("Formal (u)"), None);
    }

    #[test]
    fn test_english_formality_always_standard_tone() {
        assert_eq!(
            Language::English.resolve_formality(Some(Formality::Informal)),
            None
        );
        assert_eq!(
            Language::English.formality_description(Some(Formality::Formal)),
            STANDARD_TONE
        );
        assert_eq!(
            Language::Italian.formality_description(Some(Formality::Formal)),
            "Formal (Lei)"
        );
        assert_eq!(Language::Italian.formality_description(None), STANDARD_TONE);
    }

    #[test]
    fn test_language_labels_round_trip() {
        for language in Language::ALL {
            assert_eq!(Language::from_label(language.label()), Some(language));
        }
        assert_eq!(Language::from_label("  dutch "), Some(Language::Dutch));
        assert_eq!(Language::from_label("Klingon"), None);
    }
}
