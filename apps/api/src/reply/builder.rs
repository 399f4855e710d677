//! Prompt Builder: maps extracted source text and user choices to the
//! (system instructions, user content) pair sent to the generation service.
//!
//! Pure and deterministic: identical inputs give byte-identical output, and
//! nothing here can fail. Lookups that miss degrade to the defaults in
//! `language`.

use serde::Serialize;

use crate::reply::language::{greeting_template, guide_bundle, Formality, Language};
use crate::reply::prompts::{
    ALIGNMENT_DIRECTIVE, BODY_PARAGRAPH_MAX_WORDS, BODY_PARAGRAPH_MIN_WORDS,
    EMPTY_CONTEXT_FALLBACK, EVIDENCE_DIRECTIVE, GROUNDING_DIRECTIVE, LANGUAGE_BLOCK_TEMPLATE,
    MANDATORY_GREETING_TEMPLATE, MAX_SENTENCE_WORDS, NON_REPETITION_DIRECTIVE,
    REWRITE_PROMPT_TEMPLATE, ROLE_DIRECTIVE, SENTENCE_LENGTH_TEMPLATE, SIGNATURE_LINKS,
    STRUCTURE_TEMPLATE, TONE_TEMPLATE, USER_INSTRUCTIONS_SHORT, USER_INSTRUCTIONS_TEMPLATE,
    VALUE_DIRECTIVE, VARIETY_DIRECTIVE,
};
use crate::reply::tone::{render_tone, Tone};

/// Everything the builder reads. Empty strings mean "not provided".
#[derive(Debug, Clone, Copy)]
pub struct PromptInputs<'a> {
    pub resume_text: &'a str,
    pub cover_letter_text: &'a str,
    pub job_text: &'a str,
    pub notes: &'a str,
    pub tones: &'a [Tone],
    pub language: Language,
    pub formality: Option<Formality>,
}

impl PromptInputs<'_> {
    fn has_no_sources(&self) -> bool {
        [
            self.resume_text,
            self.cover_letter_text,
            self.job_text,
            self.notes,
        ]
        .iter()
        .all(|s| s.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptOptions {
    /// Restate the structural and grounding rules at the end of the user content.
    pub reinforce_structure: bool,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            reinforce_structure: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssembledPrompt {
    pub system_instructions: String,
    pub user_content: String,
}

#[cfg(test)]
pub fn build_prompt(inputs: &PromptInputs<'_>) -> AssembledPrompt {
    build_prompt_with(inputs, &PromptOptions::default())
}

pub fn build_prompt_with(inputs: &PromptInputs<'_>, options: &PromptOptions) -> AssembledPrompt {
    let tone = render_tone(inputs.tones);
    let formality = inputs.language.resolve_formality(inputs.formality);
    let greeting = greeting_template(inputs.language, formality);
    let language_instruction = language_instruction(inputs.language, formality);

    // Directive order is part of the contract with the model.
    let directives = [
        ROLE_DIRECTIVE.to_string(),
        GROUNDING_DIRECTIVE.to_string(),
        ALIGNMENT_DIRECTIVE.to_string(),
        VALUE_DIRECTIVE.to_string(),
        VARIETY_DIRECTIVE.to_string(),
        SENTENCE_LENGTH_TEMPLATE.replace("{max_words}", &MAX_SENTENCE_WORDS.to_string()),
        EVIDENCE_DIRECTIVE.to_string(),
        MANDATORY_GREETING_TEMPLATE.replace("{greeting}", greeting),
        fill_structure(STRUCTURE_TEMPLATE, greeting),
        NON_REPETITION_DIRECTIVE.to_string(),
        TONE_TEMPLATE.replace("{tone}", &tone),
    ];

    let mut system_instructions = directives.join(" ");
    if !language_instruction.is_empty() {
        system_instructions.push_str("\n\n");
        system_instructions.push_str(&language_instruction);
    }

    let mut user_content = format!(
        "Resume:\n{}\n\n\
         Cover Letter:\n{}\n\n\
         Job Description:\n{}\n\n\
         Additional Notes (user-provided):\n{}\n\n\
         Language:\n{}\n\n\
         Formality:\n{}\n\n",
        inputs.resume_text,
        inputs.cover_letter_text,
        inputs.job_text,
        inputs.notes,
        inputs.language.label(),
        inputs.language.formality_description(formality),
    );

    if options.reinforce_structure {
        user_content.push_str(&fill_structure(USER_INSTRUCTIONS_TEMPLATE, greeting));
    } else {
        user_content.push_str(USER_INSTRUCTIONS_SHORT);
    }

    if inputs.has_no_sources() {
        user_content.push_str("\n\n");
        user_content.push_str(EMPTY_CONTEXT_FALLBACK);
    }

    AssembledPrompt {
        system_instructions,
        user_content,
    }
}

/// Native-quality guidance for non-default languages. Empty for the default
/// language or when the guide table has nothing for this cell.
pub fn language_instruction(language: Language, formality: Option<Formality>) -> String {
    if language.is_default() {
        return String::new();
    }
    let guide = guide_bundle(language, formality);
    if guide.is_empty() {
        return String::new();
    }

    let description = language.formality_description(formality);
    let register = formality.unwrap_or(Formality::Formal).register();

    LANGUAGE_BLOCK_TEMPLATE
        .replace("{language}", language.label())
        .replace("{formality_upper}", &description.to_uppercase())
        .replace("{formality}", description)
        .replace("{register}", register)
        .replace("{style}", guide.style)
        .replace("{cultural}", guide.cultural)
        .replace("{avoid}", guide.avoid)
}

/// Prompt for rewrite mode: the previous reply is embedded verbatim.
pub fn build_rewrite_prompt(previous_reply: &str) -> String {
    REWRITE_PROMPT_TEMPLATE
        .replace("{min_words}", &BODY_PARAGRAPH_MIN_WORDS.to_string())
        .replace("{max_words}", &BODY_PARAGRAPH_MAX_WORDS.to_string())
        .replace("{previous_reply}", previous_reply)
}

fn fill_structure(template: &str, greeting: &str) -> String {
    template
        .replace("{greeting}", greeting)
        .replace("{min_words}", &BODY_PARAGRAPH_MIN_WORDS.to_string())
        .replace("{max_words}", &BODY_PARAGRAPH_MAX_WORDS.to_string())
        .replace("{signature_links}", SIGNATURE_LINKS)
}
