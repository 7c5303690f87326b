//! Prompt template for medical answers

use crate::core::error::DomainError;
use std::str::FromStr;

/// Listing style the model is asked to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStyle {
    /// Numbered lists or dash lists, never asterisks
    #[default]
    NumberedOrDash,
    /// Plain bullet points
    Bullets,
}

impl ListStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListStyle::NumberedOrDash => "numbered_or_dash",
            ListStyle::Bullets => "bullets",
        }
    }

    fn rule(&self) -> &'static str {
        match self {
            ListStyle::NumberedOrDash => {
                "Use numbered lists (1., 2.) or dash lists (- ). Do NOT use asterisks (*)."
            }
            ListStyle::Bullets => "Use bullet points when listing treatments.",
        }
    }
}

impl FromStr for ListStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "numbered_or_dash" | "numbered" | "dash" => Ok(ListStyle::NumberedOrDash),
            "bullets" | "bullet" => Ok(ListStyle::Bullets),
            other => Err(DomainError::UnknownListStyle(other.to_string())),
        }
    }
}

/// Instruction template wrapped around every generated answer.
///
/// This is the whole answer policy: persona, brevity, list formatting and
/// the disclaimer the model must end with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub persona: String,
    pub max_sentences: u32,
    pub list_style: ListStyle,
    pub disclaimer_text: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            persona: "You are a medical information assistant AI.".to_string(),
            max_sentences: 3,
            list_style: ListStyle::NumberedOrDash,
            disclaimer_text: DEFAULT_DISCLAIMER.to_string(),
        }
    }
}

/// Disclaimer appended to every generated answer
pub const DEFAULT_DISCLAIMER: &str = "Disclaimer: This information is not a substitute for professional medical advice. Always consult a qualified healthcare provider.";

impl PromptTemplate {
    /// Instruction block without the question
    pub fn instructions(&self) -> String {
        format!(
            r#"{persona}
Instructions for your response:
- Provide EXTREMELY concise answers (MAXIMUM {max} short sentences or bullet points total).
- Use simple, everyday language. Avoid jargon.
- {list_rule}
- Focus ONLY on the most common symptoms OR primary actions unless asked for more detail. Do not list everything.
- ALWAYS include this exact disclaimer at the very end: "{disclaimer}""#,
            persona = self.persona.trim(),
            max = self.max_sentences.max(1),
            list_rule = self.list_style.rule(),
            disclaimer = self.disclaimer_text,
        )
    }

    /// Full single-string prompt for `question`
    pub fn render(&self, question: &str) -> String {
        PromptBuilder::build(question, self).render()
    }
}

/// A prompt split into its instruction block and the question.
///
/// Single-message backends send [`Prompt::render`]; chat backends send the
/// instructions as the system message and the question as the user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    instructions: String,
    question: String,
}

impl Prompt {
    pub fn new(instructions: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            question: question.into(),
        }
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    /// Concatenate instructions and question at the single substitution point
    pub fn render(&self) -> String {
        format!(
            "{}\n\nUser's Question:\n{}\n\nYour Very Brief Answer:",
            self.instructions, self.question
        )
    }
}

/// Stateless prompt renderer
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(question: &str, template: &PromptTemplate) -> Prompt {
        Prompt::new(template.instructions(), question.trim())
    }
}
