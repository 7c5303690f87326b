//! Keyword-based intent classification

use serde::{Deserialize, Serialize};

/// Coarse action category derived from a question (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentTag {
    /// Patient wants to book a consultation
    Appointment,
    /// Patient wants to order or refill medication
    Medicine,
    /// Anything else; answered by the language model
    #[default]
    None,
}

impl IntentTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentTag::Appointment => "appointment",
            IntentTag::Medicine => "medicine",
            IntentTag::None => "none",
        }
    }

    /// Whether this tag short-circuits to a static link
    pub fn is_routed(&self) -> bool {
        !matches!(self, IntentTag::None)
    }
}

impl std::fmt::Display for IntentTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered keyword list for one intent.
///
/// Keywords are stored lowercased and trimmed; blank entries are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntentKeywords {
    keywords: Vec<String>,
}

impl IntentKeywords {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// First keyword (in declaration order) contained in `text`
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.iter().find(|k| text.contains(k))
    }
}

/// Pure substring classifier over two keyword sets.
///
/// Appointment keywords are checked before medicine keywords, so a question
/// mentioning both is routed to [`IntentTag::Appointment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentClassifier {
    appointment: IntentKeywords,
    medicine: IntentKeywords,
}

impl IntentClassifier {
    pub fn new(appointment: IntentKeywords, medicine: IntentKeywords) -> Self {
        Self {
            appointment,
            medicine,
        }
    }

    /// Classify a question into an [`IntentTag`]
    pub fn classify(&self, question: &str) -> IntentTag {
        let text = question.trim().to_lowercase();
        if text.is_empty() {
            return IntentTag::None;
        }
        if self.appointment.first_match(&text).is_some() {
            IntentTag::Appointment
        } else if self.medicine.first_match(&text).is_some() {
            IntentTag::Medicine
        } else {
            IntentTag::None
        }
    }

    pub fn appointment_keywords(&self) -> &IntentKeywords {
        &self.appointment
    }

    pub fn medicine_keywords(&self) -> &IntentKeywords {
        &self.medicine
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(
            IntentKeywords::new(DEFAULT_APPOINTMENT_KEYWORDS),
            IntentKeywords::new(DEFAULT_MEDICINE_KEYWORDS),
        )
    }
}

/// Default appointment phrases, checked first.
pub const DEFAULT_APPOINTMENT_KEYWORDS: &[&str] = &[
    "book appointment",
    "make an appointment",
    "schedule an appointment",
    "appointment",
    "see a doctor",
    "consult a doctor",
    "book a doctor",
];

/// Default medicine-ordering phrases.
pub const DEFAULT_MEDICINE_KEYWORDS: &[&str] = &[
    "order medicine",
    "buy medicine",
    "order drugs",
    "buy drugs",
    "medicine",
    "pharmacy",
    "prescription refill",
    "drugs",
];
