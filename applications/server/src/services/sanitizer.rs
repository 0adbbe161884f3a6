/// Text sanitizer service
///
/// Wraps `rustrict` behind the contract the handlers consume: given raw
/// text, return the censored text plus profanity/severity flags. Writes are
/// rejected when the severe flag is set; otherwise the sanitized text is
/// what gets stored.
use rustrict::{Censor, Type};

/// Analysis result for one piece of user text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedText {
    /// The text with inappropriate spans censored
    pub sanitized_text: String,

    /// Whether any inappropriate content was detected
    pub contains_profanity: bool,

    /// Whether severe content was detected; such writes are rejected
    pub contains_severe: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sanitizer;

impl Sanitizer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze and censor `text`
    pub fn sanitize(&self, text: &str) -> SanitizedText {
        let (sanitized_text, analysis) = Censor::from_str(text).censor_and_analyze();

        SanitizedText {
            sanitized_text,
            contains_profanity: analysis.is(Type::INAPPROPRIATE),
            contains_severe: analysis.is(Type::SEVERE),
        }
    }
}
