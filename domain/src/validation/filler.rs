//! Fast path for conversational filler.
//!
//! A single word from a small closed set ("test", "hi", "yes", ...) is
//! answered locally with a canned reply; no model call is made.

use super::ValidationVerdict;

/// Closed set of filler words and their canned replies
const FILLER_REPLIES: [(&str, &str); 8] = [
    (
        "test",
        "Hi! I'm PM Assist, your product planning assistant. I help transform product ideas into comprehensive plans. Try describing a product or business idea you'd like to explore!",
    ),
    (
        "hello",
        "Hello! I'm here to help you turn product ideas into detailed plans. What product or business idea would you like to work on?",
    ),
    (
        "hi",
        "Hi there! Ready to help you develop your product ideas. Share an idea and I'll create a comprehensive plan for it!",
    ),
    (
        "hey",
        "Hey! I'm PM Assist. Tell me about a product idea and I'll help you create a detailed plan.",
    ),
    (
        "yes",
        "Great! Share a product idea and I'll help you develop a comprehensive plan for it.",
    ),
    (
        "no",
        "No problem! When you're ready, share a product idea and I'll help you create a plan.",
    ),
    (
        "ok",
        "Ready when you are! Describe a product idea and I'll help turn it into a detailed plan.",
    ),
    (
        "okay",
        "Perfect! Share your product idea and I'll help create a comprehensive plan.",
    ),
];

const DEFAULT_REPLY: &str =
    "I'm here to help you turn product ideas into detailed plans. Share an idea to get started!";

/// Canned reply for a filler word, or the generic reply for anything else
pub fn canned_reply_for(word: &str) -> &'static str {
    let word = word.trim().to_lowercase();
    FILLER_REPLIES
        .iter()
        .find(|(filler, _)| *filler == word)
        .map(|(_, reply)| *reply)
        .unwrap_or(DEFAULT_REPLY)
}

/// Classify `input` locally if it is a single filler word.
///
/// Returns `None` when the model has to decide.
pub fn classify_filler(input: &str) -> Option<ValidationVerdict> {
    let mut words = input.split_whitespace();
    let word = words.next()?;
    if words.next().is_some() {
        return None;
    }

    let lower = word.to_lowercase();
    if !FILLER_REPLIES.iter().any(|(filler, _)| *filler == lower) {
        return None;
    }

    Some(ValidationVerdict::reject(
        canned_reply_for(&lower),
        format!("Single word input: \"{}\" - not a product idea", lower),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filler_words_short_circuit() {
        for word in ["test", "Hi", "  YES  ", "okay"] {
            let verdict = classify_filler(word).unwrap();
            assert!(!verdict.is_valid, "{word} should be rejected");
            assert!(!verdict.canned_reply.is_empty());
        }
    }

    #[test]
    fn test_non_filler_goes_to_model() {
        assert!(classify_filler("a fitness app").is_none());
        assert!(classify_filler("hi there").is_none());
        assert!(classify_filler("calendar").is_none());
        assert!(classify_filler("   ").is_none());
    }

    #[test]
    fn test_canned_reply_lookup() {
        assert!(canned_reply_for("HELLO").starts_with("Hello!"));
        assert_eq!(canned_reply_for("banana"), DEFAULT_REPLY);
    }
}
