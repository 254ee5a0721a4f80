//! Parsing and acceptance rules for model-generated hooks.

use log::debug;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::fmt;

use crate::model::{CandidateHook, GenerationRequest, ValidatedHook};
use crate::HookError;

/// Hooks longer than this many words are rejected
pub const MAX_HOOK_WORDS: usize = 10;

/// Upper bound on the number of hooks returned to the caller
pub const MAX_HOOKS: usize = 10;

/// Explanation used when the model does not give one
pub const DEFAULT_EXPLANATION: &str = "Topic-specific hook built to stop the scroll";

/// Opening words the model is told to avoid
pub const BANNED_OPENERS: &[&str] = &[
    "So", "Okay", "Hey", "Guys", "Today", "Honestly", "Listen", "Imagine",
];

/// A generic, topic-agnostic opener that makes a hook interchangeable
#[derive(Debug)]
pub struct TemplatePattern {
    /// Case-insensitive regex matched against the trimmed hook text
    pub pattern: &'static str,
    /// Phrase shown to the model as an example of what not to write
    pub phrase: &'static str,
    pub description: &'static str,
}

pub static TEMPLATE_PATTERNS: &[TemplatePattern] = &[
    TemplatePattern {
        pattern: r"^I was doing",
        phrase: "I was doing...",
        description: "personal confession opener",
    },
    TemplatePattern {
        pattern: r"^The one thing",
        phrase: "The one thing...",
        description: "vague single-secret opener",
    },
    TemplatePattern {
        pattern: r"^Nobody talks about",
        phrase: "Nobody talks about...",
        description: "fake hidden-knowledge opener",
    },
    TemplatePattern {
        pattern: r"^Here['’]?s why",
        phrase: "Here's why...",
        description: "explainer opener",
    },
    TemplatePattern {
        pattern: r"^This is why",
        phrase: "This is why...",
        description: "explainer opener",
    },
    TemplatePattern {
        pattern: r"^You won['’]?t believe",
        phrase: "You won't believe...",
        description: "clickbait disbelief opener",
    },
    TemplatePattern {
        pattern: r"^POV\s*:",
        phrase: "POV:",
        description: "point-of-view meme opener",
    },
    TemplatePattern {
        pattern: r"^Let me tell you",
        phrase: "Let me tell you...",
        description: "storyteller opener",
    },
    TemplatePattern {
        pattern: r"^What if I told you",
        phrase: "What if I told you...",
        description: "meme reveal opener",
    },
    TemplatePattern {
        pattern: r"^Stop scrolling",
        phrase: "Stop scrolling...",
        description: "platform-command opener",
    },
    TemplatePattern {
        pattern: r"^Did you know",
        phrase: "Did you know...",
        description: "trivia opener",
    },
    TemplatePattern {
        pattern: r"^I tried",
        phrase: "I tried...",
        description: "experiment confession opener",
    },
    TemplatePattern {
        pattern: r"^Wait (until|till|for)\b",
        phrase: "Wait until...",
        description: "delayed payoff opener",
    },
    TemplatePattern {
        pattern: r"^Here['’]?s what happened",
        phrase: "Here's what happened...",
        description: "story recap opener",
    },
    TemplatePattern {
        pattern: r"^Most people (don['’]?t|do not) know",
        phrase: "Most people don't know...",
        description: "fake hidden-knowledge opener",
    },
];

static COMPILED_PATTERNS: Lazy<Vec<(Regex, &'static TemplatePattern)>> = Lazy::new(|| {
    TEMPLATE_PATTERNS
        .iter()
        .map(|p| {
            let regex = RegexBuilder::new(p.pattern)
                .case_insensitive(true)
                .build()
                .unwrap();
            (regex, p)
        })
        .collect()
});

/// Why a candidate was dropped
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    MissingText,
    TooLong(usize),
    Template(&'static str),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingText => write!(f, "missing or empty text"),
            Rejection::TooLong(count) => {
                write!(f, "{} words exceeds limit of {}", count, MAX_HOOK_WORDS)
            }
            Rejection::Template(pattern) => write!(f, "matches template pattern {}", pattern),
        }
    }
}

/// Number of whitespace-delimited tokens in `text`
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Quote marks and list markers stripped from the start of a hook
const LEADING_WRAPPERS: &[char] = &[
    '"', '\'', '`', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '\u{AB}', '\u{BB}', '-', '*',
    '\u{2022}', '>',
];

/// Closing quote marks stripped from the end of a hook
const TRAILING_QUOTES: &[char] = &['"', '`', '\u{201C}', '\u{201D}', '\u{AB}', '\u{BB}'];

/// Single quotes are only stripped at the end when one was stripped at the
/// start, so a trailing possessive survives.
const SINGLE_QUOTES: &[char] = &['\'', '\u{2018}', '\u{2019}'];

/// Trim whitespace, wrapping quotes and leading list markers
pub fn clean_text(text: &str) -> &str {
    let trimmed = text.trim();
    let body =
        trimmed.trim_start_matches(|c: char| c.is_whitespace() || LEADING_WRAPPERS.contains(&c));
    let single_quoted = trimmed[..trimmed.len() - body.len()].contains(SINGLE_QUOTES);

    body.trim_end_matches(|c: char| {
        c.is_whitespace()
            || TRAILING_QUOTES.contains(&c)
            || (single_quoted && SINGLE_QUOTES.contains(&c))
    })
}

/// The first template pattern matching `text`, if any
pub fn matched_template(text: &str) -> Option<&'static TemplatePattern> {
    let text = clean_text(text);
    COMPILED_PATTERNS
        .iter()
        .find(|(regex, _)| regex.is_match(text))
        .map(|(_, pattern)| *pattern)
}

/// Apply the enforced acceptance rules, returning the word count on success
pub fn check(text: &str) -> Result<usize, Rejection> {
    let text = clean_text(text);
    if text.is_empty() {
        return Err(Rejection::MissingText);
    }

    let count = word_count(text);
    if count > MAX_HOOK_WORDS {
        return Err(Rejection::TooLong(count));
    }

    if let Some(pattern) = matched_template(text) {
        return Err(Rejection::Template(pattern.pattern));
    }

    Ok(count)
}

/// Whether `text` would be accepted by [`parse_and_filter`]
pub fn passes_filter(text: &str) -> bool {
    check(text).is_ok()
}

/// Loose signal of whether a hook mentions the topic.
///
/// True when any topic word longer than three characters appears in the
/// hook, or when the hook contains the first five characters of the topic.
/// Only reported, never used to reject.
pub fn topic_relevance(text: &str, topic: &str) -> bool {
    let text = text.to_lowercase();
    let topic = topic.trim().to_lowercase();

    let word_hit = topic
        .split_whitespace()
        .filter(|w| w.chars().count() > 3)
        .any(|w| text.contains(w));
    if word_hit {
        return true;
    }

    let prefix: String = topic.chars().take(5).collect();
    !prefix.is_empty() && text.contains(&prefix)
}

/// Parse the model's raw JSON and keep the candidates that pass every rule.
///
/// Order is preserved and the result is capped at [`MAX_HOOKS`]. An empty
/// result is not an error.
pub fn parse_and_filter(
    raw: &str,
    request: &GenerationRequest,
) -> Result<Vec<ValidatedHook>, HookError> {
    let value: Value = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| HookError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let candidates = match &value {
        Value::Array(items) => items,
        Value::Object(map) => map
            .get("hooks")
            .and_then(Value::as_array)
            .ok_or_else(|| HookError::MalformedResponse("missing `hooks` array".to_string()))?,
        other => {
            return Err(HookError::MalformedResponse(format!(
                "expected object or array, got {}",
                json_kind(other)
            )))
        }
    };

    let mut accepted = Vec::new();
    let mut rejected = 0;

    for value in candidates {
        let candidate = CandidateHook::from_value(value);
        let text = clean_text(candidate.text.as_deref().unwrap_or_default());

        let count = match check(text) {
            Ok(count) => count,
            Err(reason) => {
                debug!("Rejected hook {:?}: {}", text, reason);
                rejected += 1;
                continue;
            }
        };

        if !topic_relevance(text, &request.topic) {
            debug!("Hook {:?} does not mention the topic; keeping it", text);
        }

        accepted.push(ValidatedHook {
            text: text.to_string(),
            style: candidate
                .style
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| request.style.as_str().to_string()),
            explanation: candidate
                .explanation
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_EXPLANATION.to_string()),
            word_count: count,
        });
    }

    debug!(
        "Filtered {} candidates: {} accepted, {} rejected",
        candidates.len(),
        accepted.len(),
        rejected
    );

    accepted.truncate(MAX_HOOKS);
    Ok(accepted)
}

/// Remove a surrounding markdown code fence, if present
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag line
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SpiceLevel, Style};
    use serde_json::json;

    fn request() -> GenerationRequest {
        GenerationRequest {
            topic: "morning routine".to_string(),
            niche: "fitness".to_string(),
            style: Style::Story,
            spice_level: SpiceLevel::clamped(2.0),
        }
    }

    #[test]
    fn test_word_count_splits_on_whitespace_runs() {
        assert_eq!(word_count("  one   two\tthree\nfour "), 4);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn test_each_template_pattern_rejects_its_phrase() {
        for pattern in TEMPLATE_PATTERNS {
            let phrase = pattern.phrase.trim_end_matches("...");
            let hook = format!("{} morning routine", phrase);
            assert_eq!(
                check(&hook),
                Err(Rejection::Template(pattern.pattern)),
                "pattern {} should reject {:?}",
                pattern.pattern,
                hook
            );
        }
    }

    #[test]
    fn test_template_match_is_case_insensitive() {
        assert!(matched_template("i WAS DOING this wrong").is_some());
        assert!(matched_template("  nobody talks about squats").is_some());
        // Only openers are banned
        assert!(matched_template("Squats: the one thing I skip").is_none());
    }

    #[test]
    fn test_quoted_openers_are_still_rejected() {
        for text in [
            "\"Nobody talks about squats\"",
            "'I was doing squats wrong'",
            "\u{201C}POV: leg day\u{201D}",
            "- Stop scrolling if you lift",
            "* \"Did you know\" squats help",
        ] {
            assert!(matched_template(text).is_some(), "{:?} slipped through", text);
            assert!(!passes_filter(text));
        }
    }

    #[test]
    fn test_clean_text_strips_wrappers_only() {
        assert_eq!(clean_text("  \"Skip the snooze button\"  "), "Skip the snooze button");
        assert_eq!(clean_text("'Walk before breakfast'"), "Walk before breakfast");
        assert_eq!(clean_text("- Walk before breakfast"), "Walk before breakfast");
        assert_eq!(clean_text("Ignore your parents' advice"), "Ignore your parents' advice");
        assert_eq!(clean_text("Don't skip the \"easy\" sets"), "Don't skip the \"easy\" sets");
        assert_eq!(check("\"\""), Err(Rejection::MissingText));
    }

    #[test]
    fn test_check_rejects_long_and_empty() {
        let long = "one two three four five six seven eight nine ten eleven";
        assert_eq!(check(long), Err(Rejection::TooLong(11)));
        assert_eq!(check("   "), Err(Rejection::MissingText));
        assert_eq!(check("one two three four five six seven eight nine ten"), Ok(10));
    }

    #[test]
    fn test_topic_relevance_signal() {
        assert!(topic_relevance("My routine starts at 5am", "morning routine"));
        assert!(topic_relevance("Mornings are overrated", "morning routine"));
        assert!(!topic_relevance("Protein shakes are overrated", "morning routine"));
    }

    #[test]
    fn test_parse_and_filter_applies_rules_in_order() {
        let raw = json!({
            "hooks": [
                {"text": "I was doing this wrong for years", "explanation": "x"},
                {"text": "Your morning routine is stealing your gains", "style": "shock"},
                {"text": "one two three four five six seven eight nine ten eleven twelve thirteen fourteen"},
                {"text": "   "},
                {"text": 7},
                {"text": "  Cold showers ruined my morning routine  ", "rationale": "Specific", "wordCount": 99}
            ]
        })
        .to_string();

        let hooks = parse_and_filter(&raw, &request()).unwrap();
        assert_eq!(hooks.len(), 2);

        assert_eq!(hooks[0].text, "Your morning routine is stealing your gains");
        assert_eq!(hooks[0].style, "shock");
        assert_eq!(hooks[0].explanation, DEFAULT_EXPLANATION);
        assert_eq!(hooks[0].word_count, 7);

        assert_eq!(hooks[1].text, "Cold showers ruined my morning routine");
        assert_eq!(hooks[1].style, "story");
        assert_eq!(hooks[1].explanation, "Specific");
        assert_eq!(hooks[1].word_count, 6);
    }

    #[test]
    fn test_parse_and_filter_caps_results() {
        let hooks: Vec<_> = (0..25)
            .map(|i| json!({"text": format!("Morning routine mistake number {}", i)}))
            .collect();
        let raw = json!({ "hooks": hooks }).to_string();

        let result = parse_and_filter(&raw, &request()).unwrap();
        assert_eq!(result.len(), MAX_HOOKS);
        assert_eq!(result[0].text, "Morning routine mistake number 0");
        assert_eq!(result[9].text, "Morning routine mistake number 9");
    }

    #[test]
    fn test_parse_and_filter_accepts_top_level_array() {
        let raw = r#"["Your morning routine needs less coffee", {"text": "Walk before breakfast"}]"#;
        let result = parse_and_filter(raw, &request()).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_parse_and_filter_accepts_code_fence() {
        let raw = "```json\n{\"hooks\": [{\"text\": \"Skip the snooze button\"}]}\n```";
        let result = parse_and_filter(raw, &request()).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].text, "Skip the snooze button");
    }

    #[test]
    fn test_parse_and_filter_stores_unquoted_text() {
        let raw = json!({
            "hooks": [
                {"text": "\"Nobody talks about squats\""},
                {"text": "\"Your alarm is wrecking your morning routine\""}
            ]
        })
        .to_string();

        let result = parse_and_filter(&raw, &request()).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].text, "Your alarm is wrecking your morning routine");
        assert_eq!(result[0].word_count, 7);
    }

    #[test]
    fn test_parse_and_filter_empty_is_ok() {
        let raw = r#"{"hooks": [{"text": "Nobody talks about this"}]}"#;
        let result = parse_and_filter(raw, &request()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_parse_and_filter_malformed() {
        assert!(matches!(
            parse_and_filter("not json", &request()),
            Err(HookError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_and_filter(r#"{"ideas": []}"#, &request()),
            Err(HookError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_and_filter("42", &request()),
            Err(HookError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_filter_output_passes_filter_again() {
        let raw = json!({
            "hooks": [
                {"text": "Your morning routine is stealing your gains"},
                {"text": "POV: you woke up early"},
                {"text": "Coffee first is sabotaging your morning routine"}
            ]
        })
        .to_string();

        for hook in parse_and_filter(&raw, &request()).unwrap() {
            assert!(passes_filter(&hook.text));
            assert_eq!(hook.word_count, word_count(&hook.text));
            assert!(hook.word_count <= MAX_HOOK_WORDS);
        }
    }
}
