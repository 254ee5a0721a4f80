use crate::filter::{BANNED_OPENERS, MAX_HOOK_WORDS, TEMPLATE_PATTERNS};
use crate::model::{GenerationRequest, SpiceTier, Style};
use crate::niches::NicheProfile;

/// The system prompt template used for hook generation.
///
/// Loaded from `prompt.txt` at compile time. Contains `{{...}}` placeholders
/// that [`build_prompt`] replaces with request and niche data.
pub const HOOK_SYSTEM_PROMPT: &str = include_str!("prompt.txt");

/// Candidates requested from the model; more than we return, to survive filtering
pub const CANDIDATE_COUNT: usize = 15;

/// How many vocabulary words go into the prompt
pub const PROFILE_SLICE: usize = 6;

/// Longest topic passed through to the model, in characters
pub const MAX_TOPIC_CHARS: usize = 200;

/// A rendered system/user message pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Behaviour description for each style tag
pub fn style_description(style: Style) -> &'static str {
    match style {
        Style::Mixed => {
            "Mix styles across the set: questions, bold claims, mini stories, challenges and proof. No two hooks in a row should use the same style."
        }
        Style::Question => {
            "Ask a pointed question the viewer cannot answer without watching. The question names the topic directly."
        }
        Style::Shock => {
            "Open with a surprising fact, result or consequence that contradicts what the viewer expects about the topic."
        }
        Style::Story => {
            "Drop the viewer into the middle of a specific moment, with a concrete detail from the topic in the first line."
        }
        Style::Challenge => {
            "Challenge something the viewer is doing right now and tell them to stop or change it."
        }
        Style::Proof => {
            "Lead with a measurable result, number or before/after that proves the payoff is real."
        }
        Style::Curiosity => {
            "Open a loop: reveal just enough about the topic that the viewer needs the rest."
        }
        Style::Controversial => {
            "Take a firm side on a debated part of the topic that part of the audience will disagree with."
        }
    }
}

/// Behaviour description for each spice tier
pub fn spice_description(tier: SpiceTier) -> &'static str {
    match tier {
        SpiceTier::Mild => "1/4, friendly and helpful. No confrontation, no negative framing.",
        SpiceTier::Medium => "2/4, direct. Point out a common mistake without insulting anyone.",
        SpiceTier::Hot => "3/4, provocative. Call out an industry habit or popular advice as wrong.",
        SpiceTier::Extreme => {
            "4/4, polarizing. Make a bold claim that some viewers will argue with in the comments, without hate or harassment."
        }
    }
}

/// Render the system and user messages for a request.
///
/// Pure: identical inputs always produce identical output.
pub fn build_prompt(request: &GenerationRequest, profile: &NicheProfile) -> Prompt {
    let tier = request.spice_level.tier();

    let banned_phrases = TEMPLATE_PATTERNS
        .iter()
        .map(|p| format!("  - \"{}\"", p.phrase))
        .collect::<Vec<_>>()
        .join("\n");

    let system = HOOK_SYSTEM_PROMPT
        .replace("{{NICHE_NAME}}", profile.name)
        .replace("{{MAX_WORDS}}", &MAX_HOOK_WORDS.to_string())
        .replace("{{BANNED_OPENERS}}", &BANNED_OPENERS.join(", "))
        .replace("{{BANNED_PHRASES}}", &banned_phrases)
        .replace("{{VOCABULARY}}", &slice(profile.vocabulary, PROFILE_SLICE))
        .replace("{{PAIN_POINTS}}", &slice(profile.pain_points, 3))
        .replace("{{DESIRES}}", &slice(profile.desires, 3))
        .replace("{{INSIDER_TERMS}}", &slice(profile.insider_terms, 4))
        .replace("{{STYLE_DESCRIPTION}}", style_description(request.style))
        .replace("{{SPICE_DESCRIPTION}}", spice_description(tier))
        .replace("{{SPICE_EXAMPLE}}", profile.examples.for_tier(tier));

    let user = format!(
        r#"Topic: "{topic}"

Write exactly {count} hooks about this topic.
- Each hook is {max_words} words or fewer.
- Each hook mentions "{topic}" or something only someone discussing "{topic}" would say.
- Default style tag: {style}.

Respond with a JSON object in exactly this shape:
{{"hooks": [{{"text": "the hook", "style": "{style}", "explanation": "why it works, one short sentence", "wordCount": 7}}]}}"#,
        topic = sanitize_topic(&request.topic),
        count = CANDIDATE_COUNT,
        max_words = MAX_HOOK_WORDS,
        style = request.style,
    );

    Prompt { system, user }
}

/// Make a free-text topic safe to embed inside a quoted JSON-mode prompt
pub fn sanitize_topic(topic: &str) -> String {
    let cleaned: String = topic
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .map(|c| match c {
            '"' => '\'',
            '\\' => '/',
            _ => c,
        })
        .filter(|c| *c != '`')
        .collect();

    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_TOPIC_CHARS)
        .collect()
}

fn slice(items: &[&str], n: usize) -> String {
    items.iter().take(n).copied().collect::<Vec<_>>().join(", ")
}
