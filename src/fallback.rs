//! Template hooks used when no model answer is available.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::filter::{word_count, MAX_HOOK_WORDS};
use crate::model::{GenerationRequest, ValidatedHook};
use crate::niches::NicheProfile;

/// Words of the topic kept in `{topic}`
const TOPIC_PHRASE_WORDS: usize = 3;

pub struct FallbackTemplate {
    pub template: &'static str,
    pub style: &'static str,
    pub explanation: &'static str,
}

// Every template opens with literal text so no topic can turn a rendered
// hook into one of the banned generic openers.
pub static FALLBACK_TEMPLATES: &[FallbackTemplate] = &[
    FallbackTemplate {
        template: "How {topic_word} ruined my {pain}",
        style: "shock",
        explanation: "Ties the topic to a frustration the audience already has",
    },
    FallbackTemplate {
        template: "Stop with {topic} already",
        style: "challenge",
        explanation: "Calls out a habit directly so viewers feel addressed",
    },
    FallbackTemplate {
        template: "Proof: {niche_word} + {topic_word} = magic",
        style: "proof",
        explanation: "Pairs niche language with the topic as a formula",
    },
    FallbackTemplate {
        template: "Why does {topic} feel impossible?",
        style: "question",
        explanation: "Asks the question the viewer is already asking themselves",
    },
    FallbackTemplate {
        template: "One week of {topic} fixed my {pain}",
        style: "story",
        explanation: "Short timeframe plus a concrete payoff",
    },
    FallbackTemplate {
        template: "Your {topic} mistake is causing {pain}",
        style: "curiosity",
        explanation: "Opens a loop about a mistake the viewer might be making",
    },
    FallbackTemplate {
        template: "Hot take: {topic} is overrated for {desire}",
        style: "controversial",
        explanation: "Takes a side the audience will want to argue with",
    },
    FallbackTemplate {
        template: "Want {desire}? Start with {topic}",
        style: "question",
        explanation: "Links the topic to what the audience wants most",
    },
    FallbackTemplate {
        template: "Quitting {topic} got me {desire}",
        style: "story",
        explanation: "Unexpected reversal that promises a story",
    },
    FallbackTemplate {
        template: "Every {niche_word} plan needs {topic}",
        style: "challenge",
        explanation: "Positions the topic as the missing piece of the niche",
    },
];

/// Values substituted into a template
struct Fill<'a> {
    topic: String,
    topic_word: &'a str,
    niche_word: &'a str,
    pain: &'a str,
    desire: &'a str,
}

impl Fill<'_> {
    fn value(&self, name: &str) -> Option<&str> {
        match name {
            "topic" => Some(&self.topic),
            "topic_word" => Some(self.topic_word),
            "niche_word" => Some(self.niche_word),
            "pain" => Some(self.pain),
            "desire" => Some(self.desire),
            _ => None,
        }
    }
}

/// Build one hook per template from the topic and niche vocabulary.
///
/// Always returns `FALLBACK_TEMPLATES.len()` hooks. Word choice comes from
/// `rng`; pass a seeded generator for reproducible output. A hook that would
/// run past [`MAX_HOOK_WORDS`] first gets the shortest niche phrases, then a
/// shorter topic phrase; cutting words off is the last resort.
pub fn generate_fallback<R: Rng + ?Sized>(
    request: &GenerationRequest,
    profile: &NicheProfile,
    rng: &mut R,
) -> Vec<ValidatedHook> {
    let topic_words: Vec<&str> = request.topic.split_whitespace().collect();
    let niche_fallback = profile.vocabulary.first().copied().unwrap_or("this");

    let phrase_words: Vec<&str> = if topic_words.is_empty() {
        vec![niche_fallback]
    } else {
        topic_words.iter().take(TOPIC_PHRASE_WORDS).copied().collect()
    };

    let long_words: Vec<&str> = topic_words
        .iter()
        .copied()
        .filter(|w| w.chars().count() > 3)
        .collect();

    FALLBACK_TEMPLATES
        .iter()
        .map(|template| {
            let mut fill = Fill {
                topic: phrase_words.join(" "),
                topic_word: long_words
                    .choose(rng)
                    .or_else(|| topic_words.choose(rng))
                    .copied()
                    .unwrap_or(niche_fallback),
                niche_word: profile.vocabulary.choose(rng).copied().unwrap_or(niche_fallback),
                pain: profile.pain_points.choose(rng).copied().unwrap_or("problems"),
                desire: profile.desires.choose(rng).copied().unwrap_or("results"),
            };

            let mut rendered = render(template.template, &fill);
            if word_count(&rendered) > MAX_HOOK_WORDS {
                fill.niche_word = shortest(profile.vocabulary).unwrap_or(fill.niche_word);
                fill.pain = shortest(profile.pain_points).unwrap_or(fill.pain);
                fill.desire = shortest(profile.desires).unwrap_or(fill.desire);
                rendered = render(template.template, &fill);
            }

            let mut kept = phrase_words.len();
            while word_count(&rendered) > MAX_HOOK_WORDS && kept > 1 {
                kept -= 1;
                fill.topic = phrase_words[..kept].join(" ");
                rendered = render(template.template, &fill);
            }

            let text = cap_words(&rendered, MAX_HOOK_WORDS);
            ValidatedHook {
                word_count: word_count(&text),
                text,
                style: template.style.to_string(),
                explanation: template.explanation.to_string(),
            }
        })
        .collect()
}

/// Substitute `{name}` placeholders in one pass over `template`.
///
/// Substituted values are never rescanned, so braces inside a topic are
/// copied through literally.
fn render(template: &str, fill: &Fill<'_>) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = after
            .find('}')
            .and_then(|close| fill.value(&after[..close]).map(|value| (close, value)));

        match placeholder {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// The phrase with the fewest words
fn shortest(phrases: &[&'static str]) -> Option<&'static str> {
    phrases.iter().copied().min_by_key(|p| word_count(p))
}

/// Collapse whitespace and keep at most `max` words
fn cap_words(text: &str, max: usize) -> String {
    text.split_whitespace().take(max).collect::<Vec<_>>().join(" ")
}
