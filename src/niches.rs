//! Static vocabulary and tone data for each content niche.

use crate::model::SpiceTier;

/// Profile used when a niche key is not in the table
pub const DEFAULT_NICHE: &str = "lifestyle";

/// One example hook per spice tier
#[derive(Debug)]
pub struct SpiceExamples {
    pub mild: &'static str,
    pub medium: &'static str,
    pub hot: &'static str,
    pub extreme: &'static str,
}

impl SpiceExamples {
    pub fn for_tier(&self, tier: SpiceTier) -> &'static str {
        match tier {
            SpiceTier::Mild => self.mild,
            SpiceTier::Medium => self.medium,
            SpiceTier::Hot => self.hot,
            SpiceTier::Extreme => self.extreme,
        }
    }
}

#[derive(Debug)]
pub struct NicheProfile {
    pub key: &'static str,
    pub name: &'static str,
    pub vocabulary: &'static [&'static str],
    pub pain_points: &'static [&'static str],
    pub desires: &'static [&'static str],
    pub insider_terms: &'static [&'static str],
    pub examples: SpiceExamples,
}

static PROFILES: &[NicheProfile] = &[
    NicheProfile {
        key: "fitness",
        name: "Fitness & Health",
        vocabulary: &[
            "gains", "reps", "cardio", "protein", "squats", "deadlifts", "macros", "shred",
            "bulk", "mobility",
        ],
        pain_points: &[
            "plateau",
            "sore knees",
            "skipped leg day",
            "bloating",
            "no motivation",
        ],
        desires: &["visible abs", "more energy", "a stronger back", "better sleep"],
        insider_terms: &["PR", "progressive overload", "TDEE", "RPE", "DOMS"],
        examples: SpiceExamples {
            mild: "Three stretches that fixed my lower back",
            medium: "Your cardio routine is eating your gains",
            hot: "Personal trainers hate this free program",
            extreme: "Crunches are a scam and always were",
        },
    },
    NicheProfile {
        key: "business",
        name: "Business & Entrepreneurship",
        vocabulary: &[
            "revenue", "clients", "pricing", "funnel", "startup", "margins", "pitch", "scale",
            "hiring", "cash flow",
        ],
        pain_points: &[
            "cash flow",
            "ghosting clients",
            "burnout",
            "underpricing",
            "churn",
        ],
        desires: &["recurring revenue", "a bigger team", "time freedom", "premium clients"],
        insider_terms: &["MRR", "CAC", "LTV", "runway", "product-market fit"],
        examples: SpiceExamples {
            mild: "How we doubled revenue without new clients",
            medium: "Your pricing page is losing you money",
            hot: "Most business coaches have never run a business",
            extreme: "Your startup idea is a hobby, not a company",
        },
    },
    NicheProfile {
        key: "lifestyle",
        name: "Lifestyle",
        vocabulary: &[
            "routine", "habits", "home", "weekend", "morning", "balance", "travel", "self-care",
            "budget", "style",
        ],
        pain_points: &[
            "clutter",
            "no free time",
            "bad sleep",
            "doomscrolling",
            "burnout",
        ],
        desires: &["a calmer week", "more time", "a cosy home", "better habits"],
        insider_terms: &["reset day", "slow living", "capsule wardrobe", "habit stacking"],
        examples: SpiceExamples {
            mild: "My five minute Sunday reset",
            medium: "Your morning routine is making you tired",
            hot: "Self-care influencers are selling you stress",
            extreme: "Your productivity system is procrastination in disguise",
        },
    },
    NicheProfile {
        key: "tech",
        name: "Tech & Gadgets",
        vocabulary: &[
            "laptop", "phone", "AI", "apps", "setup", "battery", "code", "keyboard", "cloud",
            "privacy",
        ],
        pain_points: &[
            "slow laptop",
            "dead battery",
            "subscription fatigue",
            "data leaks",
            "tangled cables",
        ],
        desires: &["a clean desk setup", "faster workflow", "better privacy", "longer battery"],
        insider_terms: &["LLM", "latency", "open source", "homelab", "dotfiles"],
        examples: SpiceExamples {
            mild: "Three phone settings you should change today",
            medium: "Your laptop is slow because of this app",
            hot: "Flagship phones are a waste of money now",
            extreme: "Your smart home is spying on you",
        },
    },
    NicheProfile {
        key: "beauty",
        name: "Beauty & Skincare",
        vocabulary: &[
            "skincare", "serum", "SPF", "glow", "makeup", "retinol", "cleanser", "hair",
            "foundation", "moisturizer",
        ],
        pain_points: &["breakouts", "dry skin", "dark circles", "frizz", "oily T-zone"],
        desires: &["glass skin", "a natural glow", "healthy hair", "even tone"],
        insider_terms: &["double cleanse", "skin barrier", "slugging", "niacinamide"],
        examples: SpiceExamples {
            mild: "The cheap serum that fixed my texture",
            medium: "Your cleanser is wrecking your skin barrier",
            hot: "Luxury skincare is drugstore skincare in nicer bottles",
            extreme: "Your ten step routine is causing your breakouts",
        },
    },
    NicheProfile {
        key: "food",
        name: "Food & Cooking",
        vocabulary: &[
            "recipe", "pasta", "meal prep", "air fryer", "garlic", "sourdough", "spices",
            "dinner", "butter", "knife",
        ],
        pain_points: &[
            "bland food",
            "soggy fries",
            "no time to cook",
            "wasted groceries",
            "burnt garlic",
        ],
        desires: &["restaurant flavor", "quick dinners", "cheaper groceries", "crispy results"],
        insider_terms: &["mise en place", "maillard", "emulsify", "deglaze"],
        examples: SpiceExamples {
            mild: "The ten minute pasta I make every week",
            medium: "You are salting your pasta water wrong",
            hot: "Air fryers are just tiny ovens",
            extreme: "Your grandma's recipe was never that good",
        },
    },
    NicheProfile {
        key: "finance",
        name: "Personal Finance",
        vocabulary: &[
            "budget", "savings", "debt", "investing", "index funds", "credit", "salary", "taxes",
            "rent", "side hustle",
        ],
        pain_points: &[
            "credit card debt",
            "living paycheck to paycheck",
            "surprise bills",
            "no savings",
            "student loans",
        ],
        desires: &["an emergency fund", "early retirement", "zero debt", "passive income"],
        insider_terms: &["ETF", "compound interest", "expense ratio", "FIRE", "Roth"],
        examples: SpiceExamples {
            mild: "How I saved my first thousand dollars",
            medium: "Your budget fails because of this category",
            hot: "Buying a house is a terrible investment for most people",
            extreme: "Your financial advisor is paid to keep you poor",
        },
    },
    NicheProfile {
        key: "gaming",
        name: "Gaming",
        vocabulary: &[
            "ranked", "loadout", "FPS", "controller", "speedrun", "boss", "patch", "meta", "indie",
            "console",
        ],
        pain_points: &["input lag", "hardstuck rank", "toxic teammates", "stuttering", "grind"],
        desires: &["higher rank", "smoother frames", "a clean setup", "faster clears"],
        insider_terms: &["nerf", "buff", "frame data", "aim trainer", "tier list"],
        examples: SpiceExamples {
            mild: "One setting that boosted my FPS",
            medium: "This loadout is carrying ranked right now",
            hot: "The new patch ruined the best class",
            extreme: "Your favorite streamer is bad at this game",
        },
    },
    NicheProfile {
        key: "education",
        name: "Education & Study",
        vocabulary: &[
            "exams", "notes", "flashcards", "study", "focus", "grades", "essay", "lecture",
            "memory", "deadline",
        ],
        pain_points: &[
            "procrastination",
            "exam anxiety",
            "forgetting everything",
            "all-nighters",
            "messy notes",
        ],
        desires: &["better grades", "faster learning", "less stress", "free evenings"],
        insider_terms: &["spaced repetition", "active recall", "Pomodoro", "Feynman technique"],
        examples: SpiceExamples {
            mild: "How I remember everything I read",
            medium: "Highlighting your notes is a waste of time",
            hot: "Rewriting notes is studying theatre",
            extreme: "Your degree taught you how to memorise, not think",
        },
    },
    NicheProfile {
        key: "parenting",
        name: "Parenting & Family",
        vocabulary: &[
            "toddler", "bedtime", "snacks", "tantrums", "school", "screen time", "naps",
            "siblings", "lunchbox", "playdate",
        ],
        pain_points: &[
            "bedtime battles",
            "picky eating",
            "tantrums",
            "mom guilt",
            "no alone time",
        ],
        desires: &["calm evenings", "independent kids", "more sleep", "easy mornings"],
        insider_terms: &["gentle parenting", "wake window", "sleep regression", "big feelings"],
        examples: SpiceExamples {
            mild: "The bedtime trick that worked in three nights",
            medium: "Your toddler's tantrums start with this snack",
            hot: "Gentle parenting is raising anxious kids",
            extreme: "Your parenting books were written for other kids",
        },
    },
];

/// Look up a niche profile, falling back to the default profile.
///
/// Matching ignores case and surrounding whitespace.
pub fn get_profile(key: &str) -> &'static NicheProfile {
    find(key).unwrap_or_else(default_profile)
}

/// Whether `key` names a profile in the table
pub fn is_known(key: &str) -> bool {
    find(key).is_some()
}

/// Every profile in table order
pub fn all_profiles() -> &'static [NicheProfile] {
    PROFILES
}

fn find(key: &str) -> Option<&'static NicheProfile> {
    let key = key.trim();
    PROFILES.iter().find(|p| p.key.eq_ignore_ascii_case(key))
}

fn default_profile() -> &'static NicheProfile {
    // The default key is part of the table above
    PROFILES
        .iter()
        .find(|p| p.key == DEFAULT_NICHE)
        .unwrap_or(&PROFILES[0])
}
