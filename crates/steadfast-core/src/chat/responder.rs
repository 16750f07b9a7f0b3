//! Keyword-driven canned replies.
//!
//! There is no dialogue state: each input is classified on its own by
//! lower-cased substring match, and a reply is drawn uniformly from the
//! category's pool.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatCategory {
    Urge,
    Relapse,
    Progress,
    Support,
    General,
}

impl ChatCategory {
    /// Categories in match priority order; `General` is the fallback.
    pub const PRIORITY: [ChatCategory; 4] = [
        ChatCategory::Urge,
        ChatCategory::Relapse,
        ChatCategory::Progress,
        ChatCategory::Support,
    ];

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            ChatCategory::Urge => &["urge", "tempt", "crav"],
            ChatCategory::Relapse => &["relapse", "fail", "gave in"],
            ChatCategory::Progress => &["progress", "achiev", "streak"],
            ChatCategory::Support => &["help", "support", "need"],
            ChatCategory::General => &[],
        }
    }

    pub fn responses(&self) -> &'static [&'static str] {
        match self {
            ChatCategory::Urge => &URGE_RESPONSES,
            ChatCategory::Relapse => &RELAPSE_RESPONSES,
            ChatCategory::Progress => &PROGRESS_RESPONSES,
            ChatCategory::Support => &SUPPORT_RESPONSES,
            ChatCategory::General => &GENERAL_RESPONSES,
        }
    }
}

const URGE_RESPONSES: [&str; 3] = [
    "I'm here with you. Take a deep breath. This urge is temporary, and you have the strength to ride it out. What triggered this feeling?",
    "You're doing the right thing by reaching out. Remember, urges pass. They always do. Let's work through this together. How are you feeling right now?",
    "This is a moment of strength, not weakness. You recognized the urge and chose to talk instead of act. I'm proud of you. What can I help you with?",
];

const RELAPSE_RESPONSES: [&str; 3] = [
    "First, I want you to know that a relapse doesn't erase your progress. You're human, and recovery isn't linear. What matters is that you're here now. How are you feeling?",
    "Setbacks are part of the journey. What you've learned about yourself during your streak is still valuable. Let's talk about what happened and how we can move forward.",
    "I'm glad you came back. That takes courage. Remember, tomorrow is a fresh start. What do you need right now to feel supported?",
];

const SUPPORT_RESPONSES: [&str; 3] = [
    "I'm here for you, anytime you need. Your journey matters, and so do your feelings. What's on your mind today?",
    "You're not alone in this. Many people are walking this same path, and you're doing incredibly well. How can I support you right now?",
    "It's okay to struggle. What you're doing takes real strength. I'm here to listen without judgment. What would you like to talk about?",
];

const PROGRESS_RESPONSES: [&str; 3] = [
    "Every day clean is a victory. You're building new neural pathways and reclaiming your life. How does it feel to see your progress?",
    "The work you're doing is transforming you from the inside out. Your brain is healing, and you're proving to yourself that you're stronger than you thought. What changes have you noticed?",
    "Progress isn't just about the numbers. It's about who you're becoming. I can see your commitment, and it's inspiring. What are you most proud of?",
];

const GENERAL_RESPONSES: [&str; 3] = [
    "I'm listening. Take your time and share what's on your heart.",
    "Your feelings are valid, and this is a safe space. What would you like to explore today?",
    "I'm here to support you without judgment. How are you really doing?",
];

/// Pick the first category whose keywords appear in `input`.
pub fn classify(input: &str) -> ChatCategory {
    let lower = input.to_lowercase();
    ChatCategory::PRIORITY
        .into_iter()
        .find(|category| category.keywords().iter().any(|kw| lower.contains(kw)))
        .unwrap_or(ChatCategory::General)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub category: ChatCategory,
    pub text: &'static str,
}

/// Classify `input` and draw a reply from its pool.
pub fn respond<R: Rng + ?Sized>(input: &str, rng: &mut R) -> Reply {
    let category = classify(input);
    let pool = category.responses();
    // Pools are non-empty constants.
    let text = pool.choose(rng).copied().unwrap_or(GENERAL_RESPONSES[0]);
    Reply { category, text }
}
