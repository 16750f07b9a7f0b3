//! Append-only chat transcript, persisted under its own key.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::responder::{self, Reply};
use crate::error::Result;
use crate::storage::{keys, load_json, save_json, ChatConfig, KeyValueStore};

pub const GREETING: &str = "Hello, I'm here for you 24/7. I'm a safe, non-judgmental space where you can share your thoughts, struggles, and victories. How can I support you today?";

/// Shortcut prompts offered on a fresh conversation.
pub const QUICK_PROMPTS: [&str; 4] = [
    "I'm having an urge",
    "I relapsed",
    "Need encouragement",
    "Celebrate progress",
];

/// Transcripts this long or shorter still show the quick prompts.
const QUICK_PROMPT_LIMIT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Therapist,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(text: impl Into<String>, sender: Sender, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            timestamp: at,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// A conversation containing only the greeting.
    pub fn greeting(now: DateTime<Utc>) -> Self {
        Self {
            messages: vec![Message::new(GREETING, Sender::Therapist, now)],
        }
    }

    /// Load the persisted transcript, or greet when none is usable.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, now: DateTime<Utc>) -> Self {
        match load_json::<Vec<Message>, _>(store, keys::THERAPIST_MESSAGES) {
            Some(messages) if !messages.is_empty() => Self { messages },
            _ => Self::greeting(now),
        }
    }

    pub fn persist<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<()> {
        save_json(store, keys::THERAPIST_MESSAGES, &self.messages)
    }

    pub fn clear<S: KeyValueStore + ?Sized>(store: &S) -> Result<()> {
        store.remove(keys::THERAPIST_MESSAGES)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn shows_quick_prompts(&self) -> bool {
        self.messages.len() <= QUICK_PROMPT_LIMIT
    }

    /// Append a user message. Blank input is ignored.
    pub fn push_user(&mut self, text: &str, now: DateTime<Utc>) -> Option<&Message> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.messages.push(Message::new(text, Sender::User, now));
        self.messages.last()
    }

    pub fn push_therapist(&mut self, text: &str, now: DateTime<Utc>) -> &Message {
        self.messages.push(Message::new(text, Sender::Therapist, now));
        &self.messages[self.messages.len() - 1]
    }

    /// Answer a user message that was just appended.
    pub fn reply_to<R: Rng + ?Sized>(
        &mut self,
        user_text: &str,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Reply {
        let reply = responder::respond(user_text, rng);
        self.push_therapist(reply.text, now);
        reply
    }
}

/// Simulated typing pause before a reply is appended.
pub fn typing_delay<R: Rng>(config: &ChatConfig, rng: &mut R) -> Duration {
    let jitter = if config.typing_delay_jitter_ms == 0 {
        0
    } else {
        rng.gen_range(0..config.typing_delay_jitter_ms)
    };
    let total = config.typing_delay_min_ms.saturating_add(jitter);
    Duration::milliseconds(i64::try_from(total).unwrap_or(i64::MAX))
}
