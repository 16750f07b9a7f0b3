//! Companion chat: a deterministic keyword classifier with canned replies,
//! plus the transcript the chat screen keeps.

pub mod responder;
pub mod transcript;

use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;

pub use responder::{classify, respond, ChatCategory, Reply};
pub use transcript::{typing_delay, Message, Sender, Transcript, GREETING, QUICK_PROMPTS};

/// Random source for reply and quote selection.
///
/// A fixed seed makes draws reproducible.
pub fn reply_rng(seed: Option<u64>) -> Mcg128Xsl64 {
    match seed {
        Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
        None => Mcg128Xsl64::from_entropy(),
    }
}
