//! Integration tests for the companion chat.

use chrono::{Duration, TimeZone, Utc};
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use steadfast_core::chat::{classify, respond, ChatCategory, Sender, Transcript, GREETING};
use steadfast_core::Database;

#[test]
fn test_quick_prompts_route_to_their_pools() {
    let mut rng = Mcg128Xsl64::seed_from_u64(42);
    let cases = [
        ("I'm having an urge", ChatCategory::Urge),
        ("I relapsed", ChatCategory::Relapse),
        ("Need encouragement", ChatCategory::Support),
        ("Celebrate progress", ChatCategory::Progress),
    ];
    for (prompt, expected) in cases {
        for _ in 0..20 {
            let reply = respond(prompt, &mut rng);
            assert_eq!(reply.category, expected, "{prompt}");
            assert!(expected.responses().contains(&reply.text));
        }
    }
}

#[test]
fn test_priority_when_several_keywords_match() {
    assert_eq!(classify("I failed but I need help with this craving"), ChatCategory::Urge);
    assert_eq!(classify("gave in, need support"), ChatCategory::Relapse);
    assert_eq!(classify("my streak! help me keep it"), ChatCategory::Progress);
    assert_eq!(classify("good morning"), ChatCategory::General);
}

#[test]
fn test_conversation_survives_restart() {
    let db = Database::open_memory().unwrap();
    let mut rng = Mcg128Xsl64::seed_from_u64(7);
    let start = Utc.with_ymd_and_hms(2024, 5, 5, 23, 0, 0).unwrap();

    let mut transcript = Transcript::load(&db, start);
    assert_eq!(transcript.messages()[0].text, GREETING);

    for (i, text) in ["I'm having an urge", "thanks", "   "].iter().enumerate() {
        let at = start + Duration::minutes(i as i64);
        if transcript.push_user(text, at).is_some() {
            transcript.reply_to(text, at + Duration::seconds(2), &mut rng);
            transcript.persist(&db).unwrap();
        }
    }

    let reloaded = Transcript::load(&db, start + Duration::hours(1));
    assert_eq!(reloaded.len(), 5);
    let senders: Vec<Sender> = reloaded.messages().iter().map(|m| m.sender).collect();
    assert_eq!(
        senders,
        vec![Sender::Therapist, Sender::User, Sender::Therapist, Sender::User, Sender::Therapist]
    );
    assert!(reloaded.messages().windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}
