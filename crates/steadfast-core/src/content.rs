//! Static copy shown across the app: dashboard quotes, education cards and
//! the recovery timeline.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

pub const MOTIVATIONAL_QUOTES: [&str; 7] = [
    "Every day you resist is a victory.",
    "You are stronger than your urges.",
    "Discipline is choosing what you want most over what you want now.",
    "Your future self will thank you for today's effort.",
    "Progress, not perfection.",
    "You're building mental strength every single day.",
    "Small steps lead to massive change.",
];

pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    MOTIVATIONAL_QUOTES
        .choose(rng)
        .copied()
        .unwrap_or(MOTIVATIONAL_QUOTES[0])
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Benefit {
    pub title: &'static str,
    pub description: &'static str,
    pub details: [&'static str; 3],
}

pub const BENEFITS: [Benefit; 6] = [
    Benefit {
        title: "Mental Clarity",
        description: "Experience improved focus, sharper memory, and better decision-making as your brain chemistry rebalances.",
        details: ["Reduced brain fog", "Better concentration", "Enhanced cognitive function"],
    },
    Benefit {
        title: "More Energy",
        description: "Reclaim hours of your day and redirect your energy toward productive activities and meaningful goals.",
        details: ["Higher motivation levels", "More productive hours", "Better sleep quality"],
    },
    Benefit {
        title: "Emotional Balance",
        description: "Develop healthier relationships with yourself and others. Experience more stable moods and genuine emotions.",
        details: ["Reduced anxiety", "Improved mood stability", "Better emotional regulation"],
    },
    Benefit {
        title: "Realistic Perspective",
        description: "Reset unrealistic expectations and develop a healthier view of relationships and intimacy.",
        details: ["Healthier expectations", "Better self-image", "Improved confidence"],
    },
    Benefit {
        title: "Better Relationships",
        description: "Build deeper, more authentic connections. Improve communication and emotional intimacy with partners.",
        details: ["Deeper connections", "Better communication", "Increased empathy"],
    },
    Benefit {
        title: "Self-Discipline",
        description: "Strengthen your willpower and self-control. This journey builds mental resilience that applies to all areas of life.",
        details: ["Stronger willpower", "Better self-control", "Enhanced discipline"],
    },
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RecoveryPhase {
    pub from_day: u32,
    pub to_day: u32,
    pub title: &'static str,
    pub changes: &'static str,
}

impl RecoveryPhase {
    pub fn contains(&self, day: u32) -> bool {
        (self.from_day..self.to_day).contains(&day)
    }
}

pub const RECOVERY_TIMELINE: [RecoveryPhase; 5] = [
    RecoveryPhase {
        from_day: 1,
        to_day: 7,
        title: "Week 1",
        changes: "Initial withdrawal symptoms, mood swings, strong urges",
    },
    RecoveryPhase {
        from_day: 7,
        to_day: 14,
        title: "Week 2",
        changes: "Urges start to decrease, improved energy, better sleep",
    },
    RecoveryPhase {
        from_day: 14,
        to_day: 30,
        title: "Weeks 3-4",
        changes: "Mental clarity improves, more stable mood, increased confidence",
    },
    RecoveryPhase {
        from_day: 30,
        to_day: 60,
        title: "Month 2",
        changes: "New habits forming, significant brain changes, emotional stability",
    },
    RecoveryPhase {
        from_day: 60,
        to_day: 90,
        title: "Month 3",
        changes: "Brain reset complete, natural dopamine response restored",
    },
];

/// The timeline phase a streak of `day` days falls in, if any.
pub fn current_phase(day: u32) -> Option<&'static RecoveryPhase> {
    RECOVERY_TIMELINE.iter().find(|p| p.contains(day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    #[test]
    fn quote_comes_from_list() {
        let mut rng = Mcg128Xsl64::seed_from_u64(5);
        assert!(MOTIVATIONAL_QUOTES.contains(&random_quote(&mut rng)));
    }

    #[test]
    fn timeline_is_contiguous() {
        assert!(RECOVERY_TIMELINE
            .windows(2)
            .all(|w| w[0].to_day == w[1].from_day));
    }

    #[test]
    fn phase_lookup() {
        assert!(current_phase(0).is_none());
        assert_eq!(current_phase(1).unwrap().title, "Week 1");
        assert_eq!(current_phase(7).unwrap().title, "Week 2");
        assert_eq!(current_phase(45).unwrap().title, "Month 2");
        assert!(current_phase(90).is_none());
    }
}
