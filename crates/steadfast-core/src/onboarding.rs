//! Introductory carousel shown before sign-in.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OnboardingStep {
    pub title: &'static str,
    pub description: &'static str,
}

pub const ONBOARDING_STEPS: [OnboardingStep; 4] = [
    OnboardingStep {
        title: "Take Control",
        description: "Start your journey to build discipline and mental clarity, one day at a time.",
    },
    OnboardingStep {
        title: "Reset Your Mind",
        description: "Break free from unhealthy patterns and reclaim your focus and energy.",
    },
    OnboardingStep {
        title: "Track Your Progress",
        description: "See your growth with daily streaks, milestones, and insights.",
    },
    OnboardingStep {
        title: "Your Privacy Matters",
        description: "All your data stays private and secure. This is your personal journey.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "step", rename_all = "snake_case")]
pub enum CarouselStatus {
    /// Showing the step at this index.
    Showing(usize),
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Carousel {
    index: usize,
    completed: bool,
}

impl Carousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> CarouselStatus {
        if self.completed {
            CarouselStatus::Completed
        } else {
            CarouselStatus::Showing(self.index)
        }
    }

    pub fn current(&self) -> Option<&'static OnboardingStep> {
        if self.completed {
            None
        } else {
            ONBOARDING_STEPS.get(self.index)
        }
    }

    /// Advance one step; the last step completes the carousel.
    pub fn next(&mut self) -> CarouselStatus {
        if !self.completed {
            if self.index + 1 < ONBOARDING_STEPS.len() {
                self.index += 1;
            } else {
                self.completed = true;
            }
        }
        self.status()
    }

    pub fn skip(&mut self) -> CarouselStatus {
        self.completed = true;
        self.status()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}
