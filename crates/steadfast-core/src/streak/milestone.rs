//! Milestone badges evaluated against the current streak.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub days: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub reward: &'static str,
}

/// Fixed badge table, ascending by `days`.
pub const MILESTONES: [Milestone; 7] = [
    Milestone {
        days: 1,
        title: "First Step",
        description: "You started your journey",
        reward: "Foundation Badge",
    },
    Milestone {
        days: 3,
        title: "Three Days Strong",
        description: "Building momentum",
        reward: "Momentum Badge",
    },
    Milestone {
        days: 7,
        title: "One Week",
        description: "First major milestone",
        reward: "Week Warrior",
    },
    Milestone {
        days: 14,
        title: "Two Weeks",
        description: "Building habits",
        reward: "Habit Builder",
    },
    Milestone {
        days: 30,
        title: "One Month",
        description: "Major transformation",
        reward: "Monthly Master",
    },
    Milestone {
        days: 60,
        title: "Two Months",
        description: "Serious dedication",
        reward: "Dedicated One",
    },
    Milestone {
        days: 90,
        title: "90 Days",
        description: "Complete reboot achieved",
        reward: "Reboot Champion",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneState {
    Achieved,
    Locked,
}

#[derive(Debug, Clone, Serialize)]
pub struct MilestoneStatus {
    #[serde(flatten)]
    pub milestone: Milestone,
    pub state: MilestoneState,
}

impl MilestoneStatus {
    pub fn is_achieved(&self) -> bool {
        self.state == MilestoneState::Achieved
    }
}

/// The first locked milestone and how far away it is.
#[derive(Debug, Clone, Serialize)]
pub struct NextMilestone {
    pub days: u32,
    pub title: &'static str,
    pub days_remaining: u32,
    /// `current_streak / days`, in `[0, 1)`.
    pub progress_fraction: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MilestoneReport {
    pub current_streak: u32,
    pub milestones: Vec<MilestoneStatus>,
    /// `None` once every milestone is achieved.
    pub next: Option<NextMilestone>,
}

impl MilestoneReport {
    pub fn achieved(&self) -> impl Iterator<Item = &Milestone> {
        self.milestones
            .iter()
            .filter(|s| s.is_achieved())
            .map(|s| &s.milestone)
    }

    pub fn all_achieved(&self) -> bool {
        self.next.is_none()
    }
}

/// Classify every milestone against `current_streak`.
pub fn evaluate(current_streak: u32) -> MilestoneReport {
    let milestones = MILESTONES
        .iter()
        .map(|m| MilestoneStatus {
            milestone: *m,
            state: if current_streak >= m.days {
                MilestoneState::Achieved
            } else {
                MilestoneState::Locked
            },
        })
        .collect();

    let next = MILESTONES
        .iter()
        .find(|m| m.days > current_streak)
        .map(|m| NextMilestone {
            days: m.days,
            title: m.title,
            days_remaining: m.days - current_streak,
            progress_fraction: f64::from(current_streak) / f64::from(m.days),
        });

    MilestoneReport {
        current_streak,
        milestones,
        next,
    }
}

/// Milestones crossed when the streak moves from `before` to `after`.
pub fn newly_reached(before: u32, after: u32) -> Vec<Milestone> {
    MILESTONES
        .iter()
        .filter(|m| m.days > before && m.days <= after)
        .copied()
        .collect()
}
