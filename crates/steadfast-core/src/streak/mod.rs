mod data;
pub mod insights;
pub mod milestone;
mod store;

pub use data::{elapsed_days, StreakData, MS_PER_DAY};
pub use insights::{DashboardSummary, MonthCalendar, ProgressSummary};
pub use milestone::{evaluate as evaluate_milestones, Milestone, MilestoneReport, MILESTONES};
pub use store::StreakStore;
