pub mod assistant;
pub mod catalog;
pub mod corrections;
pub mod decisions;
pub mod domain;
pub mod goals;
pub mod matcher;
pub mod ports;
pub mod responder;

pub use assistant::{Assistant, AssistantError, DecisionReply, Reply};
pub use catalog::Catalog;
pub use corrections::{Correction, CorrectionParser};
pub use decisions::{decision_response, Choice, DecisionOutcome};
pub use domain::{
    ActivityLevel, Alternative, PrimaryGoal, Product, ProfileError, SavingsLedger, User,
    UserGoals, UserProfile,
};
pub use goals::{is_goal_achieved, progress_toward_goals, GoalKind, GoalProgress, GoalProgressReport};
pub use ports::{IdentityProvider, KeyValueStore, PortError, PortResult};
