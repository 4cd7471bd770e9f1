// Domain services: authorization, hiring workflow, plans, logs and progress

pub mod authorization;
pub mod hiring_service;
pub mod progress_service;
pub mod workout_log_service;
pub mod workout_plan_service;

pub use authorization::{authorize, Action};
pub use hiring_service::HiringService;
pub use progress_service::{compute_streak, ProgressService};
pub use workout_log_service::WorkoutLogService;
pub use workout_plan_service::WorkoutPlanService;
