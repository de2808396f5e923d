//! Application services
//!
//! Services orchestrate domain logic and port interactions.

mod health_chat_service;
mod reply_service;
mod report_analysis_service;
mod trip_planner_service;

pub use health_chat_service::{HealthChatService, HealthChatTurn};
pub use reply_service::{AssistantReply, ReplyService};
pub use report_analysis_service::{ReportAnalysis, ReportAnalysisService, ReportDocument};
pub use trip_planner_service::{TripPlan, TripPlannerConfig, TripPlannerService, TripRequest};
