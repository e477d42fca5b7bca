//! Data models exchanged with the VeTech backend

mod appointment_request;
mod consultation;
mod diet;
mod gamification;
mod health;
mod pet;
mod profile;

pub use appointment_request::{
    AppointmentPriority, AppointmentRequest, AppointmentRequestStatus, NewAppointmentRequest,
};
pub use consultation::{
    available_time_slots, Consultation, ConsultationOverview, ConsultationStatus,
    NewConsultation, CLINIC_TIME_SLOTS,
};
pub use diet::{
    daily_calories, ActivityLevel, DailyProgress, Diet, DietObjective, DietProgress, DietRequest,
    DietStatus, FeedingType, GeneratedDietPlan,
};
pub use gamification::{
    Goal, GoalFilter, GoalKind, GoalPeriod, GoalProgress, GoalProgressStatus, GoalStatus,
    PetStatistics, PointEntry, PointsFilter, PointsHistoryEntry, PointsTotals, RankingPeriod,
    RedeemedReward, RedemptionStatus, Reward, RewardFilter, Statistics, StatisticsPeriod,
};
pub use health::{build_health_summary, HealthEntry, HealthEntryKind, HealthSummary};
pub use pet::{NewPet, Pet, PetUpdate};
pub use profile::{ClientProfile, ProfileUpdate};
