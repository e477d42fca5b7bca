pub mod auth_cmd;
pub mod common;
pub mod completions;
pub mod config;
pub mod consultations;
pub mod diets;
pub mod history;
pub mod pets;
pub mod profile;
pub mod requests;
pub mod rewards;
