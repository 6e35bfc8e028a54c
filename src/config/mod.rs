// src/config/mod.rs
pub mod feedback;

pub use feedback::FeedbackConfig;
