pub mod attendance;
pub mod team;

// Re-export all models for easy importing
pub use attendance::*;
pub use team::*;
