pub mod attendance;
pub mod team;

// Re-export all repositories for easy importing
pub use attendance::AttendanceRepository;
pub use team::TeamRepository;
