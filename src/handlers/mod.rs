pub mod attendance;
pub mod check_in;
pub mod shared;
pub mod teams;
