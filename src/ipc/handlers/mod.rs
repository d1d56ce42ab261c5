pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod core;
pub mod fees;
pub mod notes;
pub mod students;
