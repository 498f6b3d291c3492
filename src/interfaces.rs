pub mod repositories;
pub mod session;
pub mod views;
