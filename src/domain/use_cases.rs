pub mod controller;
pub mod navigation;
pub mod upload;
