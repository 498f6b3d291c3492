pub mod card;
pub mod detail;
pub mod home;
pub mod navbar;
pub mod upload_form;
