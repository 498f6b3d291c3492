pub mod placeholder_image;
