use crate::constants::{STOCK_IMAGE_BASE, STOCK_IMAGE_TOPICS};

/// Supplies `image_url` for new submissions until real uploads exist.
pub trait ImageSource: Send + Sync {
    fn next_image_url(&self) -> String;
}

/// Random stock photo on the data/technology topics; the salt keeps each URL distinct.
#[derive(Debug, Clone, Default)]
pub struct StockPhotoSource;

impl ImageSource for StockPhotoSource {
    fn next_image_url(&self) -> String {
        stock_photo_url(rand::random::<f64>())
    }
}

pub fn stock_photo_url(salt: f64) -> String {
    format!("{STOCK_IMAGE_BASE}?{STOCK_IMAGE_TOPICS},{salt}")
}
