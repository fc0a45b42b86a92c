mod scanner;

pub use scanner::{find_image_files, is_supported_image, ImageScan};
