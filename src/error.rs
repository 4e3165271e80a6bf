use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KiranaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input is not a decodable image: {0}")]
    UnsupportedInput(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("Invalid compression policy: {0}")]
    InvalidPolicy(String),

    #[error("Invalid image dimensions: {0}x{1}. Maximum allowed: {2}x{2}")]
    InvalidDimensions(u32, u32, u32),

    #[error("File too large: {0} bytes. Maximum allowed: {1} bytes")]
    FileTooLarge(u64, u64),

    #[error("Not an image file: {0} (MIME type {1})")]
    NotAnImage(PathBuf, String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    #[error("Unknown category: {0}. Expected one of: Snacks, Drinks, Grocery, Dairy, Bakery, Other")]
    UnknownCategory(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Document store error: {0}")]
    Store(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Not logged in. Run `kirana login` first")]
    NotLoggedIn,

    #[error("Wrong password")]
    WrongPassword,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, KiranaError>;
