pub mod catalog;
pub mod cli;
pub mod commands;
pub mod compress;
pub mod config;
pub mod constants;
pub mod error;
pub mod logger;
pub mod product;
pub mod session;
pub mod store;
pub mod upload;

pub use catalog::{demo_products, filter_products, in_stock_count, SearchFilter, StockFilter};
pub use compress::{
    compress, mime_for_extension, target_dimensions, CompressedImage, CompressionPolicy,
    SourceImage,
};
pub use config::Config;
pub use error::{KiranaError, Result};
pub use product::{Category, Product, ProductDraft, ProductUpdate};
pub use store::ProductStore;
pub use upload::{jpg_file_name, progress_percent, UploadEvent, Uploader};
