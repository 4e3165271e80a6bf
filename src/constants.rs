/// Compression policy defaults, matching the values used in production.
pub const DEFAULT_TARGET_SIZE_BYTES: u64 = 70 * 1024;
pub const DEFAULT_MAX_WIDTH: u32 = 500;
pub const DEFAULT_INITIAL_QUALITY: f32 = 0.75;
pub const DEFAULT_QUALITY_STEP: f32 = 0.08;
pub const DEFAULT_MIN_QUALITY: f32 = 0.25;

/// Hard ceiling on input images; decoding anything bigger risks memory exhaustion.
pub const MAX_SOURCE_BYTES: u64 = 100 * 1024 * 1024;
pub const MAX_SOURCE_DIMENSION: u32 = 16384;

pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const PRODUCTS_COLLECTION: &str = "products";
pub const CLOUDINARY_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

/// Bytes handed to the transport per progress tick during upload.
pub const UPLOAD_CHUNK_SIZE: usize = 16 * 1024;

pub const CONFIG_DIR_NAME: &str = "kirana";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const SESSION_FILE_NAME: &str = "session";
pub const CONFIG_ENV_VAR: &str = "KIRANA_CONFIG";
