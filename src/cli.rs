use crate::catalog::StockFilter;
use crate::product::Category;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kirana",
    about = "Catalog manager for a small retail shop",
    long_about = "kirana manages a shop's product catalog: browse the storefront, add and edit \
                  products, and attach photos that are compressed client-side before upload. \
                  Products live in a Firestore collection; photos are hosted on Cloudinary.",
    version,
    after_help = "EXAMPLES:\n  \
    kirana login balaji@2024\n  \
    kirana add --name \"Parle-G Biscuit 400g\" --price 20 --category snacks -i photo.jpg\n  \
    kirana catalog -s cola --stock available\n  \
    kirana compress photo.png small.jpg --target-kb 70 --max-width 500"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short = 'q', long, global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[arg(short = 'v', long, global = true, help = "Print extra diagnostics")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        help = "Config file path (default: ~/.config/kirana/config.toml or $KIRANA_CONFIG)"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Unlock admin commands with the shop password")]
    Login {
        #[arg(help = "Admin password")]
        password: String,
    },

    #[command(about = "Forget the admin session")]
    Logout,

    #[command(
        about = "Add a product to the catalog",
        long_about = "Add a product. A photo given with -i is compressed to fit the upload \
                      budget and pushed to the image host; alternatively link an existing \
                      image with --image-url."
    )]
    Add {
        #[arg(short = 'n', long, help = "Product name")]
        name: String,

        #[arg(short = 'p', long, help = "Price in rupees")]
        price: f64,

        #[arg(short = 'c', long, help = "Category (snacks, drinks, grocery, dairy, bakery, other)")]
        category: Category,

        #[arg(short = 'b', long, help = "Badge label, e.g. \"Best Seller\"")]
        badge: Option<String>,

        #[arg(short = 'i', long, help = "Photo file to compress and upload", conflicts_with = "image_url")]
        image: Option<PathBuf>,

        #[arg(long, help = "Use an already-hosted image URL instead of uploading")]
        image_url: Option<String>,
    },

    #[command(about = "List products (admin view)")]
    List {
        #[arg(short = 's', long, help = "Filter by name substring")]
        search: Option<String>,
    },

    #[command(
        about = "Edit a product's fields",
        long_about = "Patch one or more fields of an existing product. Only the flags you \
                      pass are changed; pass --badge \"\" to clear the badge. A new photo \
                      given with -i replaces the hosted image."
    )]
    Edit {
        #[arg(help = "Product id")]
        id: String,

        #[arg(short = 'n', long, help = "New name")]
        name: Option<String>,

        #[arg(short = 'p', long, help = "New price in rupees")]
        price: Option<f64>,

        #[arg(short = 'c', long, help = "New category")]
        category: Option<Category>,

        #[arg(short = 'b', long, help = "New badge label; empty string clears it")]
        badge: Option<String>,

        #[arg(short = 'i', long, help = "New photo file to compress and upload", conflicts_with = "image_url")]
        image: Option<PathBuf>,

        #[arg(long, help = "Replace the image with an already-hosted URL")]
        image_url: Option<String>,
    },

    #[command(about = "Delete a product")]
    Remove {
        #[arg(help = "Product id")]
        id: String,
    },

    #[command(about = "Flip a product between in stock and out of stock")]
    Toggle {
        #[arg(help = "Product id")]
        id: String,
    },

    #[command(
        about = "Browse the storefront catalog",
        long_about = "Public storefront view with search and filters. Falls back to the \
                      built-in demo catalog when the store is empty or unreachable."
    )]
    Catalog {
        #[arg(short = 's', long, help = "Filter by name substring")]
        search: Option<String>,

        #[arg(short = 'c', long, help = "Filter by category")]
        category: Option<Category>,

        #[arg(long, value_enum, default_value_t = StockFilter::All, help = "Stock filter")]
        stock: StockFilter,
    },

    #[command(
        about = "Compress an image file without uploading",
        long_about = "Run the upload compression pipeline standalone: shrink to the width \
                      cap, then re-encode as JPEG stepping quality down until the output \
                      fits the size budget or quality reaches the floor."
    )]
    Compress {
        #[arg(help = "Input image file")]
        input: PathBuf,

        #[arg(help = "Output JPEG file")]
        output: PathBuf,

        #[arg(
            short = 't',
            long,
            help = "Target size budget in KiB (default: 70)",
            long_help = "Best-effort upper bound on output size in KiB. Quality is reduced \
                         step by step until the output fits or the quality floor is hit."
        )]
        target_kb: Option<u64>,

        #[arg(short = 'w', long, help = "Maximum width in pixels (default: 500); never upscales")]
        max_width: Option<u32>,

        #[arg(long, help = "Starting JPEG quality, 0-1 (default: 0.75)")]
        quality: Option<f32>,

        #[arg(long, help = "Quality decrement per attempt (default: 0.08)")]
        step: Option<f32>,

        #[arg(long, help = "Quality floor, 0-1 (default: 0.25)")]
        min_quality: Option<f32>,
    },
}
