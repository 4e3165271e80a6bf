use crate::catalog::{demo_products, filter_products, in_stock_count, SearchFilter, StockFilter};
use crate::compress::{compress, CompressionPolicy, SourceImage};
use crate::config::Config;
use crate::constants::{
    DEFAULT_INITIAL_QUALITY, DEFAULT_MAX_WIDTH, DEFAULT_MIN_QUALITY, DEFAULT_QUALITY_STEP,
    DEFAULT_TARGET_SIZE_BYTES,
};
use crate::error::{KiranaError, Result};
use crate::product::{Category, Product, ProductDraft, ProductUpdate};
use crate::session;
use crate::store::ProductStore;
use crate::upload::{jpg_file_name, UploadEvent, Uploader};
use crate::{info, verbose, warn};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

pub fn login(config: &Config, password: &str) -> Result<()> {
    session::login(password, &config.admin.password)?;
    info!("✅ Logged in. Admin commands unlocked");
    Ok(())
}

pub fn logout() -> Result<()> {
    if session::logout()? {
        info!("👋 Logged out");
    } else {
        info!("No active session");
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn add(
    config: &Config,
    name: &str,
    price: f64,
    category: Category,
    badge: Option<String>,
    image: Option<PathBuf>,
    image_url: Option<String>,
) -> Result<()> {
    session::require_login()?;
    let runtime = runtime()?;
    runtime.block_on(async {
        let image_link = match image {
            Some(path) => Some(compress_and_upload(config, &path).await?),
            None => image_url,
        };
        let draft = ProductDraft::new(name, price, category, badge, image_link)?;
        let store = ProductStore::new(&config.store);
        let product = store.create(&draft).await?;
        info!("✅ Product added: {} (id {})", product.name, product.id);
        Ok(())
    })
}

pub fn list(config: &Config, search: Option<String>) -> Result<()> {
    session::require_login()?;
    let runtime = runtime()?;
    let products = runtime.block_on(ProductStore::new(&config.store).list())?;
    let filter = SearchFilter {
        query: search.clone(),
        ..Default::default()
    };
    let hits = filter_products(&products, &filter);

    if hits.is_empty() {
        match search {
            Some(q) => info!("No results for \"{}\"", q),
            None => info!("Catalog is empty. Add your first product with `kirana add`"),
        }
        return Ok(());
    }
    for product in &hits {
        info!("{}", admin_row(product));
    }
    info!(
        "\n📦 {} of {} in stock",
        in_stock_count(&products),
        products.len()
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn edit(
    config: &Config,
    id: &str,
    name: Option<String>,
    price: Option<f64>,
    category: Option<Category>,
    badge: Option<String>,
    image: Option<PathBuf>,
    image_url: Option<String>,
) -> Result<()> {
    session::require_login()?;
    let runtime = runtime()?;
    runtime.block_on(async {
        let store = ProductStore::new(&config.store);
        let existing = store.get(id).await?;
        verbose!("Editing {} ({})", existing.name, existing.id);

        let image_link = match image {
            Some(path) => Some(compress_and_upload(config, &path).await?),
            None => image_url,
        };
        let update = ProductUpdate {
            name,
            price,
            category,
            // Empty badge flag clears the stored badge.
            badge: badge.map(|b| {
                let trimmed = b.trim().to_string();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed)
                }
            }),
            image: image_link,
            in_stock: None,
        };
        if update.is_empty() {
            info!("Nothing to change");
            return Ok(());
        }
        store.update(id, &update).await?;
        info!("✅ Product updated: {}", existing.name);
        Ok(())
    })
}

pub fn remove(config: &Config, id: &str) -> Result<()> {
    session::require_login()?;
    let runtime = runtime()?;
    runtime.block_on(async {
        let store = ProductStore::new(&config.store);
        let existing = store.get(id).await?;
        store.delete(id).await?;
        info!("🗑️  Deleted: {}", existing.name);
        Ok(())
    })
}

pub fn toggle(config: &Config, id: &str) -> Result<()> {
    session::require_login()?;
    let runtime = runtime()?;
    runtime.block_on(async {
        let store = ProductStore::new(&config.store);
        let existing = store.get(id).await?;
        let new_stock = !existing.in_stock;
        store.set_stock(id, new_stock).await?;
        if new_stock {
            info!("✅ {} is back in stock", existing.name);
        } else {
            info!("🚫 {} marked out of stock", existing.name);
        }
        Ok(())
    })
}

pub fn catalog(
    config: Option<&Config>,
    search: Option<String>,
    category: Option<Category>,
    stock: StockFilter,
) -> Result<()> {
    // The storefront falls back to the demo catalog rather than failing.
    let products = match config {
        Some(config) => {
            let runtime = runtime()?;
            match runtime.block_on(ProductStore::new(&config.store).list()) {
                Ok(products) if !products.is_empty() => products,
                Ok(_) => {
                    verbose!("Store is empty, showing demo catalog");
                    demo_products()
                }
                Err(e) => {
                    warn!("Store unreachable ({}), showing demo catalog", e);
                    demo_products()
                }
            }
        }
        None => {
            verbose!("No config, showing demo catalog");
            demo_products()
        }
    };

    let filter = SearchFilter {
        query: search.clone(),
        category,
        stock,
    };
    let hits = filter_products(&products, &filter);

    if hits.is_empty() {
        info!("🛍️  Nothing matches your filters");
        return Ok(());
    }
    for product in &hits {
        info!("{}", storefront_card(product));
    }
    info!(
        "\n{} item{} · {} in stock",
        hits.len(),
        if hits.len() == 1 { "" } else { "s" },
        in_stock_count(&products)
    );
    Ok(())
}

pub fn compress_file(
    input: &Path,
    output: &Path,
    target_kb: Option<u64>,
    max_width: Option<u32>,
    quality: Option<f32>,
    step: Option<f32>,
    min_quality: Option<f32>,
) -> Result<()> {
    let policy = CompressionPolicy::new(
        target_kb.map(|kb| kb * 1024).unwrap_or(DEFAULT_TARGET_SIZE_BYTES),
        max_width.unwrap_or(DEFAULT_MAX_WIDTH),
        quality.unwrap_or(DEFAULT_INITIAL_QUALITY),
        step.unwrap_or(DEFAULT_QUALITY_STEP),
        min_quality.unwrap_or(DEFAULT_MIN_QUALITY),
    )?;

    info!("🗜️  Compressing image: {:?}", input);
    let source = SourceImage::from_path(input)?;
    reject_non_image(input, &source)?;
    let original_size = source.bytes.len() as u64;

    let pb = spinner("Compressing...");
    let result = compress(&source, &policy)?;
    pb.finish_with_message("✅ Compression complete");

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|_| KiranaError::DirectoryCreationFailed(parent.to_path_buf()))?;
    }
    fs::write(output, &result.bytes)?;

    info!("📊 Original size: {} bytes", original_size);
    info!(
        "📈 Compressed size: {} bytes ({}x{}, quality {:.2})",
        result.byte_size(),
        result.width,
        result.height,
        result.quality
    );
    let ratio = (original_size as f64 - result.byte_size() as f64) / original_size as f64 * 100.0;
    if ratio > 0.0 {
        info!("🎯 Reduced file size by {:.1}%", ratio);
    } else {
        warn!("File size increased by {:.1}%", ratio.abs());
    }
    if result.byte_size() > policy.target_size_bytes {
        warn!(
            "Still over the {} KiB budget at the quality floor",
            policy.target_size_bytes / 1024
        );
    }
    Ok(())
}

/// Photo attachment flow shared by `add` and `edit`: reject non-images,
/// compress (falling back to the original bytes if the compressor cannot
/// handle the file), then upload and return the public URL.
async fn compress_and_upload(config: &Config, path: &Path) -> Result<String> {
    let source = SourceImage::from_path(path)?;
    reject_non_image(path, &source)?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("photo")
        .to_string();

    info!("⚡ Compressing…");
    let (bytes, upload_name, mime) = match compress(&source, &CompressionPolicy::default()) {
        Ok(result) => {
            verbose!(
                "Compressed to {} bytes at quality {:.2} ({}x{})",
                result.byte_size(),
                result.quality,
                result.width,
                result.height
            );
            (result.bytes, jpg_file_name(&file_name), result.mime.to_string())
        }
        Err(e) => {
            // Same fallback the admin UI used: upload the original untouched.
            warn!("Compression failed ({}), uploading original", e);
            let mime = source
                .mime
                .clone()
                .unwrap_or_else(|| "application/octet-stream".to_string());
            (source.bytes, file_name, mime)
        }
    };

    let uploader = Uploader::new(&config.uploads);
    let mut rx = uploader.upload(bytes, upload_name, &mime);

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("☁️  Uploading {bar:40.green} {pos}%")
            .unwrap()
            .progress_chars("█▓░"),
    );
    while let Some(event) = rx.recv().await {
        match event {
            UploadEvent::Progress(pct) => pb.set_position(pct as u64),
            UploadEvent::Completed(url) => {
                pb.finish();
                info!("✅ Image uploaded");
                return Ok(url);
            }
            UploadEvent::Failed(reason) => {
                pb.abandon();
                return Err(KiranaError::Upload(reason));
            }
        }
    }
    Err(KiranaError::Upload("upload ended without a result".to_string()))
}

fn reject_non_image(path: &Path, source: &SourceImage) -> Result<()> {
    if source.is_image_mime() {
        return Ok(());
    }
    Err(KiranaError::NotAnImage(
        path.to_path_buf(),
        source
            .mime
            .clone()
            .unwrap_or_else(|| "unknown".to_string()),
    ))
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Runtime::new()?)
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message);
    pb
}

fn admin_row(product: &Product) -> String {
    let stock = if product.in_stock { "🟢" } else { "🔴" };
    let badge = product
        .badge
        .as_deref()
        .map(|b| format!(" [{}]", b))
        .unwrap_or_default();
    format!(
        "{} {:<24} ₹{:<8} {:<8} {}{}",
        stock, product.name, product.price, product.category, product.id, badge
    )
}

fn storefront_card(product: &Product) -> String {
    let stock = if product.in_stock {
        "".to_string()
    } else {
        "  — SOLD OUT".to_string()
    };
    let badge = product
        .badge
        .as_deref()
        .map(|b| format!("  ✨ {}", b))
        .unwrap_or_default();
    format!(
        "{} {:<24} ₹{}{}{}",
        product.category.icon(),
        product.name,
        product.price,
        badge,
        stock
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::demo_products;

    #[test]
    fn admin_row_shows_stock_and_badge() {
        let products = demo_products();
        let row = admin_row(&products[0]);
        assert!(row.contains("🟢"));
        assert!(row.contains("Parle-G Biscuit"));
        assert!(row.contains("[Best Seller]"));

        let sold_out = admin_row(&products[2]);
        assert!(sold_out.contains("🔴"));
    }

    #[test]
    fn storefront_card_marks_sold_out() {
        let products = demo_products();
        let card = storefront_card(&products[2]);
        assert!(card.contains("SOLD OUT"));
        assert!(card.contains("🥤"));

        let available = storefront_card(&products[0]);
        assert!(!available.contains("SOLD OUT"));
    }
}
