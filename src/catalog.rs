use crate::product::{Category, Product};

/// Stock visibility filter for the storefront view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StockFilter {
    #[default]
    All,
    Available,
    Unavailable,
}

impl std::fmt::Display for StockFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StockFilter::All => "all",
            StockFilter::Available => "available",
            StockFilter::Unavailable => "unavailable",
        };
        write!(f, "{}", name)
    }
}

/// One storefront query: name substring, optional category, stock filter.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub query: Option<String>,
    pub category: Option<Category>,
    pub stock: StockFilter,
}

impl SearchFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let match_name = match &self.query {
            Some(q) => product.name.to_lowercase().contains(&q.to_lowercase()),
            None => true,
        };
        let match_category = match self.category {
            Some(cat) => product.category == cat,
            None => true,
        };
        let match_stock = match self.stock {
            StockFilter::All => true,
            StockFilter::Available => product.in_stock,
            StockFilter::Unavailable => !product.in_stock,
        };
        match_name && match_category && match_stock
    }
}

/// Single-pass filter over the in-memory product list.
pub fn filter_products<'a>(products: &'a [Product], filter: &SearchFilter) -> Vec<&'a Product> {
    products.iter().filter(|p| filter.matches(p)).collect()
}

pub fn in_stock_count(products: &[Product]) -> usize {
    products.iter().filter(|p| p.in_stock).count()
}

/// Built-in catalog shown when the store is empty or unreachable.
pub fn demo_products() -> Vec<Product> {
    let demo = [
        ("Parle-G Biscuit", 10.0, Category::Snacks, Some("Best Seller"), true),
        ("Lays Classic Salted", 20.0, Category::Snacks, None, true),
        ("Coca-Cola 500ml", 40.0, Category::Drinks, Some("Chilled ❄️"), false),
        ("Basmati Rice 1kg", 90.0, Category::Grocery, None, true),
        ("Kurkure Masala", 15.0, Category::Snacks, Some("Spicy 🌶️"), true),
        ("Frooti Mango 200ml", 15.0, Category::Drinks, None, false),
    ];
    demo.iter()
        .enumerate()
        .map(|(i, (name, price, category, badge, in_stock))| Product {
            id: format!("demo-{}", i + 1),
            name: name.to_string(),
            price: *price,
            category: *category,
            badge: badge.map(str::to_string),
            image: None,
            in_stock: *in_stock,
        })
        .collect()
}
