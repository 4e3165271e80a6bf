use crate::error::{KiranaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The shop's fixed category set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Snacks,
    Drinks,
    Grocery,
    Dairy,
    Bakery,
    Other,
}

impl Category {
    pub fn all() -> [Category; 6] {
        [
            Category::Snacks,
            Category::Drinks,
            Category::Grocery,
            Category::Dairy,
            Category::Bakery,
            Category::Other,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Snacks => "Snacks",
            Category::Drinks => "Drinks",
            Category::Grocery => "Grocery",
            Category::Dairy => "Dairy",
            Category::Bakery => "Bakery",
            Category::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Snacks => "🍟",
            Category::Drinks => "🥤",
            Category::Grocery => "🌾",
            Category::Dairy => "🥛",
            Category::Bakery => "🍞",
            Category::Other => "🛒",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = KiranaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "snacks" => Ok(Category::Snacks),
            "drinks" => Ok(Category::Drinks),
            "grocery" => Ok(Category::Grocery),
            "dairy" => Ok(Category::Dairy),
            "bakery" => Ok(Category::Bakery),
            "other" => Ok(Category::Other),
            _ => Err(KiranaError::UnknownCategory(s.to_string())),
        }
    }
}

/// One catalog entry, keyed by the store-generated document id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: Category,
    pub badge: Option<String>,
    pub image: Option<String>,
    pub in_stock: bool,
}

/// Product fields for a create, before the store assigns an id.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub category: Category,
    pub badge: Option<String>,
    pub image: Option<String>,
    pub in_stock: bool,
}

impl ProductDraft {
    pub fn new(
        name: &str,
        price: f64,
        category: Category,
        badge: Option<String>,
        image: Option<String>,
    ) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(KiranaError::InvalidProduct("name is required".to_string()));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(KiranaError::InvalidProduct(format!(
                "price {} must be a non-negative number",
                price
            )));
        }
        let badge = badge.map(|b| b.trim().to_string()).filter(|b| !b.is_empty());
        Ok(Self {
            name: name.to_string(),
            price,
            category,
            badge,
            image,
            in_stock: true,
        })
    }
}

/// Partial update for an existing product; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<Category>,
    pub badge: Option<Option<String>>,
    pub image: Option<String>,
    pub in_stock: Option<bool>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.badge.is_none()
            && self.image.is_none()
            && self.in_stock.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(KiranaError::InvalidProduct("name is required".to_string()));
            }
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(KiranaError::InvalidProduct(format!(
                    "price {} must be a non-negative number",
                    price
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_from_str_case_insensitive() {
        assert_eq!(Category::from_str("snacks").unwrap(), Category::Snacks);
        assert_eq!(Category::from_str("Drinks").unwrap(), Category::Drinks);
        assert_eq!(Category::from_str("DAIRY").unwrap(), Category::Dairy);
        assert!(matches!(
            Category::from_str("electronics"),
            Err(KiranaError::UnknownCategory(_))
        ));
    }

    #[test]
    fn category_display_round_trip() {
        for cat in Category::all() {
            assert_eq!(Category::from_str(&cat.to_string()).unwrap(), cat);
        }
    }

    #[test]
    fn draft_trims_and_validates() {
        let draft = ProductDraft::new(
            "  Parle-G Biscuit 400g  ",
            20.0,
            Category::Snacks,
            Some("  ".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(draft.name, "Parle-G Biscuit 400g");
        assert_eq!(draft.badge, None);
        assert!(draft.in_stock);
    }

    #[test]
    fn draft_rejects_empty_name_and_negative_price() {
        assert!(ProductDraft::new("   ", 10.0, Category::Other, None, None).is_err());
        assert!(ProductDraft::new("Lays", -1.0, Category::Snacks, None, None).is_err());
        assert!(ProductDraft::new("Lays", f64::NAN, Category::Snacks, None, None).is_err());
    }

    #[test]
    fn update_empty_detection() {
        assert!(ProductUpdate::default().is_empty());
        let update = ProductUpdate {
            price: Some(25.0),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert!(update.validate().is_ok());
    }

    #[test]
    fn update_validation() {
        let update = ProductUpdate {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = ProductUpdate {
            price: Some(-5.0),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
