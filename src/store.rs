use crate::config::StoreConfig;
use crate::constants::{FIRESTORE_BASE_URL, PRODUCTS_COLLECTION};
use crate::error::{KiranaError, Result};
use crate::product::{Category, Product, ProductDraft, ProductUpdate};
use serde_json::{json, Value};
use std::str::FromStr;

/// Firestore REST client for the `products` collection.
///
/// Plain document CRUD over `firestore.googleapis.com/v1`; no retries, no
/// offline cache. Field values use the REST typed-value envelope
/// (`stringValue`, `doubleValue`, ...).
pub struct ProductStore {
    client: reqwest::Client,
    documents_url: String,
    api_key: String,
}

impl ProductStore {
    pub fn new(config: &StoreConfig) -> Self {
        let documents_url = format!(
            "{}/projects/{}/databases/{}/documents",
            FIRESTORE_BASE_URL, config.project_id, config.database
        );
        Self {
            client: reqwest::Client::new(),
            documents_url,
            api_key: config.api_key.clone(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.documents_url, PRODUCTS_COLLECTION)
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}/{}", self.documents_url, PRODUCTS_COLLECTION, id)
    }

    /// Fetches the whole collection, following page tokens.
    pub async fn list(&self) -> Result<Vec<Product>> {
        let mut products = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut query = vec![
                ("key".to_string(), self.api_key.clone()),
                ("pageSize".to_string(), "300".to_string()),
            ];
            if let Some(token) = &page_token {
                query.push(("pageToken".to_string(), token.clone()));
            }
            let response = self
                .client
                .get(self.collection_url())
                .query(&query)
                .send()
                .await?;
            let body = check_response(response).await?;
            if let Some(documents) = body.get("documents").and_then(Value::as_array) {
                for doc in documents {
                    products.push(parse_document(doc)?);
                }
            }
            match body.get("nextPageToken").and_then(Value::as_str) {
                Some(token) => page_token = Some(token.to_string()),
                None => break,
            }
        }
        Ok(products)
    }

    pub async fn get(&self, id: &str) -> Result<Product> {
        let response = self
            .client
            .get(self.document_url(id))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(KiranaError::ProductNotFound(id.to_string()));
        }
        let body = check_response(response).await?;
        parse_document(&body)
    }

    /// Creates a document; Firestore assigns the id.
    pub async fn create(&self, draft: &ProductDraft) -> Result<Product> {
        let body = json!({ "fields": draft_fields(draft) });
        let response = self
            .client
            .post(self.collection_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;
        let body = check_response(response).await?;
        parse_document(&body)
    }

    /// Patches only the fields named in the update mask.
    pub async fn update(&self, id: &str, update: &ProductUpdate) -> Result<()> {
        update.validate()?;
        if update.is_empty() {
            return Ok(());
        }
        let (fields, mask) = update_fields(update);
        let mut query: Vec<(String, String)> =
            vec![("key".to_string(), self.api_key.clone())];
        for path in &mask {
            query.push(("updateMask.fieldPaths".to_string(), path.to_string()));
        }
        // currentDocument.exists keeps a patch from silently creating a doc.
        query.push(("currentDocument.exists".to_string(), "true".to_string()));
        let response = self
            .client
            .patch(self.document_url(id))
            .query(&query)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(KiranaError::ProductNotFound(id.to_string()));
        }
        check_response(response).await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.document_url(id))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;
        check_response(response).await?;
        Ok(())
    }

    /// The stock toggle: a one-field patch.
    pub async fn set_stock(&self, id: &str, in_stock: bool) -> Result<()> {
        let update = ProductUpdate {
            in_stock: Some(in_stock),
            ..Default::default()
        };
        self.update(id, &update).await
    }
}

async fn check_response(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        let detail = detail.chars().take(300).collect::<String>();
        return Err(KiranaError::Store(format!("{}: {}", status, detail)));
    }
    Ok(response.json().await?)
}

fn string_value(s: &str) -> Value {
    json!({ "stringValue": s })
}

fn optional_string_value(s: &Option<String>) -> Value {
    match s {
        Some(v) => string_value(v),
        None => json!({ "nullValue": null }),
    }
}

fn draft_fields(draft: &ProductDraft) -> Value {
    json!({
        "name": string_value(&draft.name),
        "price": { "doubleValue": draft.price },
        "category": string_value(draft.category.as_str()),
        "badge": optional_string_value(&draft.badge),
        "image": optional_string_value(&draft.image),
        "inStock": { "booleanValue": draft.in_stock },
    })
}

/// Builds the patch body plus the matching update-mask field paths.
fn update_fields(update: &ProductUpdate) -> (Value, Vec<&'static str>) {
    let mut fields = serde_json::Map::new();
    let mut mask = Vec::new();
    if let Some(name) = &update.name {
        fields.insert("name".to_string(), string_value(name.trim()));
        mask.push("name");
    }
    if let Some(price) = update.price {
        fields.insert("price".to_string(), json!({ "doubleValue": price }));
        mask.push("price");
    }
    if let Some(category) = update.category {
        fields.insert("category".to_string(), string_value(category.as_str()));
        mask.push("category");
    }
    if let Some(badge) = &update.badge {
        fields.insert("badge".to_string(), optional_string_value(badge));
        mask.push("badge");
    }
    if let Some(image) = &update.image {
        fields.insert("image".to_string(), string_value(image));
        mask.push("image");
    }
    if let Some(in_stock) = update.in_stock {
        fields.insert("inStock".to_string(), json!({ "booleanValue": in_stock }));
        mask.push("inStock");
    }
    (Value::Object(fields), mask)
}

/// Maps a Firestore document back to a [`Product`].
///
/// Firestore returns integers as `integerValue` strings, so price accepts
/// both envelopes. A missing or non-false `inStock` reads as in stock,
/// matching how the storefront always treated legacy documents.
fn parse_document(doc: &Value) -> Result<Product> {
    let id = doc
        .get("name")
        .and_then(Value::as_str)
        .and_then(|path| path.rsplit('/').next())
        .ok_or_else(|| KiranaError::Store("document has no name".to_string()))?
        .to_string();
    let fields = doc
        .get("fields")
        .ok_or_else(|| KiranaError::Store(format!("document {} has no fields", id)))?;

    let name = read_string(fields, "name")
        .ok_or_else(|| KiranaError::Store(format!("document {} has no product name", id)))?;
    let price = read_number(fields, "price").unwrap_or(0.0);
    let category = read_string(fields, "category")
        .and_then(|s| Category::from_str(&s).ok())
        .unwrap_or(Category::Other);
    let badge = read_string(fields, "badge").filter(|b| !b.is_empty());
    let image = read_string(fields, "image").filter(|u| !u.is_empty());
    let in_stock = fields
        .get("inStock")
        .and_then(|v| v.get("booleanValue"))
        .and_then(Value::as_bool)
        .unwrap_or(true);

    Ok(Product {
        id,
        name,
        price,
        category,
        badge,
        image,
        in_stock,
    })
}

fn read_string(fields: &Value, key: &str) -> Option<String> {
    fields
        .get(key)?
        .get("stringValue")?
        .as_str()
        .map(str::to_string)
}

fn read_number(fields: &Value, key: &str) -> Option<f64> {
    let value = fields.get(key)?;
    if let Some(double) = value.get("doubleValue").and_then(Value::as_f64) {
        return Some(double);
    }
    value
        .get("integerValue")?
        .as_str()
        .and_then(|s| s.parse().ok())
}
