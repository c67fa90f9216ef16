//! Product data models and API request/response types.
//!
//! This module defines:
//! - `Product` / `ProductListing`: Database rows for products
//! - `Condition`: The two accepted product conditions
//! - Request bodies for create, update, stock change and purchase
//! - `ProductFilter`: Parsed query string of the public search endpoint
//! - Response bodies for search results and the product detail page

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::bank_account::BankAccountResponse;
use crate::models::validation;

/// Represents a product record from the database.
///
/// # Database Table
///
/// Maps to the `products` table. Each product:
/// - Belongs to the user who created it (via `user_id`)
/// - Has a price and stock that are never negative (CHECK constraints)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,

    /// Seller who created the product; the only user allowed to mutate it
    pub user_id: Uuid,

    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub stock: i64,

    /// "new" or "second"
    pub condition: String,

    pub is_purchasable: bool,
    pub created_at: DateTime<Utc>,
}

/// A product row joined with its tags and purchase statistics.
///
/// Produced by the search and detail queries.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductListing {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub stock: i64,
    pub condition: String,
    pub is_purchasable: bool,
    pub created_at: DateTime<Utc>,

    /// All tags attached to the product
    pub tags: Vec<String>,

    /// Number of payments recorded for the product
    pub purchase_count: i64,

    /// Sum of quantities across those payments
    pub sold_total: i64,
}

/// Physical condition of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    Second,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::Second => "second",
        }
    }
}

impl FromStr for Condition {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Condition::New),
            "second" => Ok(Condition::Second),
            _ => Err(()),
        }
    }
}

/// Request body for `POST /v1/product`.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Mechanical keyboard",
///   "price": 450000,
///   "imageUrl": "https://cdn.example.com/keyboard.jpg",
///   "stock": 12,
///   "condition": "new",
///   "tags": ["keyboard", "peripheral"],
///   "isPurchasable": true
/// }
/// ```
///
/// Older clients send `isPurchaseable`; both spellings are accepted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub stock: i64,
    pub condition: Condition,
    pub tags: Vec<String>,
    #[serde(alias = "isPurchaseable")]
    pub is_purchasable: bool,
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_listing(&self.name, self.price, &self.image_url, &self.tags)?;
        validation::non_negative("stock", self.stock)
    }
}

/// Request body for `PATCH /v1/product/{product_id}`.
///
/// Same as create without `stock`, which has its own endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub condition: Condition,
    pub tags: Vec<String>,
    #[serde(alias = "isPurchaseable")]
    pub is_purchasable: bool,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_listing(&self.name, self.price, &self.image_url, &self.tags)
    }
}

fn validate_listing(
    name: &str,
    price: i64,
    image_url: &str,
    tags: &[String],
) -> Result<(), AppError> {
    validation::length("name", name, 5, 60)?;
    validation::non_negative("price", price)?;
    validation::url("imageUrl", image_url)?;
    if tags.iter().any(|tag| tag.trim().is_empty()) {
        return Err(AppError::InvalidRequest(
            "tags must not contain empty values".to_string(),
        ));
    }
    Ok(())
}

/// Request body for `POST /v1/product/{product_id}/stock`.
#[derive(Debug, Deserialize)]
pub struct ChangeStockRequest {
    pub stock: i64,
}

impl ChangeStockRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::non_negative("stock", self.stock)
    }
}

/// Request body for `POST /v1/product/{product_id}/buy`.
///
/// ```json
/// {
///   "bankAccountId": "550e8400-e29b-41d4-a716-446655440000",
///   "paymentProofImageUrl": "https://cdn.example.com/proof.jpg",
///   "quantity": 2
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyRequest {
    pub bank_account_id: String,
    pub payment_proof_image_url: String,
    pub quantity: i32,
}

impl BuyRequest {
    /// Validate the body and return the parsed bank account id.
    pub fn validate(&self) -> Result<Uuid, AppError> {
        let bank_account_id = Uuid::parse_str(&self.bank_account_id).map_err(|_| {
            AppError::InvalidRequest("bankAccountId must be a valid id".to_string())
        })?;
        validation::url("paymentProofImageUrl", &self.payment_proof_image_url)?;
        if self.quantity < 1 {
            return Err(AppError::InvalidRequest(
                "quantity must be at least 1".to_string(),
            ));
        }
        Ok(bank_account_id)
    }
}

/// Column a product search can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    Price,
    Date,
}

impl ProductSort {
    pub fn column(&self) -> &'static str {
        match self {
            ProductSort::Price => "p.price",
            ProductSort::Date => "p.created_at",
        }
    }
}

/// Sort direction shared by the paginated listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw?.to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Parsed query string of `GET /v1/product`.
///
/// Parsing is lenient: a value that cannot be understood falls back to its
/// default instead of failing the request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    pub user_only: bool,

    /// Set by the handler from the bearer token when `user_only` is true
    pub owner_id: Option<Uuid>,

    pub limit: i64,
    pub offset: i64,
    pub tags: Vec<String>,
    pub condition: Option<Condition>,
    pub show_empty_stock: bool,
    pub max_price: Option<i64>,
    pub min_price: Option<i64>,
    pub sort: Option<(ProductSort, SortOrder)>,
    pub search: Option<String>,
}

pub const DEFAULT_PRODUCT_LIMIT: i64 = 10;

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            user_only: false,
            owner_id: None,
            limit: DEFAULT_PRODUCT_LIMIT,
            offset: 0,
            tags: Vec::new(),
            condition: None,
            show_empty_stock: false,
            max_price: None,
            min_price: None,
            sort: None,
            search: None,
        }
    }
}

impl ProductFilter {
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let get = |key: &str| params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let sort = match get("sortBy").map(str::to_ascii_lowercase).as_deref() {
            Some("price") => Some(ProductSort::Price),
            Some("date") => Some(ProductSort::Date),
            _ => None,
        }
        .map(|column| {
            let order = SortOrder::parse(get("orderBy")).unwrap_or(SortOrder::Desc);
            (column, order)
        });

        Self {
            user_only: get("userOnly").and_then(parse_bool).unwrap_or(false),
            owner_id: None,
            limit: get("limit")
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_PRODUCT_LIMIT),
            offset: get("offset")
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|v| *v >= 0)
                .unwrap_or(0),
            tags: get("tags")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            condition: get("condition").and_then(|v| v.parse().ok()),
            show_empty_stock: get("showEmptyStock").and_then(parse_bool).unwrap_or(false),
            max_price: get("maxPrice")
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|v| *v > 0),
            min_price: get("minPrice")
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|v| *v > 0),
            sort,
            search: get("search").map(str::to_string),
        }
    }
}

/// Accepts the usual spellings of a boolean query flag.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}

/// A product as returned to API clients.
///
/// ```json
/// {
///   "productId": "770e8400-e29b-41d4-a716-446655440002",
///   "name": "Mechanical keyboard",
///   "price": 450000,
///   "imageUrl": "https://cdn.example.com/keyboard.jpg",
///   "stock": 12,
///   "condition": "new",
///   "tags": ["keyboard"],
///   "isPurchasable": true,
///   "purchaseCount": 3
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub product_id: Uuid,
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub stock: i64,
    pub condition: String,
    pub tags: Vec<String>,
    pub is_purchasable: bool,
    pub purchase_count: i64,
}

impl From<ProductListing> for ProductResponse {
    fn from(listing: ProductListing) -> Self {
        Self {
            product_id: listing.id,
            name: listing.name,
            price: listing.price,
            image_url: listing.image_url,
            stock: listing.stock,
            condition: listing.condition,
            tags: listing.tags,
            is_purchasable: listing.is_purchasable,
            purchase_count: listing.purchase_count,
        }
    }
}

/// Seller summary shown on the product detail page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerResponse {
    pub name: String,
    pub product_sold_total: i64,
    pub bank_accounts: Vec<BankAccountResponse>,
}

/// Body of `GET /v1/product/{product_id}`.
#[derive(Debug, Serialize)]
pub struct ProductDetailResponse {
    pub product: ProductResponse,
    pub seller: SellerResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_query_uses_defaults() {
        assert_eq!(ProductFilter::from_query(&HashMap::new()), ProductFilter::default());
    }

    #[test]
    fn lenient_parsing_falls_back_to_defaults() {
        let filter = ProductFilter::from_query(&query(&[
            ("limit", "abc"),
            ("offset", "-4"),
            ("userOnly", "maybe"),
            ("condition", "broken"),
            ("maxPrice", "0"),
            ("sortBy", "name; DROP TABLE products"),
        ]));

        assert_eq!(filter.limit, DEFAULT_PRODUCT_LIMIT);
        assert_eq!(filter.offset, 0);
        assert!(!filter.user_only);
        assert_eq!(filter.condition, None);
        assert_eq!(filter.max_price, None);
        assert_eq!(filter.sort, None);
    }

    #[test]
    fn full_query_is_parsed() {
        let filter = ProductFilter::from_query(&query(&[
            ("userOnly", "true"),
            ("limit", "5"),
            ("offset", "10"),
            ("tags", "keyboard, ,mouse"),
            ("condition", "second"),
            ("showEmptyStock", "1"),
            ("maxPrice", "1000"),
            ("minPrice", "10"),
            ("sortBy", "price"),
            ("orderBy", "ASC"),
            ("search", "board"),
        ]));

        assert!(filter.user_only);
        assert_eq!(filter.limit, 5);
        assert_eq!(filter.offset, 10);
        assert_eq!(filter.tags, vec!["keyboard", "mouse"]);
        assert_eq!(filter.condition, Some(Condition::Second));
        assert!(filter.show_empty_stock);
        assert_eq!(filter.max_price, Some(1000));
        assert_eq!(filter.min_price, Some(10));
        assert_eq!(filter.sort, Some((ProductSort::Price, SortOrder::Asc)));
        assert_eq!(filter.search.as_deref(), Some("board"));
    }

    #[test]
    fn sort_without_order_is_descending() {
        let filter = ProductFilter::from_query(&query(&[("sortBy", "date")]));
        assert_eq!(filter.sort, Some((ProductSort::Date, SortOrder::Desc)));
    }

    #[test]
    fn create_accepts_legacy_purchasable_spelling() {
        let request: CreateProductRequest = serde_json::from_str(
            r#"{
                "name": "Mechanical keyboard",
                "price": 450000,
                "imageUrl": "https://cdn.example.com/keyboard.jpg",
                "stock": 12,
                "condition": "new",
                "tags": ["keyboard"],
                "isPurchaseable": true
            }"#,
        )
        .unwrap();

        assert!(request.is_purchasable);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn unknown_condition_fails_to_deserialize() {
        let result = serde_json::from_str::<UpdateProductRequest>(
            r#"{
                "name": "Mechanical keyboard",
                "price": 1,
                "imageUrl": "https://cdn.example.com/keyboard.jpg",
                "condition": "used",
                "tags": [],
                "isPurchasable": true
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn listing_rules_are_enforced() {
        let mut request = UpdateProductRequest {
            name: "Mechanical keyboard".into(),
            price: 10,
            image_url: "https://cdn.example.com/keyboard.jpg".into(),
            condition: Condition::New,
            tags: vec!["keyboard".into()],
            is_purchasable: true,
        };
        assert!(request.validate().is_ok());

        request.price = -1;
        assert!(request.validate().is_err());

        request.price = 10;
        request.tags.push("  ".into());
        assert!(request.validate().is_err());

        request.tags.pop();
        request.name = "Key".into();
        assert!(request.validate().is_err());
    }

    #[test]
    fn buy_request_returns_bank_account_id() {
        let bank_account_id = Uuid::new_v4();
        let request = BuyRequest {
            bank_account_id: bank_account_id.to_string(),
            payment_proof_image_url: "https://cdn.example.com/proof.jpg".into(),
            quantity: 2,
        };
        assert_eq!(request.validate().unwrap(), bank_account_id);

        let request = BuyRequest {
            quantity: 0,
            ..request
        };
        assert!(request.validate().is_err());
    }
}
