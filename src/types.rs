use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// One catalog title and its available copy count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,
    pub category: Option<String>,
    pub quantity: i64,
    pub rating: Option<f64>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
}

/// A borrow-ledger entry linking a borrower's email to a book until returned.
///
/// Clients may attach arbitrary extra fields when borrowing; those are kept
/// verbatim and flattened back into the serialized record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowRecord {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_email: String,
    pub borrowed_at: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Accepts a quantity as a JSON integer or a numeric string ("5").
///
/// Legacy clients of this API sent quantities as strings; normalizing at
/// write time keeps the stored value numeric at all times.
fn deserialize_quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Int(v) => Ok(v),
        Raw::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("quantity is not numeric: {:?}", s))),
    }
}

fn deserialize_opt_quantity<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }
    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(v)) => Ok(Some(v)),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("quantity is not numeric: {:?}", s))),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookRequest {
    pub name: String,
    pub image: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_quantity")]
    pub quantity: Option<i64>,
    pub rating: Option<f64>,
    pub author: Option<String>,
    pub description: Option<String>,
}

/// Partial update; absent fields are left untouched. Only this fixed field
/// set is writable, anything else in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_quantity")]
    pub quantity: Option<i64>,
    pub rating: Option<f64>,
    pub author: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertResponse {
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub matched: u64,
    pub modified: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookListQuery {
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BorrowListQuery {
    pub email: Option<String>,
}

/// Body of `POST /borrow/{id}`: borrower email plus whatever else the
/// client wants recorded on the ledger entry.
#[derive(Debug, Clone, Deserialize)]
pub struct BorrowRequest {
    #[serde(alias = "userEmail")]
    pub email: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Body of `DELETE /bookBorrowed/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReturnRequest {
    #[serde(rename = "bookId")]
    pub book_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub success: bool,
    pub token: String,
}

/// Claims carried in the `token` cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}
