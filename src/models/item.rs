use indexmap::IndexMap;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Core inventory entity. Beyond the fixed `name`/`price` fields a document
/// may carry any number of user-defined string attributes; `extra` keeps them
/// in submission order so listings render them the way they were entered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identifier. `None` before insertion and in the public
    /// API listing, where it is projected out.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    /// Whole currency units (e.g. 10 = $10). No fractional prices.
    pub price: i64,
    #[serde(flatten)]
    pub extra: IndexMap<String, String>,
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Body of `POST /add`, form-urlencoded. Dynamic attributes arrive as two
/// parallel repeated lists that are zipped together; `price` stays a string
/// here so a non-numeric value surfaces as a 400 rather than a deserialization
/// rejection.
#[derive(Debug, Default, Deserialize)]
pub struct AddItemForm {
    pub name: String,
    pub price: String,
    #[serde(rename = "field_key[]", default)]
    pub field_keys: Vec<String>,
    #[serde(rename = "field_value[]", default)]
    pub field_values: Vec<String>,
}

impl AddItemForm {
    /// Combines the fixed fields and the zipped dynamic pairs into an `Item`.
    ///
    /// Keys are trimmed; empty-after-trim keys are dropped. Duplicate keys are
    /// last-write-wins. A dynamic key colliding with a reserved field is
    /// resolved explicitly: `name` overwrites the fixed name, `price`
    /// overwrites the fixed price when it parses as an integer (dropped
    /// otherwise), `_id` is never user-assignable and is dropped.
    pub fn into_item(self) -> Result<Item, AppError> {
        let mut name = self.name;
        let mut price = self.price.trim().parse::<i64>().map_err(|_| {
            AppError::BadRequest(format!("price must be an integer, got {:?}", self.price))
        })?;

        let mut extra = IndexMap::new();
        for (key, value) in self.field_keys.into_iter().zip(self.field_values) {
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            match key {
                "name" => name = value,
                "price" => {
                    if let Ok(p) = value.trim().parse() {
                        price = p;
                    }
                }
                "_id" => {}
                _ => {
                    extra.insert(key.to_string(), value);
                }
            }
        }

        Ok(Item {
            id: None,
            name,
            price,
            extra,
        })
    }
}
