//! Open Library search payloads.

use crate::models::BookRecord;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Top-level `search.json` response. Only `docs` is used.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub docs: Vec<SearchDoc>,
}

/// One result document. Every field may be absent; a field of the wrong
/// shape is treated as absent instead of failing the whole response.
#[derive(Debug, Default, Deserialize)]
pub struct SearchDoc {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub author_name: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub first_publish_year: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub edition_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub key: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl From<SearchDoc> for BookRecord {
    fn from(doc: SearchDoc) -> Self {
        BookRecord::new(
            doc.title,
            doc.author_name,
            doc.first_publish_year,
            doc.edition_count,
            doc.key,
        )
    }
}
