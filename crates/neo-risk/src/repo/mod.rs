mod objects;
mod scenarios;

pub use objects::ObjectRepository;
pub use scenarios::ScenarioRepository;

/// Every table stores the full record as a JSON document next to the few
/// columns that queries filter on.
#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    document: String,
}

impl DocumentRow {
    fn decode<T: serde::de::DeserializeOwned>(&self) -> crate::error::Result<T> {
        Ok(serde_json::from_str(&self.document)?)
    }
}
