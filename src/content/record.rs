//! Content records: the durable structured data of a model for one locale.

use toml::Table;
use toml::Value;

/// Field name under which a model's persisted identifier lives.
pub const UUID_FIELD: &str = "uuid";

/// One locale's worth of structured content for a model.
///
/// A thin wrapper over an ordered TOML table. Updates are merges: setting
/// one field never drops unrelated fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentRecord {
    fields: Table,
}

impl ContentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a record from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        let fields = text.parse::<Table>()?;
        Ok(Self { fields })
    }

    /// Serialize the record to TOML text.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(&self.fields)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Set a single field, keeping all others intact.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// The persisted identifier, if present and non-empty.
    pub fn uuid(&self) -> Option<&str> {
        self.fields
            .get(UUID_FIELD)
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Set the persisted identifier. Callers guard against overwriting;
    /// this is a plain merge of one field.
    pub fn set_uuid(&mut self, id: &str) {
        self.set(UUID_FIELD, id);
    }
}
