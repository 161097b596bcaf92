use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A read-only snapshot of schema metadata.
///
/// Hosts that cannot introspect a live database describe the schema with this
/// structure (usually loaded from JSON) and wrap it in
/// [`crate::schema::MetadataProvider`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchemaMetadata {
    /// Schema applied to unqualified table references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_schema: Option<String>,

    /// Known tables. A table without a schema belongs to the default schema.
    #[serde(default)]
    pub tables: Vec<SchemaTable>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchemaTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnSchema>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
}

impl SchemaMetadata {
    /// Parses a schema snapshot from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl SchemaTable {
    pub fn new(schema: Option<&str>, name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            schema: schema.map(str::to_string),
            name: name.into(),
            columns: columns
                .iter()
                .map(|name| ColumnSchema {
                    name: (*name).to_string(),
                    data_type: None,
                })
                .collect(),
        }
    }

    /// Returns true when this table lives in `schema`, where `None` stands for
    /// the default schema.
    pub fn in_schema(&self, schema: Option<&str>, default_schema: Option<&str>) -> bool {
        let own = self.schema.as_deref().or(default_schema);
        let wanted = schema.or(default_schema);
        own == wanted
    }
}
