//! Column declarations and the validated schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::value::{ColumnType, Value};

/// Declarative description of one CSV column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(default)]
    pub data_type: ColumnType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub choices: Option<Vec<Value>>,
}

impl ColumnSpec {
    /// Creates an optional string column with no default and no choices.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: ColumnType::String,
            required: false,
            default: None,
            choices: None,
        }
    }

    pub fn with_type(mut self, data_type: ColumnType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_choices(mut self, choices: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Returns true if `value` is permitted by this column's choices.
    /// Columns without choices accept any value.
    pub fn allows(&self, value: &Value) -> bool {
        match &self.choices {
            Some(choices) if !choices.is_empty() => choices.contains(value),
            _ => true,
        }
    }
}

/// An ordered, validated set of column declarations.
///
/// Built once at reader construction and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColumnSpec>", into = "Vec<ColumnSpec>")]
pub struct Schema {
    columns: Vec<ColumnSpec>,
    index: BTreeMap<String, usize>,
}

impl Schema {
    /// Validates the declarations and builds the name index.
    ///
    /// Fails on empty names, duplicate names, or a default that is not a
    /// member of a non-empty choice set.
    pub fn new(columns: Vec<ColumnSpec>) -> Result<Self, SchemaError> {
        let mut index = BTreeMap::new();
        for (position, spec) in columns.iter().enumerate() {
            if spec.name.is_empty() {
                return Err(SchemaError::EmptyColumnName { position });
            }
            if index.insert(spec.name.clone(), position).is_some() {
                return Err(SchemaError::DuplicateColumn {
                    name: spec.name.clone(),
                });
            }
            if let Some(default) = &spec.default {
                if !spec.allows(default) {
                    return Err(SchemaError::DefaultNotInChoices {
                        column: spec.name.clone(),
                    });
                }
            }
        }
        Ok(Self { columns, index })
    }

    /// Looks a column up by name.
    pub fn get(&self, name: &str) -> Option<&ColumnSpec> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    /// Position of a column within the declaration order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl TryFrom<Vec<ColumnSpec>> for Schema {
    type Error = SchemaError;

    fn try_from(columns: Vec<ColumnSpec>) -> Result<Self, Self::Error> {
        Schema::new(columns)
    }
}

impl From<Schema> for Vec<ColumnSpec> {
    fn from(schema: Schema) -> Self {
        schema.columns
    }
}
