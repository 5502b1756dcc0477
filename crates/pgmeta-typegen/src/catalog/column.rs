//! Column definitions and the per-operation nullability policy.

use serde::{Deserialize, Serialize};

/// A column of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Id of the owning relation.
    pub table_id: u32,
    /// Column name.
    pub name: String,
    /// Catalog type identifier (`int8`, `_text`, `text[]`, `color`, ...).
    pub format: String,
    /// Whether the column accepts nulls.
    #[serde(default)]
    pub is_nullable: bool,
    /// Whether the column is an identity column.
    #[serde(default)]
    pub is_identity: bool,
    /// Whether the column is a generated column.
    #[serde(default)]
    pub is_generated: bool,
    /// Default expression, if any.
    #[serde(default)]
    pub default_value: Option<String>,
    /// 1-based position within the relation.
    #[serde(default)]
    pub ordinal_position: u32,
}

/// Operation a relation declaration is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Rows as read back from the relation.
    Select,
    /// Payload accepted when inserting a row.
    Insert,
    /// Payload accepted when updating a row.
    Update,
}

impl ColumnDef {
    /// Create a new non-nullable column without default.
    pub fn new(table_id: u32, name: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            table_id,
            name: name.into(),
            format: format.into(),
            is_nullable: false,
            is_identity: false,
            is_generated: false,
            default_value: None,
            ordinal_position: 0,
        }
    }

    /// Mark the column as nullable.
    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    /// Mark the column as an identity column.
    pub fn identity(mut self) -> Self {
        self.is_identity = true;
        self
    }

    /// Mark the column as generated.
    pub fn generated(mut self) -> Self {
        self.is_generated = true;
        self
    }

    /// Set the default expression.
    pub fn with_default(mut self, expression: impl Into<String>) -> Self {
        self.default_value = Some(expression.into());
        self
    }

    /// Set the ordinal position.
    pub fn at_position(mut self, position: u32) -> Self {
        self.ordinal_position = position;
        self
    }

    /// Check if the column has a default expression.
    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }
}

impl Operation {
    /// All operations in emission order.
    pub const ALL: [Operation; 3] = [Operation::Select, Operation::Insert, Operation::Update];

    /// Whether a field for `column` is optional in this operation's declaration.
    pub fn is_optional(&self, column: &ColumnDef) -> bool {
        match self {
            Operation::Select => column.is_nullable,
            Operation::Insert => {
                column.is_nullable
                    || column.is_identity
                    || column.is_generated
                    || column.has_default()
            }
            Operation::Update => true,
        }
    }

    /// Suffix used when an operation is folded into a type name.
    pub fn suffix(&self) -> &'static str {
        match self {
            Operation::Select => "Select",
            Operation::Insert => "Insert",
            Operation::Update => "Update",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Select => write!(f, "select"),
            Operation::Insert => write!(f, "insert"),
            Operation::Update => write!(f, "update"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_follows_nullability() {
        assert!(!Operation::Select.is_optional(&ColumnDef::new(1, "id", "int8").identity()));
        assert!(Operation::Select.is_optional(&ColumnDef::new(1, "name", "text").nullable()));
    }

    #[test]
    fn test_insert_optional_conditions() {
        let plain = ColumnDef::new(1, "title", "text");
        assert!(!Operation::Insert.is_optional(&plain));

        assert!(Operation::Insert.is_optional(&plain.clone().nullable()));
        assert!(Operation::Insert.is_optional(&plain.clone().identity()));
        assert!(Operation::Insert.is_optional(&plain.clone().generated()));
        assert!(Operation::Insert.is_optional(&plain.with_default("'untitled'::text")));
    }

    #[test]
    fn test_update_always_optional() {
        let column = ColumnDef::new(1, "id", "int8");
        assert!(Operation::Update.is_optional(&column));
    }

    #[test]
    fn test_column_deserialize_defaults() {
        let column: ColumnDef =
            serde_json::from_str(r#"{"table_id": 7, "name": "id", "format": "int8"}"#).unwrap();
        assert_eq!(column.table_id, 7);
        assert!(!column.is_nullable);
        assert!(!column.has_default());
    }
}
