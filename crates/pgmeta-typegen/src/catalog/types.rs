//! Database type definitions.

use serde::{Deserialize, Serialize};

/// A named, typed attribute of a composite type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAttribute {
    /// Attribute name.
    pub name: String,
    /// Id of the attribute's type. Resolved lazily, never inlined.
    pub type_id: u32,
}

/// A type known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    /// Catalog object id.
    pub id: u32,
    /// Type name.
    pub name: String,
    /// Owning schema name.
    pub schema: String,
    /// Catalog format identifier.
    #[serde(default)]
    pub format: String,
    /// Enum labels in catalog order.
    #[serde(default)]
    pub enums: Vec<String>,
    /// Composite attributes in catalog order.
    #[serde(default)]
    pub attributes: Vec<TypeAttribute>,
}

/// The kind of a type, decided once from its definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind<'a> {
    /// Plain scalar type.
    Scalar,
    /// Enumeration with its labels.
    Enum(&'a [String]),
    /// Composite type with its attributes.
    Composite(&'a [TypeAttribute]),
}

impl TypeDef {
    /// Create a scalar type.
    pub fn scalar(id: u32, schema: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            format: name.clone(),
            name,
            schema: schema.into(),
            enums: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Create an enum type.
    pub fn enumeration(
        id: u32,
        schema: impl Into<String>,
        name: impl Into<String>,
        labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut def = Self::scalar(id, schema, name);
        def.enums = labels.into_iter().map(Into::into).collect();
        def
    }

    /// Create a composite type.
    pub fn composite(
        id: u32,
        schema: impl Into<String>,
        name: impl Into<String>,
        attributes: impl IntoIterator<Item = TypeAttribute>,
    ) -> Self {
        let mut def = Self::scalar(id, schema, name);
        def.attributes = attributes.into_iter().collect();
        def
    }

    /// Classify this type.
    ///
    /// A definition carrying both labels and attributes is treated as an enum.
    pub fn kind(&self) -> TypeKind<'_> {
        if !self.enums.is_empty() {
            TypeKind::Enum(&self.enums)
        } else if !self.attributes.is_empty() {
            TypeKind::Composite(&self.attributes)
        } else {
            TypeKind::Scalar
        }
    }

    /// Check whether the definition is malformed (both enum and composite).
    pub fn is_ambiguous(&self) -> bool {
        !self.enums.is_empty() && !self.attributes.is_empty()
    }
}

impl TypeAttribute {
    /// Create a new attribute.
    pub fn new(name: impl Into<String>, type_id: u32) -> Self {
        Self {
            name: name.into(),
            type_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(TypeDef::scalar(25, "pg_catalog", "text").kind(), TypeKind::Scalar);

        let color = TypeDef::enumeration(100, "public", "color", ["red", "green"]);
        assert!(matches!(color.kind(), TypeKind::Enum(labels) if labels.len() == 2));

        let address = TypeDef::composite(
            101,
            "public",
            "address",
            [TypeAttribute::new("street", 25)],
        );
        assert!(matches!(address.kind(), TypeKind::Composite(attrs) if attrs.len() == 1));
    }

    #[test]
    fn test_ambiguous_definition_is_enum() {
        let mut def = TypeDef::enumeration(100, "public", "odd", ["a"]);
        def.attributes.push(TypeAttribute::new("x", 25));
        assert!(def.is_ambiguous());
        assert!(matches!(def.kind(), TypeKind::Enum(_)));
    }
}
