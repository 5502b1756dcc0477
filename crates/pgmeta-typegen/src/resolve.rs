//! Mapping catalog type identifiers to backend types.

use crate::backend::Backend;
use crate::catalog::{TypeDef, TypeKind};
use crate::context::MetadataContext;
use crate::diagnostics::{Diagnostics, Warning};
use crate::scalar::ScalarType;
use std::collections::HashMap;

/// A backend-independent description of a field's type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetType {
    /// A named backend type (`string`, `Int64`, `PublicColor`, ...).
    Simple(String),
    /// A list of the inner type.
    List(Box<TargetType>),
    /// A nullable inner type.
    Optional(Box<TargetType>),
}

impl TargetType {
    /// Create a simple type.
    pub fn simple(name: impl Into<String>) -> Self {
        TargetType::Simple(name.into())
    }

    /// Wrap in a list.
    pub fn list(inner: TargetType) -> Self {
        TargetType::List(Box::new(inner))
    }

    /// Wrap in `Optional`, unless already optional.
    pub fn optional(self) -> Self {
        match self {
            TargetType::Optional(_) => self,
            other => TargetType::Optional(Box::new(other)),
        }
    }

    /// Check if this type is nullable.
    pub fn is_optional(&self) -> bool {
        matches!(self, TargetType::Optional(_))
    }
}

/// Split one array marker off a type identifier.
///
/// `text[]` and `_text` both denote an array of `text`.
pub fn strip_array_marker(format: &str) -> Option<&str> {
    format
        .strip_suffix("[]")
        .or_else(|| format.strip_prefix('_'))
        .filter(|element| !element.is_empty())
}

/// Resolves type identifiers against one metadata snapshot and one backend.
///
/// Enums and composites always resolve to a named reference, so cyclic
/// composite attributes never recurse.
pub struct TypeResolver<'r, 'a> {
    ctx: &'r MetadataContext<'a>,
    backend: &'r dyn Backend,
    references: &'r HashMap<u32, String>,
}

impl<'r, 'a> TypeResolver<'r, 'a> {
    /// Create a resolver.
    ///
    /// `references` maps the id of every emitted enum and composite to the
    /// backend expression referencing it.
    pub fn new(
        ctx: &'r MetadataContext<'a>,
        backend: &'r dyn Backend,
        references: &'r HashMap<u32, String>,
    ) -> Self {
        Self {
            ctx,
            backend,
            references,
        }
    }

    /// Resolve a catalog type identifier.
    ///
    /// `schema_hint` is the schema of the referencing column; it disambiguates
    /// type names defined in several schemas.
    pub fn resolve(
        &self,
        format: &str,
        nullable: bool,
        schema_hint: Option<&str>,
        diagnostics: &mut Diagnostics,
    ) -> TargetType {
        let resolved = self.resolve_format(format, schema_hint, diagnostics);
        wrap(resolved, nullable)
    }

    /// Resolve a composite attribute's type id.
    ///
    /// A missing id falls back to the backend's any type.
    pub fn resolve_attribute(
        &self,
        composite: &TypeDef,
        attribute: &str,
        type_id: u32,
        nullable: bool,
        diagnostics: &mut Diagnostics,
    ) -> TargetType {
        let resolved = match self.ctx.type_by_id(type_id) {
            Some(def) => match def.kind() {
                TypeKind::Scalar => self.resolve_format(&def.name, Some(&def.schema), diagnostics),
                TypeKind::Enum(_) | TypeKind::Composite(_) => self.reference(def, diagnostics),
            },
            None => {
                diagnostics.push(Warning::UnresolvedTypeReference {
                    type_id,
                    composite: format!("{}.{}", composite.schema, composite.name),
                    attribute: attribute.to_string(),
                });
                self.any()
            }
        };
        wrap(resolved, nullable)
    }

    fn resolve_format(
        &self,
        format: &str,
        schema_hint: Option<&str>,
        diagnostics: &mut Diagnostics,
    ) -> TargetType {
        if let Some(element) = strip_array_marker(format) {
            return TargetType::list(self.resolve_format(element, schema_hint, diagnostics));
        }
        if let Some(scalar) = ScalarType::from_format(format) {
            return TargetType::simple(self.backend.base_type(scalar));
        }
        match self.ctx.type_by_name(format, schema_hint) {
            Some(def) if !matches!(def.kind(), TypeKind::Scalar) => {
                self.reference(def, diagnostics)
            }
            _ => {
                diagnostics.push(Warning::UnknownBaseType {
                    format: format.to_string(),
                });
                self.any()
            }
        }
    }

    fn reference(&self, def: &TypeDef, diagnostics: &mut Diagnostics) -> TargetType {
        match self.references.get(&def.id) {
            Some(reference) => TargetType::simple(reference.clone()),
            None => {
                diagnostics.push(Warning::ExcludedTypeReference {
                    schema: def.schema.clone(),
                    name: def.name.clone(),
                });
                self.any()
            }
        }
    }

    fn any(&self) -> TargetType {
        TargetType::simple(self.backend.any_type())
    }
}

fn wrap(ty: TargetType, nullable: bool) -> TargetType {
    if nullable {
        ty.optional()
    } else {
        ty
    }
}
