//! Builds the declaration model from a normalized snapshot.

use crate::backend::Backend;
use crate::catalog::TypeDef;
use crate::context::{MetadataContext, RelationEntry};
use crate::diagnostics::Diagnostics;
use crate::model::{
    DeclKind, DeclOrigin, DeclPath, EnumDecl, EnumVariant, Field, GeneratedModule,
    RelationDecls, SchemaDecls, StructDecl,
};
use crate::naming::NameRegistry;
use crate::options::GeneratorOptions;
use crate::resolve::TypeResolver;
use std::collections::HashMap;
use tracing::debug;

/// Schema whose declarations are named but whose fields are not resolved yet.
struct PendingSchema<'a> {
    decls: SchemaDecls,
    composites: Vec<&'a TypeDef>,
    relations: Vec<RelationEntry<'a>>,
}

/// Backend-agnostic builder of a [`GeneratedModule`].
pub struct ModuleBuilder<'r, 'a> {
    ctx: &'r MetadataContext<'a>,
    backend: &'r dyn Backend,
    options: &'r GeneratorOptions,
}

impl<'r, 'a> ModuleBuilder<'r, 'a> {
    /// Create a builder.
    pub fn new(
        ctx: &'r MetadataContext<'a>,
        backend: &'r dyn Backend,
        options: &'r GeneratorOptions,
    ) -> Self {
        Self {
            ctx,
            backend,
            options,
        }
    }

    /// Build the module.
    ///
    /// Every declaration is named before any field is resolved, so references
    /// to types declared later (or to the declaring type itself) are known.
    pub fn build(&self, diagnostics: &mut Diagnostics) -> GeneratedModule {
        let mut schema_names = NameRegistry::new();
        let mut global = NameRegistry::new();
        let mut references = HashMap::new();
        let mut pending = Vec::new();

        for schema in self
            .ctx
            .schema_names()
            .filter(|s| self.options.schema_filter(s))
        {
            let schema_name =
                schema_names.claim(&self.backend.schema_name(schema), |n| self.escape(n));
            let mut local = NameRegistry::new();
            let types = if self.backend.flat_namespace() {
                &mut global
            } else {
                &mut local
            };

            let mut enums = Vec::new();
            for def in self.ctx.enums(schema) {
                let candidate = self.backend.enum_type_name(schema, &def.name);
                let name = self.claim_type(types, &candidate);
                let path = DeclPath {
                    schema_raw: schema,
                    schema_name: &schema_name,
                    raw_name: &def.name,
                    name: &name,
                };
                references.insert(def.id, self.backend.type_reference(DeclKind::Enum, &path));
                let variants = self.variants(types, &name, &def.enums);
                enums.push(EnumDecl {
                    id: def.id,
                    raw_name: def.name.clone(),
                    name,
                    variants,
                });
            }

            let mut composites = Vec::new();
            for def in self.ctx.composites(schema) {
                let candidate = self.backend.composite_type_name(schema, &def.name);
                let name = self.claim_type(types, &candidate);
                let path = DeclPath {
                    schema_raw: schema,
                    schema_name: &schema_name,
                    raw_name: &def.name,
                    name: &name,
                };
                references.insert(
                    def.id,
                    self.backend.type_reference(DeclKind::Composite, &path),
                );
                composites.push(StructDecl {
                    raw_name: def.name.clone(),
                    name,
                    origin: DeclOrigin::Composite,
                    fields: Vec::new(),
                });
            }

            let mut relations = Vec::new();
            for entry in self.ctx.relations(schema) {
                let decls = entry
                    .kind
                    .operations()
                    .iter()
                    .map(|&operation| {
                        let candidate = self.backend.relation_type_name(
                            schema,
                            &entry.relation.name,
                            operation,
                        );
                        StructDecl {
                            raw_name: entry.relation.name.clone(),
                            name: self.claim_type(types, &candidate),
                            origin: DeclOrigin::Relation {
                                kind: entry.kind,
                                operation,
                            },
                            fields: Vec::new(),
                        }
                    })
                    .collect();
                relations.push(RelationDecls {
                    id: entry.relation.id,
                    raw_name: entry.relation.name.clone(),
                    kind: entry.kind,
                    decls,
                });
            }

            debug!(
                schema,
                enums = enums.len(),
                composites = composites.len(),
                relations = relations.len(),
                "planned schema declarations"
            );

            pending.push(PendingSchema {
                decls: SchemaDecls {
                    raw_name: schema.to_string(),
                    name: schema_name,
                    enums,
                    composites,
                    relations,
                },
                composites: self.ctx.composites(schema).to_vec(),
                relations: self.ctx.relations(schema).to_vec(),
            });
        }

        let resolver = TypeResolver::new(self.ctx, self.backend, &references);
        let schemas = pending
            .into_iter()
            .map(|schema| self.resolve_fields(schema, &resolver, diagnostics))
            .collect();

        GeneratedModule { schemas }
    }

    fn resolve_fields(
        &self,
        pending: PendingSchema<'a>,
        resolver: &TypeResolver<'_, 'a>,
        diagnostics: &mut Diagnostics,
    ) -> SchemaDecls {
        let PendingSchema {
            mut decls,
            composites,
            relations,
        } = pending;

        for (decl, def) in decls.composites.iter_mut().zip(composites) {
            let mut names = NameRegistry::new();
            let mut fields = Vec::with_capacity(def.attributes.len());
            for attribute in &def.attributes {
                let ty = resolver.resolve_attribute(
                    def,
                    &attribute.name,
                    attribute.type_id,
                    true,
                    diagnostics,
                );
                fields.push(Field {
                    name: self.claim_field(&mut names, &attribute.name),
                    raw_name: attribute.name.clone(),
                    ty,
                    optional: false,
                });
            }
            decl.fields = fields;
        }

        for (relation, entry) in decls.relations.iter_mut().zip(relations) {
            let mut names = NameRegistry::new();
            let mut columns = Vec::new();
            for &column in self.ctx.columns(entry.relation.id) {
                let name = self.claim_field(&mut names, &column.name);
                let ty = resolver.resolve(
                    &column.format,
                    column.is_nullable,
                    Some(&entry.relation.schema),
                    diagnostics,
                );
                columns.push((name, column, ty));
            }

            let operations = entry.kind.operations();
            for (decl, operation) in relation.decls.iter_mut().zip(operations) {
                decl.fields = columns
                    .iter()
                    .map(|(name, column, ty)| Field {
                        name: name.clone(),
                        raw_name: column.name.clone(),
                        ty: ty.clone(),
                        optional: operation.is_optional(column),
                    })
                    .collect();
            }
        }

        decls
    }

    fn variants(
        &self,
        types: &mut NameRegistry,
        enum_name: &str,
        labels: &[String],
    ) -> Vec<EnumVariant> {
        let mut scoped = NameRegistry::new();
        let registry = if self.backend.scoped_variants() {
            &mut scoped
        } else {
            types
        };
        labels
            .iter()
            .map(|label| {
                let candidate = self.backend.variant_name(enum_name, label);
                EnumVariant {
                    name: registry.claim(&candidate, |n| self.escape(n)),
                    value: label.clone(),
                }
            })
            .collect()
    }

    fn claim_type(&self, registry: &mut NameRegistry, candidate: &str) -> String {
        if self.backend.dedupe_type_names() {
            registry.claim(candidate, |n| self.escape(n))
        } else {
            self.escape(candidate)
        }
    }

    fn claim_field(&self, registry: &mut NameRegistry, raw: &str) -> String {
        let candidate = self.backend.naming().convert_field(raw);
        registry.claim(&candidate, |n| self.escape(n))
    }

    fn escape(&self, name: &str) -> String {
        self.backend.naming().escape(name)
    }
}
