//! Union type definition and validation.
//!
//! Two front doors, one validation path: [`UnionTypeBuilder`] for code,
//! [`DefSpec`] for definitions arriving as data (JSON fixtures, config).
//! Both funnel into [`DefSpec::define`], which runs every check the
//! contract names — duplicate tags, backing exclusivity, scalar kind
//! agreement, raw-value default-sequencing, collision detection — before
//! a [`UnionType`] exists.
//!
//! Default-sequencing is a preprocessing pass: it produces the explicit
//! tag→value table stored on the type. Lookups never compute defaults.

use crate::error::DefinitionError;
use crate::scalar::{RawValue, ScalarKind};
use crate::schema::{Backing, FieldDef, FieldType, PayloadShape, UnionType, Variant};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// A union type definition as plain data.
///
/// Deserializable, so definitions can live in fixtures or config:
///
/// ```json
/// {
///   "name": "compass",
///   "raw_kind": "text",
///   "variants": [ { "tag": "north" }, { "tag": "south", "raw": "S" } ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefSpec {
    pub name: String,
    /// Declared scalar kind for raw backing. May be omitted when every
    /// explicit raw value agrees on a kind; the first explicit value then
    /// declares it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_kind: Option<ScalarKind>,
    pub variants: Vec<VariantSpec>,
}

/// One declared variant, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSpec {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawValue>,
    #[serde(default, skip_serializing_if = "PayloadShape::is_none")]
    pub shape: PayloadShape,
}

impl DefSpec {
    /// Validate and seal the definition.
    ///
    /// Every error this can produce is a definition-time error; a returned
    /// `UnionType` carries its resolved raw table and never fails at use
    /// time.
    pub fn define(self) -> Result<Arc<UnionType>, DefinitionError> {
        let name = self.name;

        if self.variants.is_empty() {
            return Err(DefinitionError::Empty { type_name: name });
        }

        let backing = resolve_backing(&name, self.raw_kind, &self.variants)?;

        let mut variants: IndexMap<String, Variant> = IndexMap::with_capacity(self.variants.len());
        let mut raw_table: IndexMap<RawValue, String> = IndexMap::new();
        let mut prev: Option<RawValue> = None;

        for spec in self.variants {
            if variants.contains_key(&spec.tag) {
                return Err(DefinitionError::DuplicateVariant {
                    type_name: name,
                    tag: spec.tag,
                });
            }

            if let PayloadShape::Fields(fields) = &spec.shape {
                let mut seen = BTreeSet::new();
                for field in fields {
                    if !seen.insert(field.name.as_str()) {
                        return Err(DefinitionError::DuplicateField {
                            type_name: name,
                            tag: spec.tag.clone(),
                            field: field.name.clone(),
                        });
                    }
                }
            }

            let raw = match backing {
                Backing::Payload => None,
                Backing::Raw(kind) => {
                    let resolved = resolve_raw(&name, kind, &spec, prev.as_ref())?;
                    prev = Some(resolved.clone());
                    if let Some(first) = raw_table.insert(resolved.clone(), spec.tag.clone()) {
                        return Err(DefinitionError::DuplicateRawValue {
                            type_name: name,
                            value: resolved,
                            first,
                            second: spec.tag,
                        });
                    }
                    Some(resolved)
                }
            };

            variants.insert(
                spec.tag.clone(),
                Variant {
                    tag: spec.tag,
                    shape: spec.shape,
                    raw,
                },
            );
        }

        Ok(Arc::new(UnionType {
            name,
            backing,
            variants,
            raw_table,
        }))
    }
}

/// Decide the backing and enforce its exclusivity.
fn resolve_backing(
    name: &str,
    declared: Option<ScalarKind>,
    variants: &[VariantSpec],
) -> Result<Backing, DefinitionError> {
    // An undeclared kind is inherited from the first explicit raw value.
    let kind = declared
        .or_else(|| variants.iter().find_map(|v| v.raw.as_ref().map(RawValue::kind)));

    match kind {
        Some(kind) => {
            // Raw backing: no variant may carry a payload shape.
            if let Some(v) = variants.iter().find(|v| !v.shape.is_none()) {
                return Err(DefinitionError::MixedBacking {
                    type_name: name.to_string(),
                    tag: v.tag.clone(),
                });
            }
            Ok(Backing::Raw(kind))
        }
        None => {
            // Payload backing: no variant may carry an explicit raw value.
            if let Some(v) = variants.iter().find(|v| v.raw.is_some()) {
                return Err(DefinitionError::MixedBacking {
                    type_name: name.to_string(),
                    tag: v.tag.clone(),
                });
            }
            Ok(Backing::Payload)
        }
    }
}

/// Resolve one variant's raw value: explicit (kind-checked) or defaulted.
///
/// Defaulting: numeric kinds continue +1 from the previous resolved value,
/// starting at 0; an explicit value resets the running counter. Text kinds
/// default to the variant's own tag.
fn resolve_raw(
    name: &str,
    kind: ScalarKind,
    spec: &VariantSpec,
    prev: Option<&RawValue>,
) -> Result<RawValue, DefinitionError> {
    if let Some(value) = &spec.raw {
        if value.kind() != kind {
            return Err(DefinitionError::KindMismatch {
                type_name: name.to_string(),
                tag: spec.tag.clone(),
                value: value.clone(),
                declared: kind,
                found: value.kind(),
            });
        }
        return Ok(value.clone());
    }

    match (kind, prev) {
        (ScalarKind::Text, _) => Ok(RawValue::Text(spec.tag.clone())),
        // A numeric predecessor with no successor means the range ran out,
        // not that a fresh origin should restart the sequence.
        (ScalarKind::Int | ScalarKind::Float, Some(prev)) => {
            prev.succ().ok_or_else(|| DefinitionError::Overflow {
                type_name: name.to_string(),
                tag: spec.tag.clone(),
                prev: prev.clone(),
            })
        }
        (ScalarKind::Int | ScalarKind::Float, None) => {
            RawValue::origin(kind).ok_or_else(|| DefinitionError::NoDefault {
                type_name: name.to_string(),
                tag: spec.tag.clone(),
                kind,
            })
        }
    }
}

/// Fluent definition front door for code.
///
/// ```
/// use unionkit_core::{ScalarKind, UnionTypeBuilder};
///
/// let planet = UnionTypeBuilder::new("planet")
///     .raw(ScalarKind::Int)
///     .variant_raw("mercury", 1i64.into())
///     .variant("venus")
///     .variant("earth")
///     .define()
///     .unwrap();
/// assert_eq!(planet.variant("earth").unwrap().raw, Some(3i64.into()));
/// ```
#[derive(Debug, Clone)]
pub struct UnionTypeBuilder {
    spec: DefSpec,
}

impl UnionTypeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            spec: DefSpec {
                name: name.into(),
                raw_kind: None,
                variants: Vec::new(),
            },
        }
    }

    /// Declare raw-value backing with the given scalar kind.
    pub fn raw(mut self, kind: ScalarKind) -> Self {
        self.spec.raw_kind = Some(kind);
        self
    }

    /// A variant with no payload and a defaulted raw value (if raw-backed).
    pub fn variant(mut self, tag: impl Into<String>) -> Self {
        self.spec.variants.push(VariantSpec {
            tag: tag.into(),
            raw: None,
            shape: PayloadShape::None,
        });
        self
    }

    /// A variant with an explicit raw value.
    pub fn variant_raw(mut self, tag: impl Into<String>, raw: RawValue) -> Self {
        self.spec.variants.push(VariantSpec {
            tag: tag.into(),
            raw: Some(raw),
            shape: PayloadShape::None,
        });
        self
    }

    /// A variant carrying one anonymous payload value.
    pub fn variant_single(mut self, tag: impl Into<String>, ty: FieldType) -> Self {
        self.spec.variants.push(VariantSpec {
            tag: tag.into(),
            raw: None,
            shape: PayloadShape::Single(ty),
        });
        self
    }

    /// A variant carrying an ordered list of named fields.
    pub fn variant_fields<S: Into<String>>(
        mut self,
        tag: impl Into<String>,
        fields: impl IntoIterator<Item = (S, FieldType)>,
    ) -> Self {
        self.spec.variants.push(VariantSpec {
            tag: tag.into(),
            raw: None,
            shape: PayloadShape::Fields(
                fields
                    .into_iter()
                    .map(|(name, ty)| FieldDef::new(name, ty))
                    .collect(),
            ),
        });
        self
    }

    /// Validate and seal. See [`DefSpec::define`].
    pub fn define(self) -> Result<Arc<UnionType>, DefinitionError> {
        self.spec.define()
    }
}
