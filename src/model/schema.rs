//! Recognized fields for each entity and the rule applied to each one.

use tracing::trace;

use crate::model::RawRecord;

/// Normalization applied to a field. See [`crate::model::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Trimmed text, `None` when empty.
    StringOrNull,
    /// Float, `NaN` when empty.
    FloatOrNan,
    /// Float, `0.0` when empty.
    FloatOrZero,
    /// `true` only for the hazard code.
    BoolFromCode,
    /// Compact date, `None` when empty.
    DateTimeFromCompact,
}

/// Maps one source column onto one constructor attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Attribute name expected by the entity constructor.
    pub attribute: &'static str,
    /// Column name in the source file.
    pub source: &'static str,
    /// Normalization applied to the value.
    pub rule: FieldRule,
}

/// The full set of fields an entity recognizes.
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    /// Entity kind used in logs and error messages.
    pub entity: &'static str,
    /// Recognized fields, in source column order.
    pub fields: &'static [FieldSpec],
}

/// Columns of the NEO catalog.
pub const NEO_SCHEMA: EntitySchema = EntitySchema {
    entity: "near-Earth object",
    fields: &[
        FieldSpec {
            attribute: "designation",
            source: "pdes",
            rule: FieldRule::StringOrNull,
        },
        FieldSpec {
            attribute: "name",
            source: "name",
            rule: FieldRule::StringOrNull,
        },
        FieldSpec {
            attribute: "diameter",
            source: "diameter",
            rule: FieldRule::FloatOrNan,
        },
        FieldSpec {
            attribute: "hazardous",
            source: "pha",
            rule: FieldRule::BoolFromCode,
        },
    ],
};

/// Fields of the close-approach table.
pub const APPROACH_SCHEMA: EntitySchema = EntitySchema {
    entity: "close approach",
    fields: &[
        FieldSpec {
            attribute: "designation",
            source: "des",
            rule: FieldRule::StringOrNull,
        },
        FieldSpec {
            attribute: "time",
            source: "cd",
            rule: FieldRule::DateTimeFromCompact,
        },
        FieldSpec {
            attribute: "distance",
            source: "dist",
            rule: FieldRule::FloatOrZero,
        },
        FieldSpec {
            attribute: "velocity",
            source: "v_rel",
            rule: FieldRule::FloatOrZero,
        },
    ],
};

impl EntitySchema {
    /// Looks up the spec for a constructor attribute.
    pub fn field(&self, attribute: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.attribute == attribute)
    }

    /// Whether `attribute` is one the constructor reads.
    pub fn recognizes(&self, attribute: &str) -> bool {
        self.field(attribute).is_some()
    }

    /// Renames source columns to constructor attributes. Columns the schema
    /// does not list are dropped; absent columns stay absent.
    pub fn rekey(&self, raw: &RawRecord) -> RawRecord {
        self.fields
            .iter()
            .filter_map(|spec| {
                raw.get(spec.source)
                    .map(|value| (spec.attribute, value.clone()))
            })
            .collect()
    }

    /// Attribute keys in `record` that the constructor will ignore.
    pub fn unrecognized<'a>(&'a self, record: &'a RawRecord) -> impl Iterator<Item = &'a str> {
        record.keys().filter(|key| !self.recognizes(key))
    }

    /// Traces every key the constructor is about to ignore.
    pub(crate) fn trace_ignored(&self, record: &RawRecord) {
        for key in self.unrecognized(record) {
            trace!(entity = self.entity, field = key, "ignoring unrecognized field");
        }
    }
}
