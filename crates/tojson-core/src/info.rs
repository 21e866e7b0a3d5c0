//! Static per-type metadata for record (struct) values.

use std::sync::OnceLock;

use crate::policy::FieldPolicy;

/// Metadata for one declared field of a record type.
///
/// ```
/// use tojson_core::info::FieldInfo;
///
/// let field = FieldInfo::new("UserID", "", true);
/// assert_eq!(field.policy().name, "user_id");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    name: &'static str,
    tag: &'static str,
    exported: bool,
}

impl FieldInfo {
    /// Describe a field by its declared name, raw (unparsed) tag string and
    /// visibility.
    pub const fn new(name: &'static str, tag: &'static str, exported: bool) -> Self {
        Self {
            name,
            tag,
            exported,
        }
    }

    /// Declared field name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Raw tag string, e.g. `"id,omitempty"`. Empty when the field has none.
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    /// Whether callers outside the type can see this field.
    pub const fn is_exported(&self) -> bool {
        self.exported
    }

    /// Resolve this field's naming and omission policy.
    pub fn policy(&self) -> FieldPolicy {
        FieldPolicy::resolve(self.name, self.tag)
    }
}

/// Field table of a record type, with resolved policies cached on first use.
///
/// Built once per type, normally in a `static` emitted by `#[derive(Reflect)]`:
///
/// ```
/// use tojson_core::info::{FieldInfo, RecordInfo};
///
/// static INFO: RecordInfo = RecordInfo::new(
///     "Account",
///     &[FieldInfo::new("UserID", "", true), FieldInfo::new("secret", "", false)],
/// );
///
/// assert_eq!(INFO.field_count(), 2);
/// assert_eq!(INFO.policies()[0].name, "user_id");
/// ```
#[derive(Debug)]
pub struct RecordInfo {
    type_name: &'static str,
    fields: &'static [FieldInfo],
    policies: OnceLock<Box<[FieldPolicy]>>,
}

impl RecordInfo {
    pub const fn new(type_name: &'static str, fields: &'static [FieldInfo]) -> Self {
        Self {
            type_name,
            fields,
            policies: OnceLock::new(),
        }
    }

    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Fields in declaration order.
    pub const fn fields(&self) -> &'static [FieldInfo] {
        self.fields
    }

    pub const fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Resolved policy of every field, index-aligned with [`fields`](Self::fields).
    pub fn policies(&self) -> &[FieldPolicy] {
        self.policies
            .get_or_init(|| self.fields.iter().map(FieldInfo::policy).collect())
    }
}
