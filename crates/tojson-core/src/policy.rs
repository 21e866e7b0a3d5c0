//! Field naming and omission policy, derived from a field's name and raw tag.
//!
//! # Tag syntax
//!
//! - `""` -- no tag: the field name is converted to snake_case
//! - `"id"` -- emit under `id`
//! - `"id,omitempty"` -- emit under `id`, skip when the value is empty
//! - `",omitempty"` -- keep the snake_case name, skip when empty
//! - `"-"` -- never emit the field
//!
//! Unknown options are ignored, so tags written for other encoders still
//! resolve.

use serde::Serialize;

/// First tag segment that drops the field unconditionally.
pub const OMIT_SENTINEL: &str = "-";

/// Tag option that drops the field when its value is empty.
pub const OMIT_EMPTY: &str = "omitempty";

/// How a single record field is emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldPolicy {
    /// Key the field is emitted under.
    pub name: String,
    /// The field never appears in the output.
    pub omit_always: bool,
    /// The field is skipped when its value is the zero value of its kind.
    pub omit_if_empty: bool,
}

impl FieldPolicy {
    /// Resolve the policy for `field_name` given its raw tag. Total over any
    /// input: malformed tags degrade to default treatment.
    ///
    /// ```
    /// use tojson_core::FieldPolicy;
    ///
    /// let policy = FieldPolicy::resolve("CreatedAt", "created,omitempty");
    /// assert_eq!(policy.name, "created");
    /// assert!(policy.omit_if_empty);
    ///
    /// assert_eq!(FieldPolicy::resolve("UserID", "").name, "user_id");
    /// assert!(FieldPolicy::resolve("Password", "-").omit_always);
    /// ```
    pub fn resolve(field_name: &str, raw_tag: &str) -> Self {
        let mut policy = FieldPolicy {
            name: String::new(),
            omit_always: false,
            omit_if_empty: false,
        };

        let mut segments = raw_tag.split(',');
        // `split` always yields at least one segment, possibly empty.
        let override_name = segments.next().unwrap_or_default();

        if override_name == OMIT_SENTINEL {
            policy.name = to_snake_case(field_name);
            policy.omit_always = true;
            return policy;
        }

        policy.name = if override_name.is_empty() {
            to_snake_case(field_name)
        } else {
            override_name.to_owned()
        };

        for option in segments {
            if option == OMIT_EMPTY {
                policy.omit_if_empty = true;
            }
        }

        policy
    }
}

/// Convert a `CamelCase` / `camelCase` identifier to `snake_case`.
///
/// A word starts at an uppercase letter that follows a lowercase letter or a
/// digit, and at the last letter of an uppercase run that is followed by a
/// lowercase letter, so acronyms stay whole. Identifiers that are already
/// snake_case come back unchanged.
///
/// ```
/// use tojson_core::policy::to_snake_case;
///
/// assert_eq!(to_snake_case("UserID"), "user_id");
/// assert_eq!(to_snake_case("HTTPServer"), "http_server");
/// assert_eq!(to_snake_case("createdAt"), "created_at");
/// assert_eq!(to_snake_case("already_snake"), "already_snake");
/// ```
pub fn to_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_uppercase() {
            out.push(c);
            continue;
        }
        if i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let starts_word = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if starts_word {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}
