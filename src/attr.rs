//! Attribute values for block nodes.
//!
//! Attributes are stored as ordered key/value pairs directly on each
//! node. A `Vec` keeps insertion order (which follows schema order for
//! parsed nodes) and is faster than a map for the handful of attributes
//! a node carries.

use compact_str::CompactString;

// =============================================================================
// AttrValue
// =============================================================================

/// A single attribute value.
///
/// Enumerated strings (alignment, button variants, ...) are `Str` values
/// whose membership in the closed set is enforced by the schema, not by
/// the value type. Nullable attributes are `Null` when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Str(CompactString),
    Bool(bool),
    Null,
}

impl AttrValue {
    /// Build a string value.
    pub fn str(value: impl Into<CompactString>) -> Self {
        Self::Str(value.into())
    }

    /// Get the string content, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the boolean content, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Render the value for an HTML attribute. `Null` yields `None`
    /// (the attribute is omitted entirely).
    pub fn to_html(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Null => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Str(CompactString::from(s))
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Str(CompactString::from(s))
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

// =============================================================================
// Attrs
// =============================================================================

/// Node attributes as ordered key-value pairs.
pub type Attrs = Vec<(CompactString, AttrValue)>;

/// Extension trait for attribute operations on [`Attrs`].
pub trait AttrsExt {
    /// Get an attribute value by name.
    fn get_attr(&self, name: &str) -> Option<&AttrValue>;

    /// Get an attribute as a string slice (`None` for `Bool`/`Null`/missing).
    fn str_attr(&self, name: &str) -> Option<&str>;

    /// Get an attribute as a bool (`None` for `Str`/`Null`/missing).
    fn bool_attr(&self, name: &str) -> Option<bool>;

    /// Check if an attribute exists.
    fn has_attr(&self, name: &str) -> bool;

    /// Set an attribute value (insert or update).
    fn set_attr(&mut self, name: impl Into<CompactString>, value: AttrValue);

    /// Remove an attribute by name, returning the old value if present.
    fn remove_attr(&mut self, name: &str) -> Option<AttrValue>;

    /// Overlay `patch` on top of self. Keys not named in `patch` are
    /// left untouched; named keys are replaced.
    fn merge(&mut self, patch: &Attrs);
}

impl AttrsExt for Attrs {
    fn get_attr(&self, name: &str) -> Option<&AttrValue> {
        self.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    fn str_attr(&self, name: &str) -> Option<&str> {
        self.get_attr(name).and_then(AttrValue::as_str)
    }

    fn bool_attr(&self, name: &str) -> Option<bool> {
        self.get_attr(name).and_then(AttrValue::as_bool)
    }

    fn has_attr(&self, name: &str) -> bool {
        self.iter().any(|(k, _)| k == name)
    }

    fn set_attr(&mut self, name: impl Into<CompactString>, value: AttrValue) {
        let name = name.into();
        if let Some(attr) = self.iter_mut().find(|(k, _)| *k == name) {
            attr.1 = value;
        } else {
            self.push((name, value));
        }
    }

    fn remove_attr(&mut self, name: &str) -> Option<AttrValue> {
        self.iter()
            .position(|(k, _)| k == name)
            .map(|pos| self.remove(pos).1)
    }

    fn merge(&mut self, patch: &Attrs) {
        for (k, v) in patch {
            self.set_attr(k.clone(), v.clone());
        }
    }
}

/// Order-insensitive attribute comparison.
///
/// Parse rebuilds attributes in schema order while edits append in call
/// order, so the round-trip law compares by content rather than by
/// position.
pub fn attrs_eq(a: &Attrs, b: &Attrs) -> bool {
    a.len() == b.len() && a.iter().all(|(k, v)| b.get_attr(k) == Some(v))
}

// =============================================================================
// Tests
// =============================================================================
