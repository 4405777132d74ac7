//! Derived schema names.

use std::fmt;

use serde::Serialize;

/// A qualified schema name: optional namespace plus local part. Anonymous
/// types carry an empty local part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QName {
    pub namespace: Option<String>,
    pub local: String,
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

/// Lower-camel a simple type name, with the bean-introspection quirk: a
/// name whose first two characters are both uppercase is left untouched
/// (`URL` stays `URL`, `Order` becomes `order`).
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if let Some(second) = chars.next() {
        if first.is_uppercase() && second.is_uppercase() {
            return name.to_string();
        }
    }
    let mut result = String::with_capacity(name.len());
    result.extend(first.to_lowercase());
    result.push_str(&name[first.len_utf8()..]);
    result
}
