//! Variant Keys

use std::fmt;

/// Separator between key parts.
///
/// Catalog option values ("60x60", "2mm", "Ice White") never carry a pipe, so
/// the joined parts cannot collide with each other.
const SEPARATOR: char = '|';

/// Stable identity for one orderable variant of a product.
///
/// Derived from `(product id, color, size, thickness)`. The cart holds at
/// most one line per distinct key; there is no numeric row counter, this
/// string is the sole line-identity mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantKey(String);

impl VariantKey {
    /// Build the key for a product and selection.
    ///
    /// Deterministic, pure and order-sensitive; unselected optional parts are
    /// joined as empty strings, so `(id, None, None, None)` is itself a
    /// stable key.
    #[must_use]
    pub fn build(
        product_id: &str,
        color: Option<&str>,
        size: Option<&str>,
        thickness: Option<&str>,
    ) -> Self {
        let capacity = product_id.len()
            + color.map_or(0, str::len)
            + size.map_or(0, str::len)
            + thickness.map_or(0, str::len)
            + 3;

        let mut key = String::with_capacity(capacity);

        key.push_str(product_id);
        key.push(SEPARATOR);
        key.push_str(color.unwrap_or(""));
        key.push(SEPARATOR);
        key.push_str(size.unwrap_or(""));
        key.push(SEPARATOR);
        key.push_str(thickness.unwrap_or(""));

        VariantKey(key)
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_arguments_yield_identical_keys() {
        let first = VariantKey::build("P-1", Some("White"), Some("60x60"), Some("2mm"));
        let second = VariantKey::build("P-1", Some("White"), Some("60x60"), Some("2mm"));

        assert_eq!(first, second);
    }

    #[test]
    fn different_color_yields_different_key() {
        let white = VariantKey::build("P-1", Some("White"), Some("60x60"), Some("2mm"));
        let grey = VariantKey::build("P-1", Some("Grey"), Some("60x60"), Some("2mm"));

        assert_ne!(white, grey);
    }

    #[test]
    fn each_part_contributes_to_identity() {
        let base = VariantKey::build("P-1", Some("a"), Some("b"), Some("c"));

        assert_ne!(base, VariantKey::build("P-2", Some("a"), Some("b"), Some("c")));
        assert_ne!(base, VariantKey::build("P-1", Some("x"), Some("b"), Some("c")));
        assert_ne!(base, VariantKey::build("P-1", Some("a"), Some("x"), Some("c")));
        assert_ne!(base, VariantKey::build("P-1", Some("a"), Some("b"), Some("x")));
    }

    #[test]
    fn swapped_parts_do_not_collide() {
        let one = VariantKey::build("P-1", Some("x"), Some("y"), None);
        let other = VariantKey::build("P-1", Some("y"), Some("x"), None);

        assert_ne!(one, other);
    }

    #[test]
    fn missing_parts_are_treated_as_empty_strings() {
        let missing = VariantKey::build("P-1", None, Some("60x60"), None);
        let empty = VariantKey::build("P-1", Some(""), Some("60x60"), Some(""));

        assert_eq!(missing, empty);
    }

    #[test]
    fn display_matches_as_str() {
        let key = VariantKey::build("P-1", Some("White"), None, None);

        assert_eq!(key.to_string(), key.as_str());
    }
}
