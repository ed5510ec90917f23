//! This module defines [Schema].

use hashbrown::HashSet;
use linked_hash_map::LinkedHashMap;

/// Ordered list of uniquely named attributes.
///
/// The position of an attribute in the list is the index of
/// the column that stores its values.
/// Positions are assigned in insertion order and always form
/// the range `0..arity`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
    /// Associates each attribute with its column index.
    /// Iteration order coincides with the column order.
    positions: LinkedHashMap<String, usize>,
}

impl Schema {
    /// Constructs new (empty) [Schema].
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a [Schema] from a list of attribute names.
    ///
    /// If a name occurs multiple times only its first occurrence is used.
    pub fn from_attributes<S: Into<String>>(attributes: impl IntoIterator<Item = S>) -> Self {
        let mut schema = Self::new();
        for attribute in attributes {
            schema.push(attribute);
        }

        schema
    }

    /// The number of attributes.
    pub fn arity(&self) -> usize {
        self.positions.len()
    }

    /// Bool indicating if the schema contains no attributes.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Return the column index of the given attribute
    /// or `None` if it is not part of this schema.
    pub fn column_index(&self, attribute: &str) -> Option<usize> {
        self.positions.get(attribute).copied()
    }

    /// Return whether this schema contains the given attribute.
    pub fn contains(&self, attribute: &str) -> bool {
        self.positions.contains_key(attribute)
    }

    /// Return the attribute associated with the given column index.
    pub fn attribute(&self, column: usize) -> Option<&str> {
        self.positions.keys().nth(column).map(String::as_str)
    }

    /// Iterate over the attribute names in column order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }

    /// Return the attribute names in column order.
    pub fn attribute_names(&self) -> Vec<String> {
        self.positions.keys().cloned().collect()
    }

    /// Append a new attribute.
    ///
    /// Returns `false` and leaves the schema unchanged
    /// if the attribute is already present.
    pub fn push<S: Into<String>>(&mut self, attribute: S) -> bool {
        let attribute = attribute.into();
        if self.positions.contains_key(&attribute) {
            return false;
        }

        let column = self.positions.len();
        self.positions.insert(attribute, column);

        true
    }

    /// Append a list of new attributes.
    ///
    /// This either adds all of the attributes or none of them:
    /// if any of the names is already present, or if a name occurs twice in `attributes`,
    /// the schema remains unchanged and `false` is returned.
    pub fn append<S: AsRef<str>>(&mut self, attributes: &[S]) -> bool {
        let mut batch = HashSet::<&str>::with_capacity(attributes.len());
        for attribute in attributes {
            let attribute = attribute.as_ref();
            if self.contains(attribute) || !batch.insert(attribute) {
                return false;
            }
        }

        for attribute in attributes {
            self.push(attribute.as_ref());
        }

        true
    }

    /// Return the attributes that occur in both schemas,
    /// ordered by their position in `self`.
    pub fn shared_attributes<'a>(&'a self, other: &Schema) -> Vec<&'a str> {
        let other_attributes = other.iter().collect::<HashSet<&str>>();
        self.iter()
            .filter(|attribute| other_attributes.contains(attribute))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::Schema;
    use test_log::test;

    #[test]
    fn positions_follow_insertion_order() {
        let schema = Schema::from_attributes(["Z", "A", "M"]);

        assert_eq!(schema.arity(), 3);
        assert_eq!(schema.column_index("Z"), Some(0));
        assert_eq!(schema.column_index("A"), Some(1));
        assert_eq!(schema.column_index("M"), Some(2));
        assert_eq!(schema.column_index("B"), None);
        assert_eq!(schema.attribute_names(), vec!["Z", "A", "M"]);
        assert_eq!(schema.attribute(1), Some("A"));
        assert_eq!(schema.attribute(3), None);
    }

    #[test]
    fn duplicates_in_constructor_are_skipped() {
        let schema = Schema::from_attributes(["A", "B", "A"]);
        assert_eq!(schema.attribute_names(), vec!["A", "B"]);
    }

    #[test]
    fn push_rejects_existing() {
        let mut schema = Schema::from_attributes(["A"]);

        assert!(schema.push("B"));
        assert!(!schema.push("A"));
        assert_eq!(schema.attribute_names(), vec!["A", "B"]);
    }

    #[test]
    fn append_is_all_or_nothing() {
        let mut schema = Schema::from_attributes(["A", "B"]);

        assert!(!schema.append(&["C", "B"]));
        assert_eq!(schema.arity(), 2);

        assert!(!schema.append(&["C", "C"]));
        assert_eq!(schema.arity(), 2);

        assert!(schema.append(&["C", "D"]));
        assert_eq!(schema.attribute_names(), vec!["A", "B", "C", "D"]);
        assert_eq!(schema.column_index("D"), Some(3));
    }

    #[test]
    fn shared_attributes_ignore_alphabetical_order() {
        let left = Schema::from_attributes(["Z", "B", "Y"]);
        let right = Schema::from_attributes(["Y", "Q", "Z"]);

        assert_eq!(left.shared_attributes(&right), vec!["Z", "Y"]);
        assert_eq!(right.shared_attributes(&left), vec!["Y", "Z"]);
        assert!(left.shared_attributes(&Schema::new()).is_empty());
    }
}
