//! This module defines [Relation].

use hashbrown::HashSet;

use crate::error::Error;

use super::{
    operations::{join::natural_join, project::project, semi_join::semi_join},
    schema::Schema,
};

/// Value stored in the columns of a [Relation]
pub type Value = i64;

/// A table of fixed-arity integer tuples whose columns are named by a [Schema].
///
/// Tuples are kept in insertion order in a single row-major buffer.
/// A relation may contain the same tuple more than once;
/// duplicates are only removed by projection.
///
/// Operations on relations never modify their inputs
/// but always construct a new relation.
#[derive(Clone, Debug, Default)]
pub struct Relation {
    /// Name used when displaying the relation
    name: Option<String>,
    /// Attributes of this relation
    schema: Schema,
    /// Row-major storage of all tuples
    data: Vec<Value>,
    /// Number of stored tuples
    ///
    /// Needs to be tracked separately, since relations without attributes
    /// may contain (empty) tuples.
    row_count: usize,
}

impl Relation {
    /// Create a new empty [Relation] with the given attributes.
    pub fn new<S: Into<String>>(attributes: impl IntoIterator<Item = S>) -> Self {
        Self::from_schema(Schema::from_attributes(attributes))
    }

    /// Create a new empty named [Relation] with the given attributes.
    pub fn with_name<N: Into<String>, S: Into<String>>(
        name: N,
        attributes: impl IntoIterator<Item = S>,
    ) -> Self {
        let mut relation = Self::new(attributes);
        relation.set_name(name);

        relation
    }

    /// Create a new empty [Relation] from a [Schema].
    pub fn from_schema(schema: Schema) -> Self {
        Self {
            name: None,
            schema,
            data: Vec::new(),
            row_count: 0,
        }
    }

    /// Create a new [Relation] with the given attributes
    /// and insert each of the given rows.
    ///
    /// Rows which do not match the number of attributes are dropped,
    /// see [Relation::insert_tuple].
    pub fn from_rows<S, R>(
        attributes: impl IntoIterator<Item = S>,
        rows: impl IntoIterator<Item = R>,
    ) -> Self
    where
        S: Into<String>,
        R: AsRef<[Value]>,
    {
        let mut relation = Self::new(attributes);
        for row in rows {
            relation.insert_tuple(row.as_ref());
        }

        relation
    }

    /// Return the name of this relation, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name of this relation.
    pub fn set_name<N: Into<String>>(&mut self, name: N) {
        self.name = Some(name.into());
    }

    /// Return this relation with the given name.
    pub fn named<N: Into<String>>(mut self, name: N) -> Self {
        self.set_name(name);
        self
    }

    /// Return the [Schema] of this relation.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Return the number of tuples.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Return the number of columns.
    pub fn column_count(&self) -> usize {
        self.schema.arity()
    }

    /// Return whether this relation contains no tuples.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Return the column index of the given attribute
    /// or `None` if the attribute does not exist.
    pub fn column_index(&self, attribute: &str) -> Option<usize> {
        self.schema.column_index(attribute)
    }

    /// Return the attribute names in column order.
    pub fn attribute_names(&self) -> Vec<String> {
        self.schema.attribute_names()
    }

    /// Add a new attribute to this relation.
    ///
    /// The new column is appended after all existing columns
    /// and every stored tuple receives the value `0` in this column.
    /// Returns `false` if the attribute already exists.
    pub fn add_attribute<S: Into<String>>(&mut self, attribute: S) -> bool {
        let old_arity = self.column_count();
        if !self.schema.push(attribute) {
            return false;
        }

        self.widen(old_arity, 1);
        true
    }

    /// Add several new attributes to this relation.
    ///
    /// Either all attributes are added or, if one of them already exists, none of them.
    /// Stored tuples are padded with `0` in every new column.
    pub fn add_attributes<S: AsRef<str>>(&mut self, attributes: &[S]) -> bool {
        let old_arity = self.column_count();
        if !self.schema.append(attributes) {
            return false;
        }

        self.widen(old_arity, attributes.len());
        true
    }

    /// Rebuild the row storage after `added` columns were appended to the schema.
    fn widen(&mut self, old_arity: usize, added: usize) {
        if self.row_count == 0 || added == 0 {
            return;
        }

        let new_arity = old_arity + added;
        let mut data = Vec::<Value>::with_capacity(self.row_count * new_arity);

        for row in 0..self.row_count {
            data.extend_from_slice(&self.data[row * old_arity..(row + 1) * old_arity]);
            data.extend(std::iter::repeat(0).take(added));
        }

        self.data = data;
    }

    /// Append a tuple to this relation.
    ///
    /// The tuple is only accepted if its length equals the number of columns.
    /// Otherwise it is dropped and `false` is returned.
    pub fn insert_tuple(&mut self, tuple: &[Value]) -> bool {
        if tuple.len() != self.column_count() {
            log::trace!(
                "dropping tuple {:?} of length {} from relation with {} columns",
                tuple,
                tuple.len(),
                self.column_count()
            );

            return false;
        }

        self.push_row(tuple);
        true
    }

    /// Append a row without checking its length.
    pub(crate) fn push_row(&mut self, row: &[Value]) {
        debug_assert_eq!(row.len(), self.column_count());

        self.data.extend_from_slice(row);
        self.row_count += 1;
    }

    /// Return the tuple at the given row.
    ///
    /// # Errors
    /// Returns [Error::RowOutOfRange] if there is no such row.
    pub fn tuple(&self, row: usize) -> Result<&[Value], Error> {
        if row >= self.row_count {
            return Err(Error::RowOutOfRange {
                index: row,
                row_count: self.row_count,
            });
        }

        Ok(self.row(row))
    }

    /// Return the tuple at the given row.
    ///
    /// # Panics
    /// Panics if `row` is out of range.
    pub(crate) fn row(&self, row: usize) -> &[Value] {
        let arity = self.column_count();
        &self.data[row * arity..(row + 1) * arity]
    }

    /// Iterate over all tuples in insertion order.
    pub fn tuples(&self) -> impl ExactSizeIterator<Item = &[Value]> + '_ {
        (0..self.row_count).map(move |row| self.row(row))
    }

    /// Return the set of distinct tuples stored in this relation.
    ///
    /// Useful for comparing relations independent of row order.
    pub fn tuple_set(&self) -> HashSet<Vec<Value>> {
        self.tuples().map(<[Value]>::to_vec).collect()
    }

    /// Return the projection of this relation onto a single attribute.
    ///
    /// If the attribute does not exist, the result is the empty relation.
    pub fn project_attribute(&self, attribute: &str) -> Relation {
        project(self, &[attribute])
    }

    /// Return the projection of this relation onto the given attributes,
    /// see [project].
    pub fn project<S: AsRef<str>>(&self, attributes: &[S]) -> Relation {
        project(self, attributes)
    }

    /// Return the natural join of this relation with another one,
    /// see [natural_join].
    pub fn natural_join(&self, other: &Relation) -> Relation {
        natural_join(self, other)
    }

    /// Return the semi-join of this relation with another one,
    /// see [semi_join].
    pub fn semi_join(&self, other: &Relation) -> Relation {
        semi_join(self, other)
    }
}
