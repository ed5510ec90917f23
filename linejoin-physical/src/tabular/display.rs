//! This module implements [Display][fmt::Display] for [Relation].
//!
//! A relation is rendered as a table:
//! a header row with the attribute names, a separator line,
//! and one line per tuple.
//! Every column except the last one is padded to a common width
//! and followed by `|`.

use std::fmt;

use super::relation::Relation;

/// Write a single row of already rendered cells.
fn write_row<S: AsRef<str>>(
    f: &mut fmt::Formatter<'_>,
    cells: &[S],
    widths: &[usize],
) -> fmt::Result {
    let Some((last, init)) = cells.split_last() else {
        return writeln!(f);
    };

    for (cell, &width) in init.iter().zip(widths) {
        write!(f, "{:<width$}|", cell.as_ref())?;
    }

    writeln!(f, "{}", last.as_ref())
}

impl Relation {
    /// Compute the width of each column when displaying this relation:
    /// one more than its longest entry, including the attribute name.
    fn column_widths(&self) -> Vec<usize> {
        let mut widths = self
            .schema()
            .iter()
            .map(|attribute| attribute.len() + 1)
            .collect::<Vec<_>>();

        for tuple in self.tuples() {
            for (width, value) in widths.iter_mut().zip(tuple) {
                *width = (*width).max(value.to_string().len() + 1);
            }
        }

        widths
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.column_widths();
        let header = self.schema().iter().collect::<Vec<_>>();

        write_row(f, &header, &widths)?;

        let total_width = (widths.iter().sum::<usize>() + widths.len()).saturating_sub(1);
        writeln!(f, "{}", "-".repeat(total_width))?;

        let mut cells = Vec::<String>::with_capacity(widths.len());
        for tuple in self.tuples() {
            cells.clear();
            cells.extend(tuple.iter().map(ToString::to_string));

            write_row(f, &cells, &widths)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::tabular::relation::Relation;
    use test_log::test;

    #[test]
    fn display_pads_columns() {
        let relation = Relation::from_rows(["A", "B"], [[1, 2], [4, 15], [-100, 3]]);

        let expected = "\
A    |B
---------
1    |2
4    |15
-100 |3
";
        assert_eq!(relation.to_string(), expected);
    }

    #[test]
    fn display_long_attribute_names() {
        let relation = Relation::from_rows(["Name", "C"], [[7, 12345]]);

        let expected = "\
Name |C
------------
7    |12345
";
        assert_eq!(relation.to_string(), expected);
    }

    #[test]
    fn display_empty() {
        assert_eq!(Relation::default().to_string(), "\n\n");
        assert_eq!(Relation::new(["A"]).to_string(), "A\n--\n");
    }
}
