//! Relations used throughout the tests of this crate

use rand::Rng;

use crate::tabular::relation::Relation;

/// Name of the `index`th attribute of a generated line join
fn chain_attribute(index: usize) -> String {
    format!("A{index}")
}

/// Returns the relations `R1(A, B), R2(B, C), R3(C, D), R4(D, E)`
/// of a fixed line join with several dangling tuples.
pub(crate) fn fixture_chain() -> Vec<Relation> {
    vec![
        Relation::from_rows(
            ["A", "B"],
            [
                [1, 2],
                [4, 5],
                [7, 8],
                [10, 9],
                [1, 3],
                [2, 2],
                [11, 3],
                [6, 7],
                [11, 5],
                [12, 15],
            ],
        ),
        Relation::from_rows(
            ["B", "C"],
            [
                [2, 4],
                [5, 2],
                [7, 8],
                [13, 9],
                [1, 3],
                [5, 9],
                [15, 6],
                [3, 7],
                [3, 5],
                [9, 4],
            ],
        ),
        Relation::from_rows(
            ["C", "D"],
            [
                [4, 8],
                [5, 2],
                [8, 9],
                [6, 21],
                [1, 3],
                [10, 2],
                [9, 20],
                [3, 8],
                [3, 12],
                [9, 15],
            ],
        ),
        Relation::from_rows(
            ["D", "E"],
            [
                [8, 16],
                [8, 1],
                [7, 12],
                [15, 37],
                [3, 3],
                [12, 7],
                [21, 6],
                [2, 4],
                [3, 5],
                [20, 5],
            ],
        ),
    ]
}

/// Returns a line join of `length` binary relations with `rows` random tuples each,
/// using values from `0..domain`.
pub(crate) fn random_chain<R: Rng>(
    rng: &mut R,
    length: usize,
    rows: usize,
    domain: i64,
) -> Vec<Relation> {
    (0..length)
        .map(|index| {
            Relation::from_rows(
                [chain_attribute(index), chain_attribute(index + 1)],
                (0..rows).map(|_| [rng.gen_range(0..domain), rng.gen_range(0..domain)]),
            )
        })
        .collect()
}

/// Turns arbitrary pairs into a line join of at most `max_length` relations.
///
/// Values are reduced to a small domain and relations are truncated
/// such that joins stay small but still have many matches.
pub(crate) fn chain_from_pairs(pairs: &[Vec<(u8, u8)>], max_length: usize) -> Vec<Relation> {
    const MAX_ROWS: usize = 12;
    const DOMAIN: u8 = 4;

    pairs
        .iter()
        .take(max_length)
        .enumerate()
        .map(|(index, tuples)| {
            Relation::from_rows(
                [chain_attribute(index), chain_attribute(index + 1)],
                tuples
                    .iter()
                    .take(MAX_ROWS)
                    .map(|&(a, b)| [i64::from(a % DOMAIN), i64::from(b % DOMAIN)]),
            )
        })
        .collect()
}
