//! Human-facing cell names such as `B6`: letters pick the column using the
//! bijective base-26 scheme of spreadsheet addressing, digits pick the 1-based
//! row.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::*;

static VALID_CELL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+)([0-9]+)$").expect("cell name pattern is valid"));

/// A cell name as typed by the player, kept verbatim for event provenance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellName(String);

impl CellName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes this name, see [`cell_name_to_coordinate`].
    pub fn to_coordinate(&self) -> Result<RawCoord> {
        cell_name_to_coordinate(&self.0)
    }
}

impl fmt::Display for CellName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CellName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for CellName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Converts a name like `B6` into zero-based `(x, y)` coordinates.
///
/// Only the syntax is checked here. A well-formed name may still point outside
/// any grid (`Z30`, `A0`), which is left to the caller's bounds check. Values
/// too large to represent saturate instead of wrapping.
pub fn cell_name_to_coordinate(name: &str) -> Result<RawCoord> {
    let captures = VALID_CELL_NAME
        .captures(name)
        .ok_or_else(|| GameError::InvalidCellName(name.into()))?;

    let x = column_key_to_int(&captures[1]);
    let row = captures[2]
        .bytes()
        .fold(0i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
        });

    Ok((x, row - 1))
}

/// Converts a column key (e.g. `AA`) to a zero-based column index.
///
/// Case-insensitive. `A` is 0, `Z` is 25, `AA` is 26.
pub fn column_key_to_int(column_key: &str) -> i64 {
    let value = column_key
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .fold(0i64, |acc, c| {
            let digit = i64::from(u32::from(c)) - i64::from(u32::from('A')) + 1;
            acc.saturating_mul(26).saturating_add(digit)
        });

    value - 1
}

/// Inverse of [`column_key_to_int`].
pub fn int_to_column_key(index: u32) -> String {
    let mut remaining = u64::from(index) + 1;
    let mut letters = Vec::new();
    while remaining > 0 {
        remaining -= 1;
        // remainder is below 26 so it always fits a letter
        letters.push(b'A' + (remaining % 26) as u8);
        remaining /= 26;
    }
    letters.iter().rev().map(|&b| char::from(b)).collect()
}

/// Canonical name of in-bounds coordinates, e.g. `(1, 5)` is `B6`.
pub fn coordinate_to_cell_name((x, y): Coord2) -> CellName {
    CellName(format!("{}{}", int_to_column_key(x.into()), u32::from(y) + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_keys_decode_as_bijective_base_26() {
        assert_eq!(column_key_to_int("A"), 0);
        assert_eq!(column_key_to_int("B"), 1);
        assert_eq!(column_key_to_int("Z"), 25);
        assert_eq!(column_key_to_int("AA"), 26);
        assert_eq!(column_key_to_int("BZ"), 77);
    }

    #[test]
    fn column_keys_ignore_case() {
        assert_eq!(column_key_to_int("a"), 0);
        assert_eq!(column_key_to_int("bz"), column_key_to_int("BZ"));
        assert_eq!(column_key_to_int("aA"), 26);
    }

    #[test]
    fn column_keys_encode_back() {
        assert_eq!(int_to_column_key(0), "A");
        assert_eq!(int_to_column_key(25), "Z");
        assert_eq!(int_to_column_key(26), "AA");
        assert_eq!(int_to_column_key(77), "BZ");
        assert_eq!(int_to_column_key(701), "ZZ");
        assert_eq!(int_to_column_key(702), "AAA");
        for index in 0..2000 {
            assert_eq!(column_key_to_int(&int_to_column_key(index)), i64::from(index));
        }
    }

    #[test]
    fn cell_names_decode_to_zero_based_coordinates() {
        assert_eq!(cell_name_to_coordinate("A1"), Ok((0, 0)));
        assert_eq!(cell_name_to_coordinate("b2"), Ok((1, 1)));
        assert_eq!(cell_name_to_coordinate("E3"), Ok((4, 2)));
        assert_eq!(cell_name_to_coordinate("AA10"), Ok((26, 9)));
    }

    #[test]
    fn well_formed_names_outside_any_grid_still_decode() {
        assert_eq!(cell_name_to_coordinate("Z30"), Ok((25, 29)));
        assert_eq!(cell_name_to_coordinate("A0"), Ok((0, -1)));
    }

    #[test]
    fn huge_names_saturate() {
        let (x, y) = cell_name_to_coordinate("ZZZZZZZZZZZZZZZZ99999999999999999999999").unwrap();
        assert_eq!(x, i64::MAX - 1);
        assert_eq!(y, i64::MAX - 1);
    }

    #[test]
    fn malformed_names_are_rejected() {
        for name in ["", "A", "12", "1A", "A1B", "B 6", " B6", "B6 ", "Ä1", "A-1"] {
            assert_eq!(
                cell_name_to_coordinate(name),
                Err(GameError::InvalidCellName(name.into())),
                "{name:?}"
            );
        }
    }

    #[test]
    fn coordinates_render_as_names() {
        assert_eq!(coordinate_to_cell_name((0, 0)).as_str(), "A1");
        assert_eq!(coordinate_to_cell_name((1, 5)).to_string(), "B6");
        assert_eq!(coordinate_to_cell_name((39, 39)).as_str(), "AN40");
    }
}
