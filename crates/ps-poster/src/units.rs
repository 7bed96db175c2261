//! Named media sizes and linear units
//!
//! A box spec ends in a unit name resolved against this table. Media names
//! denote a full page size; the short names at the end are linear units
//! whose entry is the size of one unit on each axis.

use crate::constants::{POINTS_PER_INCH, POINTS_PER_MM};

/// One row of the unit table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitEntry {
    pub name: &'static str,
    /// Width in PostScript units
    pub width: f64,
    /// Height in PostScript units
    pub height: f64,
}

const fn entry(name: &'static str, width: f64, height: f64) -> UnitEntry {
    UnitEntry {
        name,
        width,
        height,
    }
}

/// Media sizes in PostScript units, then linear units as fall-back.
/// Lookup order matters for error messages only.
pub static UNIT_TABLE: &[UnitEntry] = &[
    entry("Letter", 612.0, 792.0),
    entry("Legal", 612.0, 1008.0),
    entry("Tabloid", 792.0, 1224.0),
    entry("Ledger", 792.0, 1224.0),
    entry("Executive", 540.0, 720.0),
    entry("Monarch", 279.0, 540.0),
    entry("Statement", 396.0, 612.0),
    entry("Folio", 612.0, 936.0),
    entry("Quarto", 610.0, 780.0),
    entry("C5", 459.0, 649.0),
    entry("B4", 729.0, 1032.0),
    entry("B5", 516.0, 729.0),
    entry("Dl", 312.0, 624.0),
    entry("A0", 2380.0, 3368.0),
    entry("A1", 1684.0, 2380.0),
    entry("A2", 1190.0, 1684.0),
    entry("A3", 842.0, 1190.0),
    entry("A4", 595.0, 842.0),
    entry("A5", 420.0, 595.0),
    entry("A6", 297.0, 421.0),
    entry("p", 1.0, 1.0),
    entry("i", POINTS_PER_INCH, POINTS_PER_INCH),
    entry("ft", 864.0, 864.0),
    entry("mm", POINTS_PER_MM, POINTS_PER_MM),
    entry("cm", 28.3465, 28.3465),
    entry("m", 2834.65, 2834.65),
];

/// Why a unit name could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitLookupError {
    /// No entry starts with the name
    Unrecognized,
    /// Several entries start with the name and none equals it
    Ambiguous(Vec<&'static str>),
}

/// Resolve a unit name by case-insensitive prefix.
///
/// A name equal to a full entry wins outright, even when it is also a
/// prefix of other entries (`m` vs `mm`, `Monarch`).
pub fn lookup_unit(name: &str) -> Result<&'static UnitEntry, UnitLookupError> {
    let wanted = name.as_bytes();
    let mut candidates: Vec<&'static UnitEntry> = Vec::new();

    for unit in UNIT_TABLE {
        let full = unit.name.as_bytes();
        if full.len() < wanted.len() || !full[..wanted.len()].eq_ignore_ascii_case(wanted) {
            continue;
        }
        if full.len() == wanted.len() {
            return Ok(unit);
        }
        candidates.push(unit);
    }

    match candidates.as_slice() {
        [] => Err(UnitLookupError::Unrecognized),
        [only] => Ok(*only),
        many => Err(UnitLookupError::Ambiguous(
            many.iter().map(|u| u.name).collect(),
        )),
    }
}

/// All unit names, in table order
pub fn unit_names() -> impl Iterator<Item = &'static str> {
    UNIT_TABLE.iter().map(|u| u.name)
}
