//! UN/CEFACT Recommendation 20 unit codes accepted on line items.
//!
//! ebInterface takes any Rec 20 code in the `Unit` attribute of a quantity;
//! this is the subset merchants actually send us.

/// Unit used when a line item names none ("one", i.e. pieces).
pub const DEFAULT_UNIT: &str = "C62";

/// Check whether `code` is an accepted unit code.
pub fn is_known_unit_code(code: &str) -> bool {
    UNIT_CODES.binary_search(&code).is_ok()
}

/// Sorted for binary search.
static UNIT_CODES: &[&str] = &[
    "ANN", // year
    "C62", // one (piece)
    "CMT", // centimetre
    "DAY", // day
    "DZN", // dozen
    "GRM", // gram
    "H87", // piece
    "HUR", // hour
    "KGM", // kilogram
    "KMT", // kilometre
    "KWH", // kilowatt-hour
    "LS",  // lump sum
    "LTR", // litre
    "MIN", // minute
    "MON", // month
    "MTK", // square metre
    "MTQ", // cubic metre
    "MTR", // metre
    "P1",  // percent
    "PR",  // pair
    "SET", // set
    "TNE", // tonne
    "WEE", // week
    "XPK", // package
];
