use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Connectivity code to edge class, slot order Up, Left, Down, Right.
///
/// The class numbering is a fixed enumeration, not the binary value of the
/// code.
pub const EDGE_CLASS_TABLE: [(&str, u8); 16] = [
    ("0000", 0),
    ("0001", 1),
    ("0010", 2),
    ("0011", 3),
    ("0100", 4),
    ("0110", 5),
    ("0111", 6),
    ("1000", 7),
    ("1001", 8),
    ("1011", 9),
    ("1100", 10),
    ("1101", 11),
    ("1110", 12),
    ("1111", 13),
    ("0101", 14),
    ("1010", 15),
];

/// Presence of a neighbor in each of the four direction slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConnectivityCode(pub [bool; 4]);

impl ConnectivityCode {
    /// Number of filled slots.
    #[must_use]
    pub fn degree(self) -> usize {
        self.0.iter().filter(|&&b| b).count()
    }

    /// Looks up the edge class of this code.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::InvalidConnectivity` if the code is missing from
    /// [`EDGE_CLASS_TABLE`].
    pub fn edge_class(self) -> Result<EdgeClass, GraphError> {
        EdgeClass::lookup(&self.to_string())
    }
}

impl fmt::Display for ConnectivityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Table-assigned class of a connectivity pattern, in `0..=15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeClass(pub u8);

impl EdgeClass {
    /// Looks up a 4-character connectivity string.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::InvalidConnectivity` if the string is not a table key.
    pub fn lookup(code: &str) -> Result<Self, GraphError> {
        EDGE_CLASS_TABLE
            .iter()
            .find(|(key, _)| *key == code)
            .map(|&(_, class)| Self(class))
            .ok_or_else(|| GraphError::InvalidConnectivity(code.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn all_codes() -> Vec<ConnectivityCode> {
        (0..16_u8)
            .map(|m| ConnectivityCode([m & 8 != 0, m & 4 != 0, m & 2 != 0, m & 1 != 0]))
            .collect()
    }

    #[test]
    fn lookup_is_total_over_four_bits() {
        for code in all_codes() {
            assert!(code.edge_class().is_ok(), "missing {code}");
        }
    }

    #[test]
    fn lookup_is_injective() {
        let classes: HashSet<EdgeClass> =
            all_codes().into_iter().map(|c| c.edge_class().unwrap()).collect();
        assert_eq!(classes.len(), 16);
        assert!(classes.iter().all(|c| c.0 <= 15));
    }

    #[test]
    fn table_is_not_binary_order() {
        assert_eq!(EdgeClass::lookup("0101").unwrap(), EdgeClass(14));
        assert_eq!(EdgeClass::lookup("0110").unwrap(), EdgeClass(5));
        assert_eq!(EdgeClass::lookup("1010").unwrap(), EdgeClass(15));
    }

    #[test]
    fn unknown_string_is_invalid() {
        let err = EdgeClass::lookup("0201").unwrap_err();
        assert!(matches!(err, GraphError::InvalidConnectivity(ref s) if s == "0201"));
        assert!(EdgeClass::lookup("01").is_err());
    }

    #[test]
    fn display_follows_slot_order() {
        let code = ConnectivityCode([false, false, true, true]);
        assert_eq!(code.to_string(), "0011");
        assert_eq!(code.degree(), 2);
        assert_eq!(code.edge_class().unwrap(), EdgeClass(3));
    }

    #[test]
    fn class_maps_back_to_code() {
        let code_of = |class: EdgeClass| {
            EDGE_CLASS_TABLE
                .iter()
                .find(|&&(_, c)| c == class.0)
                .map(|&(key, _)| key)
        };
        for &(key, class) in &EDGE_CLASS_TABLE {
            assert_eq!(code_of(EdgeClass::lookup(key).unwrap()), Some(key));
            assert_eq!(EdgeClass::lookup(key).unwrap(), EdgeClass(class));
        }
        assert_eq!(code_of(EdgeClass(16)), None);
    }
}
