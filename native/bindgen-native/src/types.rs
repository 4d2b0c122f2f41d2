//! C type mapping.
//!
//! Translates C type names found in the header to the category the
//! JavaScript side sees across the wasm boundary.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappedType {
    Numeric,
    Void,
    Unknown,
}

impl MappedType {
    /// Name of the type in the generated declaration document.
    pub fn ts_name(self) -> &'static str {
        match self {
            MappedType::Numeric => "number",
            MappedType::Void => "void",
            MappedType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MappedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ts_name())
    }
}

lazy_static! {
    /// Primitive C types and the typedefs declared by swephexp.h / sweodef.h.
    static ref C_TYPE_TABLE: HashMap<&'static str, MappedType> = {
        let mut m = HashMap::new();
        for name in [
            "int", "short", "long", "float", "double", "char", "unsigned",
            // Typedefs from the ephemeris headers
            "int32", "int64", "int16", "uint32", "UINT4", "INT4", "REAL8", "UINT2",
            "AS_BOOL", "CSEC", "centisec",
        ] {
            m.insert(name, MappedType::Numeric);
        }
        m.insert("void", MappedType::Void);
        m
    };
}

/// Map a bare C type name. Unrecognised names degrade to `Unknown`.
pub fn map_c_type(c_type: &str) -> MappedType {
    C_TYPE_TABLE
        .get(c_type.trim())
        .copied()
        .unwrap_or(MappedType::Unknown)
}

/// Map a C type that may be a pointer.
///
/// A pointer of any depth is a linear-memory address, so it is `Numeric`
/// whatever the base type is. The table is only consulted for non-pointers.
pub fn map_type(c_type: &str, is_pointer: bool) -> MappedType {
    if is_pointer {
        return MappedType::Numeric;
    }
    map_c_type(c_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_and_typedefs() {
        assert_eq!(map_c_type("double"), MappedType::Numeric);
        assert_eq!(map_c_type("int32"), MappedType::Numeric);
        assert_eq!(map_c_type("AS_BOOL"), MappedType::Numeric);
        assert_eq!(map_c_type("centisec"), MappedType::Numeric);
        assert_eq!(map_c_type("void"), MappedType::Void);
    }

    #[test]
    fn test_unknown_never_fails() {
        assert_eq!(map_c_type("struct foo"), MappedType::Unknown);
        assert_eq!(map_c_type(""), MappedType::Unknown);
        assert_eq!(map_c_type("unsigned char"), MappedType::Unknown);
    }

    #[test]
    fn test_pointer_overrides_table() {
        assert_eq!(map_type("void", true), MappedType::Numeric);
        assert_eq!(map_type("struct foo", true), MappedType::Numeric);
        assert_eq!(map_type("char", false), MappedType::Numeric);
        assert_eq!(map_type("void", false), MappedType::Void);
    }

    #[test]
    fn test_ts_names() {
        assert_eq!(MappedType::Numeric.to_string(), "number");
        assert_eq!(MappedType::Void.ts_name(), "void");
        assert_eq!(MappedType::Unknown.ts_name(), "unknown");
    }
}
