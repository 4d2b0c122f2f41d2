//! Signature parsing.
//!
//! Turns one candidate such as
//! `ext_def(int32) swe_calc(double tjd, int ipl, int32 iflag, double *xx, char *serr);`
//! into a `FunctionDescriptor`. Any parameter that fails to parse rejects the
//! whole candidate; partial descriptors are never produced.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{MalformedSignature, Result};
use crate::types::{map_type, MappedType};

lazy_static! {
    static ref ARRAY_SUFFIX_RE: Regex = Regex::new(r"\s*\[[^\]]*\]").unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════════
// DESCRIPTORS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    pub name: String,
    /// Base C type with pointer markers removed.
    pub c_type: String,
    pub is_pointer: bool,
    pub mapped_type: MappedType,
}

impl ParameterDescriptor {
    /// C type as written in docs, e.g. `double*`.
    pub fn display_c_type(&self) -> String {
        display_c_type(&self.c_type, self.is_pointer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDescriptor {
    pub name: String,
    pub return_c_type: String,
    pub return_is_pointer: bool,
    pub return_mapped_type: MappedType,
    pub parameters: Vec<ParameterDescriptor>,
}

impl FunctionDescriptor {
    pub fn display_return_c_type(&self) -> String {
        display_c_type(&self.return_c_type, self.return_is_pointer)
    }
}

fn display_c_type(c_type: &str, is_pointer: bool) -> String {
    if is_pointer {
        format!("{}*", c_type)
    } else {
        c_type.to_string()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PARSER
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct SignatureParser {
    shape_re: Regex,
}

impl SignatureParser {
    pub fn new(wrapper_macro: &str) -> Result<Self> {
        // 1 = raw return type, 2 = function name, 3 = argument list
        let shape_re = Regex::new(&format!(
            r"^{}\s*\(([\w\s*]+?)\)\s*(\w+)\s*\(([^()]*)\)\s*;?$",
            regex::escape(wrapper_macro)
        ))?;
        Ok(Self { shape_re })
    }

    pub fn parse(&self, candidate: &str) -> std::result::Result<FunctionDescriptor, MalformedSignature> {
        let caps = self
            .shape_re
            .captures(candidate.trim())
            .ok_or(MalformedSignature::Shape)?;

        let return_raw = &caps[1];
        let name = caps[2].to_string();
        let arg_list = caps[3].trim();

        let return_is_pointer = return_raw.contains('*');
        let return_c_type = strip_pointer_markers(return_raw);

        let parameters = if arg_list.eq_ignore_ascii_case("void") {
            Vec::new()
        } else {
            arg_list
                .split(',')
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .map(parse_parameter)
                .collect::<std::result::Result<Vec<_>, _>>()?
        };

        Ok(FunctionDescriptor {
            name,
            return_mapped_type: map_type(&return_c_type, return_is_pointer),
            return_c_type,
            return_is_pointer,
            parameters,
        })
    }
}

/// Parse one `type name` piece of an argument list.
///
/// The last whitespace-separated token is the name, everything before it is
/// the type. Array suffixes (`xx[6]`, `xx [6]`) are dropped from the name and
/// the parameter is treated as a pointer.
pub fn parse_parameter(piece: &str) -> std::result::Result<ParameterDescriptor, MalformedSignature> {
    let malformed = || MalformedSignature::Parameter(piece.trim().to_string());

    // `xx[6]`, `xx [6]` and `xx[ 6 ]` all leave `xx` as the last token.
    let is_array = ARRAY_SUFFIX_RE.is_match(piece);
    let declarator = ARRAY_SUFFIX_RE.replace_all(piece, "");

    let tokens: Vec<&str> = declarator.split_whitespace().collect();
    let Some((last, type_tokens)) = tokens.split_last() else {
        return Err(malformed());
    };
    if type_tokens.is_empty() {
        return Err(malformed());
    }

    let name = last.replace('*', "");
    let c_type = strip_pointer_markers(&type_tokens.join(" "));
    if !is_identifier(&name) || c_type.is_empty() {
        return Err(malformed());
    }

    let is_pointer = piece.contains('*') || is_array;
    Ok(ParameterDescriptor {
        mapped_type: map_type(&c_type, is_pointer),
        name,
        c_type,
        is_pointer,
    })
}

/// Remove every `*` and normalise the remaining words to single spaces.
fn strip_pointer_markers(raw: &str) -> String {
    raw.replace('*', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> SignatureParser {
        SignatureParser::new("ext_def").unwrap()
    }

    #[test]
    fn test_void_argument_list() {
        let f = parser().parse("ext_def( void ) swe_close(void);").unwrap();
        assert_eq!(f.name, "swe_close");
        assert!(f.parameters.is_empty());
        assert_eq!(f.return_c_type, "void");
        assert!(!f.return_is_pointer);
        assert_eq!(f.return_mapped_type, MappedType::Void);

        let f = parser().parse("ext_def(int) swe_f(VOID);").unwrap();
        assert!(f.parameters.is_empty());
        assert_eq!(f.return_mapped_type, MappedType::Numeric);
    }

    #[test]
    fn test_empty_argument_list() {
        let f = parser().parse("ext_def(double) swe_g();").unwrap();
        assert!(f.parameters.is_empty());
    }

    #[test]
    fn test_deg_midp() {
        let f = parser()
            .parse("ext_def(double) swe_deg_midp(double x1, double x0);")
            .unwrap();
        assert_eq!(f.name, "swe_deg_midp");
        assert_eq!(f.return_mapped_type, MappedType::Numeric);
        let names: Vec<_> = f.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["x1", "x0"]);
        assert!(f
            .parameters
            .iter()
            .all(|p| p.mapped_type == MappedType::Numeric && !p.is_pointer));
    }

    #[test]
    fn test_pointer_return_types() {
        let f = parser().parse("ext_def(char *) swe_version(char *s);").unwrap();
        assert!(f.return_is_pointer);
        assert_eq!(f.return_c_type, "char");
        assert_eq!(f.return_mapped_type, MappedType::Numeric);
        assert_eq!(f.display_return_c_type(), "char*");

        let f = parser().parse("ext_def(void *) swe_alloc(int n);").unwrap();
        assert!(f.return_is_pointer);
        assert_eq!(f.return_mapped_type, MappedType::Numeric);

        let f = parser().parse("ext_def(struct_t **) swe_h(int n);").unwrap();
        assert!(f.return_is_pointer);
        assert_eq!(f.return_c_type, "struct_t");
        assert_eq!(f.return_mapped_type, MappedType::Numeric);
    }

    #[test]
    fn test_pointer_parameters() {
        let f = parser()
            .parse("ext_def(int32) swe_calc(double tjd, int ipl, int32 iflag, double *xx, char *serr);")
            .unwrap();
        assert_eq!(f.parameters.len(), 5);
        let xx = &f.parameters[3];
        assert_eq!(xx.name, "xx");
        assert_eq!(xx.c_type, "double");
        assert!(xx.is_pointer);
        assert_eq!(xx.display_c_type(), "double*");

        let p = parse_parameter("double * * tab").unwrap();
        assert_eq!(p.name, "tab");
        assert_eq!(p.c_type, "double");
        assert!(p.is_pointer);

        let p = parse_parameter("void **handle").unwrap();
        assert_eq!(p.mapped_type, MappedType::Numeric);
    }

    #[test]
    fn test_multiword_and_unknown_types() {
        let p = parse_parameter("unsigned int flags").unwrap();
        assert_eq!(p.c_type, "unsigned int");
        assert_eq!(p.mapped_type, MappedType::Unknown);

        let p = parse_parameter("FILE_HANDLE h").unwrap();
        assert_eq!(p.mapped_type, MappedType::Unknown);
    }

    #[test]
    fn test_array_parameter() {
        for (piece, name) in [
            ("double xx[6]", "xx"),
            ("double xx [6]", "xx"),
            ("double  xx[ 6 ]", "xx"),
            ("int32 m[2][3]", "m"),
        ] {
            let p = parse_parameter(piece).unwrap();
            assert_eq!(p.name, name);
            assert!(p.is_pointer, "{}", piece);
            assert_eq!(p.mapped_type, MappedType::Numeric);
        }
        let p = parse_parameter("double xx [6]").unwrap();
        assert_eq!(p.name, "xx");
        assert_eq!(p.c_type, "double");

        let f = parser()
            .parse("ext_def(int32) swe_houses(double tjd, double cusps [13], double ascmc[10]);")
            .unwrap();
        let names: Vec<_> = f.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["tjd", "cusps", "ascmc"]);

        // A bare type with an array suffix still has no name.
        assert!(parse_parameter("double [6]").is_err());
    }

    #[test]
    fn test_missing_parameter_name_rejects_signature() {
        assert_eq!(
            parse_parameter("int"),
            Err(MalformedSignature::Parameter("int".to_string()))
        );
        assert!(parse_parameter("char *").is_err());
        assert!(parse_parameter("* x").is_err());

        let err = parser().parse("ext_def(int) f(int a, double);").unwrap_err();
        assert_eq!(err, MalformedSignature::Parameter("double".to_string()));
    }

    #[test]
    fn test_shape_mismatch() {
        let p = parser();
        assert_eq!(p.parse("ext_def(int) broken(;"), Err(MalformedSignature::Shape));
        assert_eq!(p.parse("bogus_wrapper(int) f(void);"), Err(MalformedSignature::Shape));
        assert_eq!(p.parse("ext_def(int) (void);"), Err(MalformedSignature::Shape));
        assert_eq!(
            p.parse("ext_def(int) f(int (*cb)(int));"),
            Err(MalformedSignature::Shape)
        );
    }
}
