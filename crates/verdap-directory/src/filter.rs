//! Search filter grammar and evaluation
//!
//! An RFC 4515 subset: equality, presence, substring, AND/OR/NOT. Assertion
//! values may carry `\NN` hex escapes; parentheses, the asterisk and the
//! backslash itself must be written that way. Matching is caseIgnore on both
//! attribute names and values.

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while, take_while1};
use nom::combinator::{map, map_res};
use nom::multi::many0;
use nom::sequence::{delimited, preceded};
use nom::IResult;
use verdap_core::{Entry, Error, Result};

/// A parsed filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
    Equality(String, String),
    Present(String),
    Substring {
        attr: String,
        initial: Option<String>,
        any: Vec<String>,
        last: Option<String>,
    },
}

impl Filter {
    /// Parse a filter string. The whole input must be consumed.
    pub fn parse(input: &str) -> Result<Filter> {
        match filtexpr(input.as_bytes()) {
            Ok((rest, f)) if rest.is_empty() => Ok(f),
            _ => Err(Error::MalformedFilter(input.to_string())),
        }
    }

    /// Evaluate the filter against one entry.
    pub fn matches(&self, entry: &Entry) -> bool {
        match self {
            Filter::And(inner) => inner.iter().all(|f| f.matches(entry)),
            Filter::Or(inner) => inner.iter().any(|f| f.matches(entry)),
            Filter::Not(inner) => !inner.matches(entry),
            Filter::Present(attr) => entry.attr(attr).is_some(),
            Filter::Equality(attr, value) => entry
                .attr(attr)
                .is_some_and(|a| a.values.iter().any(|v| v.eq_ignore_ascii_case(value))),
            Filter::Substring {
                attr,
                initial,
                any,
                last,
            } => entry
                .attr(attr)
                .is_some_and(|a| {
                    a.values
                        .iter()
                        .any(|v| substring_match(v, initial.as_deref(), any, last.as_deref()))
                }),
        }
    }
}

/// Escape an assertion value for safe inclusion in a filter string.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        match b {
            b'(' | b')' | b'*' | b'\\' | 0 => out.push_str(&format!("\\{b:02x}")),
            _ => out.push(b as char),
        }
    }
    out
}

fn substring_match(value: &str, initial: Option<&str>, any: &[String], last: Option<&str>) -> bool {
    let value = value.to_ascii_lowercase();
    let mut pos = 0;

    if let Some(initial) = initial {
        let initial = initial.to_ascii_lowercase();
        if !value.starts_with(&initial) {
            return false;
        }
        pos = initial.len();
    }
    for part in any {
        let part = part.to_ascii_lowercase();
        match value[pos..].find(&part) {
            Some(idx) => pos += idx + part.len(),
            None => return false,
        }
    }
    match last {
        Some(last) => {
            let last = last.to_ascii_lowercase();
            value.len() >= pos + last.len() && value.ends_with(&last)
        }
        None => true,
    }
}

fn filtexpr(i: &[u8]) -> IResult<&[u8], Filter> {
    alt((filter, item))(i)
}

fn filter(i: &[u8]) -> IResult<&[u8], Filter> {
    delimited(tag(b"("), filtercomp, tag(b")"))(i)
}

fn filtercomp(i: &[u8]) -> IResult<&[u8], Filter> {
    alt((and, or, not, item))(i)
}

fn filterlist(i: &[u8]) -> IResult<&[u8], Vec<Filter>> {
    many0(filter)(i)
}

fn and(i: &[u8]) -> IResult<&[u8], Filter> {
    map(preceded(tag(b"&"), filterlist), Filter::And)(i)
}

fn or(i: &[u8]) -> IResult<&[u8], Filter> {
    map(preceded(tag(b"|"), filterlist), Filter::Or)(i)
}

fn not(i: &[u8]) -> IResult<&[u8], Filter> {
    map(preceded(tag(b"!"), filter), |f| Filter::Not(Box::new(f)))(i)
}

/// `attr=value`, which classifies as equality, presence (`attr=*`) or a
/// substring pattern depending on where the asterisks sit.
fn item(i: &[u8]) -> IResult<&[u8], Filter> {
    let (i, attr) = attribute_description(i)?;
    let (i, _) = tag(b"=")(i)?;
    let (i, initial) = assertion_value(i)?;
    let (i, tail) = assertion_parts(i)?;

    let filter = if tail.is_empty() {
        Filter::Equality(attr, initial)
    } else if initial.is_empty() && tail.len() == 1 && tail[0].is_empty() {
        Filter::Present(attr)
    } else {
        let mut any: Vec<String> = tail;
        let last = any.pop().filter(|s| !s.is_empty());
        Filter::Substring {
            attr,
            initial: Some(initial).filter(|s| !s.is_empty()),
            any,
            last,
        }
    };
    Ok((i, filter))
}

/// Asterisk-separated assertion parts after the initial one. An empty part is
/// only legal in final position (`a=f**` is malformed, `a=f*` is not).
fn assertion_parts(i: &[u8]) -> IResult<&[u8], Vec<String>> {
    map_res(
        many0(preceded(tag(b"*"), assertion_value)),
        |parts: Vec<String>| -> std::result::Result<Vec<String>, ()> {
            let runt = parts
                .iter()
                .enumerate()
                .any(|(n, p)| p.is_empty() && n + 1 != parts.len());
            if runt {
                Err(())
            } else {
                Ok(parts)
            }
        },
    )(i)
}

fn assertion_value(i: &[u8]) -> IResult<&[u8], String> {
    map_res(take_while(is_value_byte), unescape_value)(i)
}

fn is_value_byte(b: u8) -> bool {
    b != 0 && b != b'(' && b != b')' && b != b'*'
}

/// Resolve `\NN` hex escapes. A backslash not followed by two hex digits is
/// malformed.
fn unescape_value(raw: &[u8]) -> std::result::Result<String, ()> {
    let mut out = Vec::with_capacity(raw.len());
    let mut idx = 0;
    while idx < raw.len() {
        if raw[idx] == b'\\' {
            if idx + 3 > raw.len() {
                return Err(());
            }
            let hi = hex_digit(raw[idx + 1]).ok_or(())?;
            let lo = hex_digit(raw[idx + 2]).ok_or(())?;
            out.push((hi << 4) | lo);
            idx += 3;
        } else {
            out.push(raw[idx]);
            idx += 1;
        }
    }
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn attribute_description(i: &[u8]) -> IResult<&[u8], String> {
    map_res(take_while1(is_attr_byte), |bytes: &[u8]| {
        std::str::from_utf8(bytes).map(str::to_string)
    })(i)
}

fn is_attr_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'.' || b == b';'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> Entry {
        let mut e = Entry::new("cn=alice,ou=staff,dc=hack,dc=me");
        e.push_attr("cn", vec!["alice".into()]);
        e.push_attr("uid", vec!["alice".into()]);
        e.push_attr("objectClass", vec!["posixAccount".into()]);
        e.push_attr("memberOf", vec![
            "cn=admins,ou=groups,dc=hack,dc=me".into(),
            "cn=gardeners,ou=groups,dc=hack,dc=me".into(),
        ]);
        e
    }

    #[test]
    fn parses_bare_item() {
        assert_eq!(
            Filter::parse("a=v").unwrap(),
            Filter::Equality("a".into(), "v".into())
        );
    }

    #[test]
    fn parses_simple_equality() {
        assert_eq!(
            Filter::parse("(cn=alice)").unwrap(),
            Filter::Equality("cn".into(), "alice".into())
        );
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(Filter::parse("(a=v)garbage").is_err());
    }

    #[test]
    fn parses_presence() {
        assert_eq!(Filter::parse("(cn=*)").unwrap(), Filter::Present("cn".into()));
    }

    #[test]
    fn parses_substring_shapes() {
        assert_eq!(
            Filter::parse("(cn=al*)").unwrap(),
            Filter::Substring {
                attr: "cn".into(),
                initial: Some("al".into()),
                any: vec![],
                last: None,
            }
        );
        assert_eq!(
            Filter::parse("(cn=*ce)").unwrap(),
            Filter::Substring {
                attr: "cn".into(),
                initial: None,
                any: vec![],
                last: Some("ce".into()),
            }
        );
        assert_eq!(
            Filter::parse("(cn=a*i*e)").unwrap(),
            Filter::Substring {
                attr: "cn".into(),
                initial: Some("a".into()),
                any: vec!["i".into()],
                last: Some("e".into()),
            }
        );
    }

    #[test]
    fn rejects_double_asterisk() {
        assert!(Filter::parse("(a=f**)").is_err());
    }

    #[test]
    fn parses_boolean_composition() {
        let f = Filter::parse("(&(objectClass=posixAccount)(!(uid=bob)))").unwrap();
        assert!(matches!(f, Filter::And(ref inner) if inner.len() == 2));
    }

    #[test]
    fn absolute_true_and_false() {
        let e = entry();
        assert!(Filter::parse("(&)").unwrap().matches(&e));
        assert!(!Filter::parse("(|)").unwrap().matches(&e));
    }

    #[test]
    fn hex_escapes_unescape() {
        assert_eq!(
            Filter::parse("(cn=a\\2ab)").unwrap(),
            Filter::Equality("cn".into(), "a*b".into())
        );
        assert!(Filter::parse("(cn=a\\2)").is_err());
        assert!(Filter::parse("(cn=a\\0x)").is_err());
    }

    #[test]
    fn equality_matching_ignores_case() {
        let e = entry();
        assert!(Filter::parse("(objectclass=POSIXACCOUNT)").unwrap().matches(&e));
        assert!(!Filter::parse("(objectClass=posixGroup)").unwrap().matches(&e));
    }

    #[test]
    fn substring_matching_walks_parts_in_order() {
        let e = entry();
        assert!(Filter::parse("(cn=a*ce)").unwrap().matches(&e));
        assert!(Filter::parse("(cn=*lic*)").unwrap().matches(&e));
        assert!(!Filter::parse("(cn=e*a)").unwrap().matches(&e));
    }

    #[test]
    fn multi_valued_attributes_match_any_value() {
        let e = entry();
        assert!(Filter::parse("(memberOf=cn=gardeners,ou=groups,dc=hack,dc=me)")
            .unwrap()
            .matches(&e));
    }

    #[test]
    fn boolean_evaluation() {
        let e = entry();
        assert!(Filter::parse("(&(uid=alice)(objectClass=posixAccount))")
            .unwrap()
            .matches(&e));
        assert!(Filter::parse("(|(uid=bob)(uid=alice))").unwrap().matches(&e));
        assert!(!Filter::parse("(!(uid=alice))").unwrap().matches(&e));
    }

    #[test]
    fn escape_value_round_trips_through_the_parser() {
        let hostile = "x*(y)\\z";
        let filter = format!("(cn={})", escape_value(hostile));
        assert_eq!(
            Filter::parse(&filter).unwrap(),
            Filter::Equality("cn".into(), hostile.into())
        );
    }
}
