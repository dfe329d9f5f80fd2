//! Distinguished-name model
//!
//! DNs compare case-insensitively; original casing is preserved for display.
//! Parsing is total: any comma-separated input yields a sequence of RDNs.
//! The only recognized escape is `\,` for a literal comma in a value.

/// One `attribute=value` component of a DN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rdn {
    pub attribute: String,
    pub value: String,
}

/// Split a DN into RDNs on unescaped commas.
///
/// A component without `=` becomes an RDN with an empty attribute name; the
/// caller decides whether that shape is acceptable.
pub fn parse_dn(dn: &str) -> Vec<Rdn> {
    split_components(dn)
        .into_iter()
        .map(|part| match part.split_once('=') {
            Some((attribute, value)) => Rdn {
                attribute: attribute.trim().to_string(),
                value: value.to_string(),
            },
            None => Rdn {
                attribute: String::new(),
                value: part,
            },
        })
        .collect()
}

/// Split on commas, honoring `\,` as a literal comma.
pub fn split_components(dn: &str) -> Vec<String> {
    let mut components = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    for c in dn.chars() {
        match c {
            '\\' if !escaped => escaped = true,
            ',' if !escaped => {
                components.push(std::mem::take(&mut current));
            }
            _ => {
                if escaped && c != ',' {
                    current.push('\\');
                }
                current.push(c);
                escaped = false;
            }
        }
    }
    if escaped {
        current.push('\\');
    }
    components.push(current);
    components
}

/// Lowercased form of a DN, for comparison only.
pub fn normalize_dn(dn: &str) -> String {
    dn.to_ascii_lowercase()
}

/// Whether `dn` lives at or under `base`, compared case-insensitively on an
/// RDN boundary.
pub fn dn_has_suffix(dn: &str, base: &str) -> bool {
    if dn.eq_ignore_ascii_case(base) {
        return true;
    }
    strip_base(dn, base).is_some()
}

/// Strip `,<base>` from the end of `dn`, case-insensitively.
///
/// Returns the local part with its original casing, or `None` when `dn` is
/// not strictly below `base`.
pub fn strip_base<'a>(dn: &'a str, base: &str) -> Option<&'a str> {
    if base.is_empty() || dn.len() <= base.len() + 1 {
        return None;
    }
    let split = dn.len() - base.len();
    if !dn.is_char_boundary(split) {
        return None;
    }
    let (head, suffix) = dn.split_at(split);
    if !suffix.eq_ignore_ascii_case(base) {
        return None;
    }
    let local = head.strip_suffix(',')?;
    if local.is_empty() {
        None
    } else {
        Some(local)
    }
}

/// Number of RDNs `dn` has below `base`: `Some(0)` when equal, `Some(n)` when
/// `n` components deeper, `None` when `dn` is outside `base`.
pub fn depth_below(dn: &str, base: &str) -> Option<usize> {
    if dn.eq_ignore_ascii_case(base) {
        return Some(0);
    }
    strip_base(dn, base).map(|local| split_components(local).len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_dn() {
        let rdns = parse_dn("cn=alice,ou=staff,dc=hack,dc=me");
        assert_eq!(rdns.len(), 4);
        assert_eq!(rdns[0].attribute, "cn");
        assert_eq!(rdns[0].value, "alice");
        assert_eq!(rdns[1].attribute, "ou");
        assert_eq!(rdns[1].value, "staff");
    }

    #[test]
    fn parser_is_total_on_odd_input() {
        let rdns = parse_dn("no-equals-here");
        assert_eq!(rdns.len(), 1);
        assert_eq!(rdns[0].attribute, "");
        assert_eq!(rdns[0].value, "no-equals-here");
    }

    #[test]
    fn escaped_comma_stays_in_value() {
        let rdns = parse_dn("cn=doe\\, jane,ou=staff");
        assert_eq!(rdns.len(), 2);
        assert_eq!(rdns[0].value, "doe, jane");
    }

    #[test]
    fn suffix_test_ignores_case() {
        assert!(dn_has_suffix("cn=Alice,ou=staff,DC=HACK,dc=me", "dc=hack,dc=me"));
        assert!(dn_has_suffix("dc=hack,dc=me", "dc=hack,dc=me"));
        assert!(!dn_has_suffix("cn=alice,dc=hack,dc=org", "dc=hack,dc=me"));
    }

    #[test]
    fn suffix_test_respects_rdn_boundary() {
        // "xdc=hack,dc=me" must not count as living under the base
        assert!(!dn_has_suffix("cn=a,xdc=hack,dc=me", "dc=hack,dc=me"));
    }

    #[test]
    fn strip_base_preserves_local_casing() {
        let local = strip_base("cn=Alice,ou=Staff,dc=HACK,dc=me", "dc=hack,dc=me");
        assert_eq!(local, Some("cn=Alice,ou=Staff"));
        assert_eq!(strip_base("dc=hack,dc=me", "dc=hack,dc=me"), None);
        assert_eq!(strip_base("cn=a,dc=other", "dc=hack,dc=me"), None);
    }

    #[test]
    fn depth_counts_rdns_below_base() {
        let base = "dc=hack,dc=me";
        assert_eq!(depth_below("dc=hack,dc=me", base), Some(0));
        assert_eq!(depth_below("ou=groups,dc=hack,dc=me", base), Some(1));
        assert_eq!(depth_below("cn=staff,ou=groups,dc=hack,dc=me", base), Some(2));
        assert_eq!(depth_below("cn=staff,dc=elsewhere", base), None);
    }
}
