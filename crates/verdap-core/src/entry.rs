//! Generic directory entry representation
//!
//! The engine builds entries from typed records; this is the name/values form
//! they take at the protocol boundary. Attribute names and insertion order
//! are a wire contract: external clients key lookups off the exact names.

/// One attribute: a name and an ordered sequence of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub values: Vec<String>,
}

/// A materialized directory entry.
///
/// A given attribute name appears at most once per entry; multi-valued
/// attributes carry their values in one `Attribute`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub dn: String,
    pub attributes: Vec<Attribute>,
}

impl Entry {
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: Vec::new(),
        }
    }

    /// Append an attribute, preserving insertion order.
    pub fn push_attr(&mut self, name: impl Into<String>, values: Vec<String>) {
        let name = name.into();
        debug_assert!(
            self.attr(&name).is_none(),
            "duplicate attribute name: {name}"
        );
        self.attributes.push(Attribute { name, values });
    }

    /// Look up an attribute by name, case-insensitively.
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// First value of the named attribute, if any.
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(|a| a.values.first()).map(String::as_str)
    }

    /// Project the entry onto the requested attribute names.
    ///
    /// An empty request means "all attributes". Requested names are matched
    /// case-insensitively; attribute order of the entry is preserved.
    pub fn project(&self, requested: &[String]) -> Entry {
        if requested.is_empty() {
            return self.clone();
        }
        Entry {
            dn: self.dn.clone(),
            attributes: self
                .attributes
                .iter()
                .filter(|a| requested.iter().any(|r| r.eq_ignore_ascii_case(&a.name)))
                .cloned()
                .collect(),
        }
    }
}
