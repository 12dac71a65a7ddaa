use std::fmt;

/// Identity of the caller that issued a request.
///
/// The value is opaque. It is recorded on new records but never
/// used for authorization decisions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Principal(String);

impl Principal {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Principal {
    fn from(from: String) -> Self {
        Self(from)
    }
}

impl From<&str> for Principal {
    fn from(from: &str) -> Self {
        Self(from.to_owned())
    }
}

impl From<Principal> for String {
    fn from(from: Principal) -> Self {
        from.0
    }
}

impl AsRef<str> for Principal {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
