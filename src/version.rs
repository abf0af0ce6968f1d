//! Dotted-integer version strings.
//!
//! Release tags and `application.ini` versions are sequences of dot-separated
//! non-negative integers ("144.0.2"). Ordering is numeric per component with
//! the shorter sequence zero-padded, so "9.0" < "10.0" and "1.2" == "1.2.0".
//! Plain string comparison would invert the first of those and must not be
//! used anywhere in the pipeline.

use std::cmp::Ordering;
use std::fmt;

/// A parsed dotted-integer version.
#[derive(Debug, Clone)]
pub struct Version {
    components: Vec<u64>,
}

impl Version {
    /// Parse a version string. Returns `None` unless every dot-separated
    /// component is a non-empty run of ASCII digits.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        let mut components = Vec::new();
        for part in s.split('.') {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            components.push(part.parse().ok()?);
        }
        Some(Self { components })
    }

    /// Numeric components, as parsed.
    pub fn components(&self) -> &[u64] {
        &self.components
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality must agree with `Ord`: trailing zero components are not
// significant, so it cannot be derived from the component vector.
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}
