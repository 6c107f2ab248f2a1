use compact_str::{format_compact, CompactString};
use std::fmt;

/// Cache key shared by both tiers: the lowercased,
/// trailing-dot-normalized owner name, `:`, and the type mnemonic.
///
/// Case-insensitive on the owner name, exact on the type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey(CompactString);

impl CacheKey {
    pub fn new(name: &str, record_type: &str) -> Self {
        let name = name.to_ascii_lowercase();
        if name.ends_with('.') {
            Self(format_compact!("{}:{}", name, record_type))
        } else {
            Self(format_compact!("{}.:{}", name, record_type))
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_format() {
        assert_eq!(CacheKey::new("google.com.", "A").as_str(), "google.com.:A");
    }

    #[test]
    fn appends_trailing_dot() {
        assert_eq!(CacheKey::new("google.com", "A").as_str(), "google.com.:A");
    }

    #[test]
    fn owner_name_is_case_insensitive() {
        assert_eq!(
            CacheKey::new("GOOGLE.Com.", "A"),
            CacheKey::new("google.com.", "A")
        );
    }

    #[test]
    fn type_mnemonic_is_exact() {
        assert_ne!(
            CacheKey::new("google.com.", "A"),
            CacheKey::new("google.com.", "AAAA")
        );
    }
}
