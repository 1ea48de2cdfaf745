//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers the content API hands out. The API
//! emits ids as either JSON numbers or strings, so both deserialize into the
//! same string-backed type.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bytes left as-is in a path segment: the RFC 3986 unreserved set
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode an identifier as a single URL path segment
///
/// A `/` inside the identifier is encoded, so `2024/113` stays one segment.
pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Regulation document identifier
///
/// # Examples
///
/// ```
/// use regulus::domain::ids::DocumentId;
/// use std::str::FromStr;
///
/// let id = DocumentId::from_str("4821").unwrap();
/// assert_eq!(id.as_str(), "4821");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a new DocumentId, rejecting blank input
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err("Document ID cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the document ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = string_or_number(deserializer)?;
        DocumentId::new(raw).map_err(serde::de::Error::custom)
    }
}

/// URL slug of an institution, e.g. `ministry-of-finance`
///
/// Slugs are lowercased on construction so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstitutionSlug(String);

impl InstitutionSlug {
    /// Creates a new slug, rejecting blank input and embedded whitespace
    pub fn new(slug: impl Into<String>) -> Result<Self, String> {
        let slug = slug.into().trim().to_lowercase();
        if slug.is_empty() {
            return Err("Institution slug cannot be empty".to_string());
        }
        if slug.chars().any(char::is_whitespace) {
            return Err(format!("Institution slug cannot contain whitespace: '{slug}'"));
        }
        Ok(Self(slug))
    }

    /// Derives a slug from a display name
    ///
    /// Non-alphanumeric runs collapse to a single `-`.
    pub fn from_name(name: &str) -> Result<Self, String> {
        let mut slug = String::with_capacity(name.len());
        let mut pending_dash = false;
        for c in name.trim().chars().flat_map(char::to_lowercase) {
            if c.is_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(c);
            } else {
                pending_dash = true;
            }
        }
        Self::new(slug)
    }

    /// Returns the slug as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstitutionSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for InstitutionSlug {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for InstitutionSlug {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InstitutionSlug> for String {
    fn from(slug: InstitutionSlug) -> Self {
        slug.0
    }
}

impl AsRef<str> for InstitutionSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Accepts a JSON string or number and returns it as a String
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(i) => i.to_string(),
        Raw::Uint(u) => u.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path_segment() {
        assert_eq!(encode_path_segment("4821"), "4821");
        assert_eq!(encode_path_segment("central-bank"), "central-bank");
        assert_eq!(encode_path_segment("2024/113"), "2024%2F113");
        assert_eq!(encode_path_segment("a b"), "a%20b");
        assert_eq!(encode_path_segment("ç"), "%C3%A7");
        assert_eq!(encode_path_segment("v1.2_x~"), "v1.2_x~");
    }

    #[test]
    fn test_document_id_creation() {
        let id = DocumentId::new(" 77 ").unwrap();
        assert_eq!(id.as_str(), "77");
    }

    #[test]
    fn test_document_id_empty_fails() {
        assert!(DocumentId::new("").is_err());
        assert!(DocumentId::new("   ").is_err());
    }

    #[test]
    fn test_document_id_deserializes_from_number_and_string() {
        let from_num: DocumentId = serde_json::from_str("4821").unwrap();
        let from_str: DocumentId = serde_json::from_str("\"4821\"").unwrap();
        assert_eq!(from_num, from_str);
        assert!(serde_json::from_str::<DocumentId>("\"\"").is_err());
    }

    #[test]
    fn test_institution_slug_lowercases() {
        let slug = InstitutionSlug::new("Ministry-Of-Finance").unwrap();
        assert_eq!(slug.as_str(), "ministry-of-finance");
    }

    #[test]
    fn test_institution_slug_rejects_whitespace() {
        assert!(InstitutionSlug::new("central bank").is_err());
        assert!(InstitutionSlug::new("").is_err());
    }

    #[test]
    fn test_institution_slug_from_name() {
        let slug = InstitutionSlug::from_name("  Energy Market Regulatory Authority (EMRA) ").unwrap();
        assert_eq!(slug.as_str(), "energy-market-regulatory-authority-emra");
    }

    #[test]
    fn test_institution_slug_serde() {
        let slug: InstitutionSlug = serde_json::from_str("\"Capital-Markets\"").unwrap();
        assert_eq!(slug.as_str(), "capital-markets");
        assert_eq!(serde_json::to_string(&slug).unwrap(), "\"capital-markets\"");
    }
}
