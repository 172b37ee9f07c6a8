use serde::{Deserialize, Deserializer, Serialize};

/// Key of a location record.
///
/// Ids travel through the URL fragment, so they are kept as the exact decimal
/// string that was loaded: `"007"` and `"7"` are different ids.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    pub fn new(id: impl Into<String>) -> Self {
        LocationId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the id is one or more ASCII digits, i.e. routable as `#/ar/<id>`.
    pub fn is_routable(&self) -> bool {
        !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit())
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for LocationId {
    fn from(n: u64) -> Self {
        LocationId(n.to_string())
    }
}

impl From<&str> for LocationId {
    fn from(s: &str) -> Self {
        LocationId(s.to_string())
    }
}

// Data files in the wild use both `"id": "3"` and `"id": 3`.
impl<'de> Deserialize<'de> for LocationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => LocationId(s),
            Raw::Number(n) => LocationId::from(n),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::LocationId;

    #[test]
    fn numeric_json_ids_become_decimal_strings() {
        let id: LocationId = serde_json::from_str("42").unwrap();
        assert_eq!(id, LocationId::new("42"));
        let id: LocationId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn leading_zeros_are_significant() {
        assert_ne!(LocationId::new("007"), LocationId::new("7"));
    }

    #[test]
    fn routable_ids_are_digits_only() {
        assert!(LocationId::new("12").is_routable());
        assert!(!LocationId::new("").is_routable());
        assert!(!LocationId::new("a1").is_routable());
        assert!(!LocationId::new("-1").is_routable());
    }
}
