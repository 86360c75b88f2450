use std::fmt::{self, Display, Formatter};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const SKIP_KEYWORD: &str = "skip";

/// The outcome of one pending selection request.
///
/// On the wire a decision is either the chosen candidate index or the
/// string `"skip"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// The candidate at this index is the correct title.
    Chosen(usize),
    /// Proceed with generic names and no title metadata.
    Skip,
}

impl Decision {
    pub fn chosen_index(&self) -> Option<usize> {
        match self {
            Decision::Chosen(index) => Some(*index),
            Decision::Skip => None,
        }
    }

    /// Whether a failed submission of this decision keeps the flow open.
    ///
    /// Explicit picks fail closed so the user's intent is never dropped
    /// silently; skips fail open so an unattended disc never re-blocks.
    pub fn fails_closed(&self) -> bool {
        matches!(self, Decision::Chosen(_))
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Chosen(index) => write!(f, "chosen #{index}"),
            Decision::Skip => f.write_str(SKIP_KEYWORD),
        }
    }
}

impl Serialize for Decision {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Decision::Chosen(index) => serializer.serialize_u64(*index as u64),
            Decision::Skip => serializer.serialize_str(SKIP_KEYWORD),
        }
    }
}

struct DecisionVisitor;

impl Visitor<'_> for DecisionVisitor {
    type Value = Decision;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "a candidate index or \"{SKIP_KEYWORD}\"")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decision, E> {
        usize::try_from(v)
            .map(Decision::Chosen)
            .map_err(|_| E::custom("candidate index too large"))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decision, E> {
        usize::try_from(v)
            .map(Decision::Chosen)
            .map_err(|_| E::custom("candidate index must not be negative"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Decision, E> {
        if v.eq_ignore_ascii_case(SKIP_KEYWORD) {
            Ok(Decision::Skip)
        } else {
            Err(E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}

impl<'de> Deserialize<'de> for Decision {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DecisionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_index_and_skip() {
        assert_eq!(
            serde_json::from_str::<Decision>("2").unwrap(),
            Decision::Chosen(2)
        );
        assert_eq!(
            serde_json::from_str::<Decision>("\"skip\"").unwrap(),
            Decision::Skip
        );
    }

    #[test]
    fn rejects_negative_and_unknown_keywords() {
        assert!(serde_json::from_str::<Decision>("-1").is_err());
        assert!(serde_json::from_str::<Decision>("\"first\"").is_err());
    }

    #[test]
    fn only_explicit_choices_fail_closed() {
        assert!(Decision::Chosen(0).fails_closed());
        assert!(!Decision::Skip.fails_closed());
    }
}
