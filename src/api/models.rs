use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

use crate::error::Result;
use crate::keywords::KeywordPair;

/// Reply sent when the lookup produced nothing.
pub const NULL_REPLY: &str = "NULL";

/// Accepted wire shapes: a named object, or the positional
/// `[item_name, average_rating, review_count, ...]` array.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawExchangeRequest {
    Named {
        item_name: String,
        average_rating: Number,
        review_count: Number,
    },
    Positional(PositionalRequest),
}

/// The first three array elements; anything after them is ignored.
struct PositionalRequest(String, Number, Number);

impl<'de> Deserialize<'de> for PositionalRequest {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(PositionalVisitor)
    }
}

struct PositionalVisitor;

impl<'de> Visitor<'de> for PositionalVisitor {
    type Value = PositionalRequest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array [item_name, average_rating, review_count, ...]")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let item_name = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let average_rating = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        let review_count = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(2, &self))?;
        while seq.next_element::<IgnoredAny>()?.is_some() {}

        Ok(PositionalRequest(item_name, average_rating, review_count))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "RawExchangeRequest")]
pub struct ExchangeRequest {
    pub item_name: String,
    pub average_rating: Number,
    pub review_count: Number,
}

impl From<RawExchangeRequest> for ExchangeRequest {
    fn from(raw: RawExchangeRequest) -> Self {
        match raw {
            RawExchangeRequest::Named { item_name, average_rating, review_count }
            | RawExchangeRequest::Positional(PositionalRequest(item_name, average_rating, review_count)) => Self {
                item_name,
                average_rating,
                review_count,
            },
        }
    }
}

impl ExchangeRequest {
    pub fn keywords(&self) -> Result<KeywordPair> {
        KeywordPair::from_item_name(&self.item_name)
    }

    /// The looked-up text followed by the review sentence.
    pub fn compose_reply(&self, keywords: &KeywordPair, text: &str) -> String {
        format!(
            "{}\n\nThe {} received {} reviews on Amazon with an average {} rating.",
            text, keywords.primary, self.review_count, self.average_rating
        )
    }
}

/// What the single served exchange produced.
#[derive(Debug, Clone)]
pub struct ExchangeOutcome {
    pub request: ExchangeRequest,
    pub keywords: KeywordPair,
    pub text: Option<String>,
    pub reply: String,
    pub received_at: DateTime<Utc>,
}

impl ExchangeOutcome {
    pub fn found(&self) -> bool {
        self.text.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positional_array() {
        let req: ExchangeRequest = serde_json::from_str(r#"["Widget gadget", 4.5, 120]"#).unwrap();
        assert_eq!(req.item_name, "Widget gadget");
        assert_eq!(req.average_rating.to_string(), "4.5");
        assert_eq!(req.review_count.to_string(), "120");
    }

    #[test]
    fn accepts_named_fields() {
        let req: ExchangeRequest = serde_json::from_str(
            r#"{"item_name": "Widget gadget", "average_rating": 4.5, "review_count": 120}"#,
        )
        .unwrap();
        assert_eq!(req.keywords().unwrap(), KeywordPair::new("Widget", "gadget"));
    }

    #[test]
    fn ignores_trailing_positional_elements() {
        let req: ExchangeRequest =
            serde_json::from_str(r#"["Widget gadget", 4.5, 120, "sku-1", null]"#).unwrap();
        assert_eq!(req.item_name, "Widget gadget");
        assert_eq!(req.review_count.to_string(), "120");
    }

    #[test]
    fn rejects_short_positional_array() {
        assert!(serde_json::from_str::<ExchangeRequest>(r#"["Widget gadget", 4.5]"#).is_err());
    }

    #[test]
    fn rejects_non_numeric_rating() {
        assert!(serde_json::from_str::<ExchangeRequest>(r#"["Widget gadget", "great", 120]"#).is_err());
    }

    #[test]
    fn composes_review_sentence() {
        let req: ExchangeRequest = serde_json::from_str(r#"["Widget gadget", 4.5, 120]"#).unwrap();
        let keywords = req.keywords().unwrap();
        assert_eq!(
            req.compose_reply(&keywords, "Widgets are useful."),
            "Widgets are useful.\n\nThe Widget received 120 reviews on Amazon with an average 4.5 rating."
        );
    }
}
