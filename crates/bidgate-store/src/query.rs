//! Search constraints, sort, and limit for list requests.
//!
//! Constraints travel as a JSON array in the `constraints` query parameter:
//!
//! ```text
//! constraints=[{"key":"client","constraint_type":"equals","value":"1700...x42"}]
//! ```

use serde::Serialize;

use crate::error::StoreError;

/// Comparison applied by a [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConstraintType {
    #[serde(rename = "equals")]
    Equals,
    #[serde(rename = "not equal")]
    NotEqual,
    #[serde(rename = "is_empty")]
    IsEmpty,
    #[serde(rename = "is_not_empty")]
    IsNotEmpty,
    #[serde(rename = "text contains")]
    TextContains,
    #[serde(rename = "greater than")]
    GreaterThan,
    #[serde(rename = "less than")]
    LessThan,
    #[serde(rename = "in")]
    In,
}

/// One `{key, constraint_type, value}` filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraint {
    pub key: String,
    pub constraint_type: ConstraintType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl Constraint {
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        constraint_type: ConstraintType,
        value: Option<serde_json::Value>,
    ) -> Self {
        Self {
            key: key.into(),
            constraint_type,
            value,
        }
    }

    /// `key equals value`.
    #[must_use]
    pub fn equals(key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self::new(key, ConstraintType::Equals, Some(value.into()))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Sort {
    field: String,
    direction: Direction,
}

/// A list request: constraints, optional sort, optional limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    constraints: Vec<Constraint>,
    sort: Option<Sort>,
    limit: Option<u32>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Shorthand for an equality constraint.
    #[must_use]
    pub fn equals(self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.constraint(Constraint::equals(key, value))
    }

    #[must_use]
    pub fn sort_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.sort = Some(Sort {
            field: field.into(),
            direction,
        });
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Maximum number of records the caller wants, if bounded.
    #[must_use]
    pub const fn max_results(&self) -> Option<u32> {
        self.limit
    }

    /// Encode everything except the page window as URL query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Parse`] if the constraints cannot be serialized.
    pub fn to_query_string(&self) -> Result<String, StoreError> {
        let mut params = Vec::new();
        if !self.constraints.is_empty() {
            let json = serde_json::to_string(&self.constraints)
                .map_err(|e| StoreError::Parse(format!("constraints: {e}")))?;
            params.push(format!("constraints={}", urlencoding::encode(&json)));
        }
        if let Some(sort) = &self.sort {
            params.push(format!("sort_field={}", urlencoding::encode(&sort.field)));
            params.push(format!(
                "descending={}",
                sort.direction == Direction::Descending
            ));
        }
        Ok(params.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_query_has_no_params() {
        assert_eq!(Query::new().to_query_string().unwrap(), "");
    }

    #[test]
    fn constraints_are_json_then_url_encoded() {
        let qs = Query::new()
            .equals("client", "abc 1")
            .to_query_string()
            .unwrap();
        let encoded = qs.strip_prefix("constraints=").unwrap();
        let decoded = urlencoding::decode(encoded).unwrap();
        assert_eq!(
            decoded,
            r#"[{"key":"client","constraint_type":"equals","value":"abc 1"}]"#
        );
        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('"'));
    }

    #[test]
    fn sort_field_with_space_is_encoded() {
        let qs = Query::new()
            .sort_by("Created Date", Direction::Descending)
            .to_query_string()
            .unwrap();
        assert_eq!(qs, "sort_field=Created%20Date&descending=true");
    }

    #[test]
    fn value_less_constraint_omits_value() {
        let c = Constraint::new("invite_token", ConstraintType::IsNotEmpty, None);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"key": "invite_token", "constraint_type": "is_not_empty"})
        );
    }

    #[test]
    fn limit_is_not_part_of_query_string() {
        let query = Query::new().limit(500);
        assert_eq!(query.max_results(), Some(500));
        assert_eq!(query.to_query_string().unwrap(), "");
    }
}
