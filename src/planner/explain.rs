//! Explain output for index plans
//!
//! Produces deterministic output describing the verified index set of one
//! revision, as JSON for tooling and as text for operators.

use std::fmt;

use serde::Serialize;

use super::errors::PlannerError;
use super::index::IndexDef;
use super::planner::IndexPlan;

/// Explain plan output
#[derive(Debug, Clone, Serialize)]
pub struct ExplainPlan {
    /// Whether verification succeeded
    pub accepted: bool,
    /// Revision tag (if accepted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Recency field (if accepted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recency: Option<String>,
    /// Declared indexes in declaration order
    pub indexes: Vec<IndexDef>,
    /// Offending index (if rejected)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_index: Option<String>,
    /// Rejection reason (if rejected)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Rejection error code (if rejected)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_code: Option<String>,
}

impl ExplainPlan {
    /// Creates an explain plan from a verified index plan
    pub fn from_plan(plan: &IndexPlan) -> Self {
        Self {
            accepted: true,
            revision: Some(plan.revision.tag().to_string()),
            recency: Some(plan.recency.clone()),
            indexes: plan.indexes.clone(),
            rejected_index: None,
            rejection_reason: None,
            rejection_code: None,
        }
    }

    /// Creates an explain plan from a planning error
    pub fn from_error(err: &PlannerError) -> Self {
        Self {
            accepted: false,
            revision: None,
            recency: None,
            indexes: Vec::new(),
            rejected_index: Some(err.index().to_string()),
            rejection_reason: Some(err.message().to_string()),
            rejection_code: Some(err.code().code().to_string()),
        }
    }

    /// JSON form of the explain output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN PLAN ===")?;

        if self.accepted {
            writeln!(f, "Status: ACCEPTED")?;
            if let Some(revision) = &self.revision {
                writeln!(f, "Revision: {}", revision)?;
            }
            if let Some(recency) = &self.recency {
                writeln!(f, "Recency: {}", recency)?;
            }
            writeln!(f, "Indexes:")?;
            for index in &self.indexes {
                writeln!(f, "  - {}", index)?;
            }
        } else {
            writeln!(f, "Status: REJECTED")?;
            if let Some(code) = &self.rejection_code {
                writeln!(f, "Error Code: {}", code)?;
            }
            if let Some(index) = &self.rejected_index {
                writeln!(f, "Index: {}", index)?;
            }
            if let Some(reason) = &self.rejection_reason {
                writeln!(f, "Reason: {}", reason)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::IndexPlanner;
    use crate::schema::{vehicle_schema, Revision};

    #[test]
    fn test_explain_accepted_plan() {
        let schema = vehicle_schema(Revision::V1).unwrap();
        let plan = IndexPlanner::new(&schema).plan().unwrap();
        let explain = ExplainPlan::from_plan(&plan);

        let text = explain.to_string();
        assert!(text.starts_with("=== EXPLAIN PLAN ==="));
        assert!(text.contains("Status: ACCEPTED"));
        assert!(text.contains("price_1_createdAt_-1__id_-1"));

        let json = explain.to_json();
        assert_eq!(json["revision"], "v1");
        assert_eq!(json["indexes"].as_array().unwrap().len(), 11);
        assert_eq!(json["indexes"][0]["keys"][0]["direction"], "asc");
        assert!(json.get("rejection_code").is_none());
    }

    #[test]
    fn test_explain_rejection() {
        let err = PlannerError::leading_not_searchable("images_1", "images");
        let explain = ExplainPlan::from_error(&err);
        let text = explain.to_string();
        assert!(text.contains("Status: REJECTED"));
        assert!(text.contains("VEHICLE_INDEX_LEADING_NOT_SEARCHABLE"));
        assert_eq!(explain.to_json()["rejected_index"], "images_1");
    }
}
