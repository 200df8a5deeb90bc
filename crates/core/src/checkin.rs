use serde::{Deserialize, Serialize};

/// Live snapshot of a daily wellness check-in.
///
/// Same replacement semantics as [`crate::order::OrderState`]: each update
/// carries the complete check-in, never a partial patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckInState {
    pub mood: Option<String>,
    pub energy: Option<String>,
    pub objectives: Vec<String>,
    pub summary: Option<String>,
}
