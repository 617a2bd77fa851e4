use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::entity::CrewId;

/// Stable reason code for each warning category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    OddPoolForSmallType,
    InsufficientPoolForLargeTypeCount,
    OverflowUnassigned,
    ValidatorTrimmedExcess,
    ValidatorUndersizedTeam,
}

impl WarningCode {
    pub fn as_str(self) -> &'static str {
        match self {
            WarningCode::OddPoolForSmallType => "ODD_POOL_FOR_SMALL_TYPE",
            WarningCode::InsufficientPoolForLargeTypeCount => {
                "INSUFFICIENT_POOL_FOR_LARGE_TYPE_COUNT"
            }
            WarningCode::OverflowUnassigned => "OVERFLOW_UNASSIGNED",
            WarningCode::ValidatorTrimmedExcess => "VALIDATOR_TRIMMED_EXCESS",
            WarningCode::ValidatorUndersizedTeam => "VALIDATOR_UNDERSIZED_TEAM",
        }
    }

    /// Whether members named by this warning are left out of every team.
    pub fn leaves_unassigned(self) -> bool {
        matches!(self, WarningCode::OverflowUnassigned | WarningCode::ValidatorTrimmedExcess)
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub code: WarningCode,
    pub message: String,
    /// Members the warning is about, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<CrewId>,
}

impl Warning {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Warning {
        Warning { code, message: message.into(), members: Vec::new() }
    }

    pub fn with_members(mut self, members: impl IntoIterator<Item = CrewId>) -> Warning {
        self.members.extend(members);
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Collects warnings for one allocation run and mirrors each one to `tracing`.
#[derive(Debug, Default)]
pub struct Warnings(Vec<Warning>);

impl Warnings {
    pub fn push(&mut self, warning: Warning) {
        tracing::warn!(
            code = warning.code.as_str(),
            members = ?warning.members,
            "{}",
            warning.message
        );
        self.0.push(warning);
    }

    pub fn as_slice(&self) -> &[Warning] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Warning> {
        self.0
    }
}
