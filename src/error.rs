use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AllocationError {
    #[error("requested large team count must not be negative, got {0}")]
    NegativeTeamCount(i64),
    #[error(
        "unsupported crew rules: large crew {large_min_crew}..={large_max_crew}, \
         small crew {small_crew}"
    )]
    InvalidCrewRules {
        large_min_crew: usize,
        large_max_crew: usize,
        small_crew: usize,
    },
}
