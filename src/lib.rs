//! Crew team formation for training sessions.
//!
//! Splits a crew pool into teams per aircraft type: large-type teams of
//! `4..=6` qualified members and small-type teams of exactly 2, spreading
//! seniors so that as few teams as possible go without one.
//!
//! The pipeline runs cohort split, team build, fairness repair and
//! validation in that order. Anything it cannot satisfy comes back as a
//! [`Warning`] next to a best-effort set of teams.
//!
//! ```
//! use crew_allocator::{AircraftType, AllocationConfig, Allocator, CrewMember};
//!
//! let pool: Vec<CrewMember> = (1..=10)
//!     .map(|n| {
//!         CrewMember::new(n.to_string(), format!("Crew {n}"), "FA - Flight Attendant")
//!             .with_qualification(AircraftType::Large)
//!     })
//!     .collect();
//!
//! let result = Allocator::new().form_teams(&pool, &AllocationConfig::new(2)).unwrap();
//! assert_eq!(result.teams.len(), 3);
//! assert!(result.warnings.is_empty());
//! ```

pub mod action;
pub mod allocator;
pub mod builder;
pub mod cache;
pub mod cohort;
pub mod error;
pub mod model;
pub mod rank;
pub mod repair;
pub mod validate;
pub mod warning;

pub use allocator::{AllocationResult, Allocator};
pub use error::AllocationError;
pub use model::condition::{AllocationConfig, CrewRules};
pub use model::entity::{AircraftType, CrewId, CrewMember, SeniorityTier};
pub use model::group::Team;
pub use warning::{Warning, WarningCode};
