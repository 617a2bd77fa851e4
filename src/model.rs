pub mod entity {
    use std::collections::BTreeSet;
    use std::fmt;

    use serde::{Deserialize, Serialize};

    use crate::rank;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct CrewId(pub String);

    impl From<&str> for CrewId {
        fn from(id: &str) -> Self {
            CrewId(id.to_owned())
        }
    }

    impl fmt::Display for CrewId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    /// Seniority tiers, most senior first. The derived `Ord` follows that
    /// order, so `HigherSenior < Senior < Junior < Other`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub enum SeniorityTier {
        HigherSenior,
        Senior,
        Junior,
        Other,
    }

    impl SeniorityTier {
        pub const ALL: [SeniorityTier; 4] = [
            SeniorityTier::HigherSenior,
            SeniorityTier::Senior,
            SeniorityTier::Junior,
            SeniorityTier::Other,
        ];

        /// Senior or above.
        pub fn is_senior(self) -> bool {
            matches!(self, SeniorityTier::HigherSenior | SeniorityTier::Senior)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum AircraftType {
        /// Crew size within `[large_min_crew, large_max_crew]`.
        Large,
        /// Crew size fixed at `small_crew`.
        Small,
    }

    impl AircraftType {
        pub fn code(self) -> &'static str {
            match self {
                AircraftType::Large => "L",
                AircraftType::Small => "S",
            }
        }

        /// Only restricted types check qualifications when members are placed.
        pub fn is_restricted(self) -> bool {
            matches!(self, AircraftType::Large)
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CrewMember {
        pub id: CrewId,
        pub name: String,
        pub rank: String,
        #[serde(default)]
        pub qualifications: BTreeSet<AircraftType>,
    }

    impl CrewMember {
        pub fn new(
            id: impl Into<String>,
            name: impl Into<String>,
            rank: impl Into<String>,
        ) -> CrewMember {
            CrewMember {
                id: CrewId(id.into()),
                name: name.into(),
                rank: rank.into(),
                qualifications: BTreeSet::new(),
            }
        }

        pub fn with_qualification(mut self, aircraft: AircraftType) -> CrewMember {
            self.qualifications.insert(aircraft);
            self
        }

        pub fn tier(&self) -> SeniorityTier {
            rank::classify_rank(&self.rank)
        }

        pub fn rank_order(&self) -> u32 {
            rank::rank_order(&self.rank)
        }

        /// A member with no recorded qualifications is only trusted with the
        /// small type.
        pub fn is_qualified_for(&self, aircraft: AircraftType) -> bool {
            if self.qualifications.is_empty() {
                aircraft == AircraftType::Small
            } else {
                self.qualifications.contains(&aircraft)
            }
        }
    }
}


pub mod group {
    use serde::{Deserialize, Serialize};

    use super::entity::{AircraftType, CrewMember};

    /// Index of a member in the pool passed to the allocator.
    pub type MemberIdx = usize;
    pub type Seq = usize;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Team {
        pub aircraft: AircraftType,
        pub seq: Seq,
        pub members: Vec<CrewMember>,
    }

    impl Team {
        pub fn id(&self) -> String {
            format!("{}-{}", self.aircraft.code(), self.seq)
        }

        pub fn len(&self) -> usize {
            self.members.len()
        }

        pub fn is_empty(&self) -> bool {
            self.members.is_empty()
        }
    }

    /// Working team that refers to pool members by index.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct TeamDraft {
        pub aircraft: AircraftType,
        pub seq: Seq,
        pub members: Vec<MemberIdx>,
    }

    impl TeamDraft {
        pub fn new(aircraft: AircraftType, seq: Seq, members: Vec<MemberIdx>) -> TeamDraft {
            TeamDraft { aircraft, seq, members }
        }

        pub fn id(&self) -> String {
            format!("{}-{}", self.aircraft.code(), self.seq)
        }

        pub fn to_team(&self, pool: &[CrewMember]) -> Team {
            Team {
                aircraft: self.aircraft,
                seq: self.seq,
                members: self.members.iter().map(|&idx| pool[idx].clone()).collect(),
            }
        }
    }

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct Roster {
        pub teams: Vec<TeamDraft>,
        /// Sequence number of the one small team allowed to hold an extra member.
        pub odd_team: Option<Seq>,
    }

    impl Roster {
        pub fn new(teams: Vec<TeamDraft>) -> Roster {
            Roster { teams, odd_team: None }
        }

        pub fn of_type(&self, aircraft: AircraftType) -> impl Iterator<Item = &TeamDraft> {
            self.teams.iter().filter(move |team| team.aircraft == aircraft)
        }

        pub fn next_seq(&self, aircraft: AircraftType) -> Seq {
            self.of_type(aircraft).map(|team| team.seq).max().unwrap_or(0) + 1
        }

        pub fn member_count(&self) -> usize {
            self.teams.iter().map(|team| team.members.len()).sum()
        }
    }
}

pub mod condition {
    use serde::{Deserialize, Serialize};

    use super::entity::AircraftType;
    use crate::error::AllocationError;

    /// Crew-size rules per aircraft type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct CrewRules {
        pub large_min_crew: usize,
        pub large_max_crew: usize,
        pub small_crew: usize,
    }

    impl Default for CrewRules {
        fn default() -> Self {
            CrewRules {
                large_min_crew: 4,
                large_max_crew: 6,
                small_crew: 2,
            }
        }
    }

    impl CrewRules {
        pub fn min_crew(&self, aircraft: AircraftType) -> usize {
            match aircraft {
                AircraftType::Large => self.large_min_crew,
                AircraftType::Small => self.small_crew,
            }
        }

        pub fn max_crew(&self, aircraft: AircraftType) -> usize {
            match aircraft {
                AircraftType::Large => self.large_max_crew,
                AircraftType::Small => self.small_crew,
            }
        }

        /// Rejects rules the builder cannot honour. Small teams are pairs and
        /// large teams start from an even size, so that only an odd pool
        /// leaves a single member over.
        pub fn check(&self) -> Result<(), AllocationError> {
            if self.large_min_crew == 0
                || self.large_min_crew % 2 != 0
                || self.small_crew != 2
                || self.large_min_crew > self.large_max_crew
            {
                return Err(AllocationError::InvalidCrewRules {
                    large_min_crew: self.large_min_crew,
                    large_max_crew: self.large_max_crew,
                    small_crew: self.small_crew,
                });
            }
            Ok(())
        }
    }

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AllocationConfig {
        pub large_team_count: i64,
        #[serde(default)]
        pub rules: CrewRules,
    }

    impl AllocationConfig {
        pub fn new(large_team_count: i64) -> AllocationConfig {
            AllocationConfig {
                large_team_count,
                rules: CrewRules::default(),
            }
        }

        pub fn with_rules(mut self, rules: CrewRules) -> AllocationConfig {
            self.rules = rules;
            self
        }

        /// Requested large-team count, rejecting negative values and bad rules.
        pub fn requested_large_teams(&self) -> Result<usize, AllocationError> {
            self.rules.check()?;
            usize::try_from(self.large_team_count)
                .map_err(|_| AllocationError::NegativeTeamCount(self.large_team_count))
        }
    }
}
