use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GateError;

/// Named threshold sets. Two revisions of the maze shipped with different
/// numbers; both are kept so either behaviour can be reproduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateProfile {
    /// Branch at 11 / 15, crossing floor 0.1.
    #[default]
    Original,
    /// Branch at 10.5 / 14.5, uniform side floor 0.5.
    Revised,
}

impl GateProfile {
    pub fn name(self) -> &'static str {
        match self {
            GateProfile::Original => "original",
            GateProfile::Revised => "revised",
        }
    }
}

impl fmt::Display for GateProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateProfile {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "original" => Ok(GateProfile::Original),
            "revised" => Ok(GateProfile::Revised),
            other => Err(GateError::UnknownProfile(other.to_string())),
        }
    }
}

/// Which side check the decision tree selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Branch clearance below `branch_low`: inside the first corridor.
    Corridor,
    /// Branch clearance above `branch_high`: behind the crossing.
    Beyond,
    /// Between the two thresholds, inclusive: in the crossing corridor.
    Crossing,
}

/// The rule that rejected a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    FaceFloor,
    CorridorFloor,
    CrossingFloor,
}

/// Outcome of the decision tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted { branch: Branch },
    Blocked { rule: Rule, wall: usize },
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accepted { branch } => write!(f, "accepted ({branch:?})"),
            Verdict::Blocked { rule, wall } => write!(f, "blocked by wall {wall} ({rule:?})"),
        }
    }
}

/// Decision-tree thresholds, addressed by position in the gate wall sequence.
///
/// A wall rejects when its clearance is `<=` the floor that applies to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Face walls checked unconditionally.
    pub face_walls: Vec<usize>,
    pub face_floor: f32,
    /// Wall whose clearance selects the branch.
    pub branch_wall: usize,
    /// Strict lower bound of the crossing branch.
    pub branch_low: f32,
    /// Strict upper bound of the crossing branch.
    pub branch_high: f32,
    pub corridor_walls: Vec<usize>,
    pub corridor_floor: f32,
    pub crossing_walls: Vec<usize>,
    pub crossing_floor: f32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::profile(GateProfile::default())
    }
}

impl GateConfig {
    pub fn profile(profile: GateProfile) -> Self {
        let (branch_low, branch_high, crossing_floor) = match profile {
            GateProfile::Original => (11.0, 15.0, 0.1),
            GateProfile::Revised => (10.5, 14.5, 0.5),
        };
        Self {
            face_walls: vec![1, 4, 7],
            face_floor: 2.0,
            branch_wall: 1,
            branch_low,
            branch_high,
            corridor_walls: vec![0, 2],
            corridor_floor: 0.5,
            crossing_walls: vec![6, 8],
            crossing_floor,
        }
    }

    /// Check every wall index against a sequence of `wall_count` walls.
    pub fn validate(&self, wall_count: usize) -> Result<(), GateError> {
        if self.branch_low > self.branch_high {
            return Err(GateError::InvertedBranch {
                low: self.branch_low,
                high: self.branch_high,
            });
        }
        let sets: [(&'static str, &[usize]); 3] = [
            ("face_walls", self.face_walls.as_slice()),
            ("corridor_walls", self.corridor_walls.as_slice()),
            ("crossing_walls", self.crossing_walls.as_slice()),
        ];
        for (field, walls) in sets {
            if walls.is_empty() {
                return Err(GateError::EmptyWallSet { field });
            }
            for &index in walls {
                check_index(field, index, wall_count)?;
            }
        }
        check_index("branch_wall", self.branch_wall, wall_count)
    }

    /// Which branch a given branch-wall clearance selects.
    pub fn branch(&self, clearance: f32) -> Branch {
        if clearance < self.branch_low {
            Branch::Corridor
        } else if clearance > self.branch_high {
            Branch::Beyond
        } else {
            Branch::Crossing
        }
    }

    /// Run the decision tree over a clearance sequence.
    ///
    /// # Panics
    /// If `clearances` is shorter than an index the config references. Callers
    /// are expected to have validated the config against the wall count.
    pub fn evaluate(&self, clearances: &[f32]) -> Verdict {
        let highest = self.highest_index();
        assert!(
            highest < clearances.len(),
            "gate config references wall {highest} but only {} clearances were supplied",
            clearances.len()
        );

        if let Some(wall) = first_at_or_below(clearances, &self.face_walls, self.face_floor) {
            return Verdict::Blocked {
                rule: Rule::FaceFloor,
                wall,
            };
        }

        let branch = self.branch(clearances[self.branch_wall]);
        let blocked = match branch {
            Branch::Corridor | Branch::Beyond => {
                first_at_or_below(clearances, &self.corridor_walls, self.corridor_floor)
                    .map(|wall| (Rule::CorridorFloor, wall))
            }
            Branch::Crossing => {
                first_at_or_below(clearances, &self.crossing_walls, self.crossing_floor)
                    .map(|wall| (Rule::CrossingFloor, wall))
            }
        };

        match blocked {
            Some((rule, wall)) => Verdict::Blocked { rule, wall },
            None => Verdict::Accepted { branch },
        }
    }

    pub fn permits(&self, clearances: &[f32]) -> bool {
        self.evaluate(clearances).is_accepted()
    }

    fn highest_index(&self) -> usize {
        self.face_walls
            .iter()
            .chain(&self.corridor_walls)
            .chain(&self.crossing_walls)
            .copied()
            .chain(std::iter::once(self.branch_wall))
            .max()
            .unwrap_or(0)
    }
}

fn check_index(field: &'static str, index: usize, count: usize) -> Result<(), GateError> {
    if index >= count {
        return Err(GateError::WallIndexOutOfRange {
            field,
            index,
            count,
        });
    }
    Ok(())
}

fn first_at_or_below(clearances: &[f32], walls: &[usize], floor: f32) -> Option<usize> {
    walls.iter().copied().find(|&i| clearances[i] <= floor)
}
