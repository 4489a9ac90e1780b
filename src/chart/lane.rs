use serde::{Deserialize, Serialize};

/// Total number of input columns (piano keys C through B).
pub const LANE_COUNT: usize = 7;

/// One of the seven piano-key input columns.
///
/// Chart JSON stores lanes as 0-based integers, so the enum serializes
/// through its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Lane {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Lane {
    /// Returns all lanes in keyboard order.
    pub fn all() -> &'static [Lane] {
        &[
            Lane::C,
            Lane::D,
            Lane::E,
            Lane::F,
            Lane::G,
            Lane::A,
            Lane::B,
        ]
    }

    /// Returns the lane index (0-based).
    pub fn index(self) -> usize {
        match self {
            Lane::C => 0,
            Lane::D => 1,
            Lane::E => 2,
            Lane::F => 3,
            Lane::G => 4,
            Lane::A => 5,
            Lane::B => 6,
        }
    }

    /// Create a lane from a 0-based index. Returns `None` for indices
    /// outside the key range, which is how raw host input is rejected.
    pub fn from_index(index: usize) -> Option<Lane> {
        match index {
            0 => Some(Lane::C),
            1 => Some(Lane::D),
            2 => Some(Lane::E),
            3 => Some(Lane::F),
            4 => Some(Lane::G),
            5 => Some(Lane::A),
            6 => Some(Lane::B),
            _ => None,
        }
    }

    /// Note name for display and logs.
    pub fn name(self) -> &'static str {
        match self {
            Lane::C => "C",
            Lane::D => "D",
            Lane::E => "E",
            Lane::F => "F",
            Lane::G => "G",
            Lane::A => "A",
            Lane::B => "B",
        }
    }
}

impl TryFrom<u8> for Lane {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Lane::from_index(value as usize).ok_or_else(|| format!("lane index out of range: {value}"))
    }
}

impl From<Lane> for u8 {
    fn from(lane: Lane) -> u8 {
        lane.index() as u8
    }
}
