mod profile;

pub use profile::{AgeGroup, PlayerProfile};
