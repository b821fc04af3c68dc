mod locality;

pub use locality::{Locality, LocalityType};
