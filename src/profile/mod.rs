//! Subject profiles and batch loading

mod data;
pub mod loader;

pub use data::{ComorbidityLevel, Sex, SubjectProfile};
pub use loader::{load_profiles, load_profiles_from_reader};
