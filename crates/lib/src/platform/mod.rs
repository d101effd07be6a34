pub mod os;
pub mod paths;

pub use os::{Os, exe_suffix};
pub use paths::ProjectLayout;
