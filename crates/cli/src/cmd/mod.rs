mod bsp;
mod build;
mod clean;
mod pipeline;
mod run;

pub use bsp::cmd_bsp;
pub use build::cmd_build;
pub use clean::cmd_clean;
pub use run::cmd_run;
pub use test::cmd_test;
