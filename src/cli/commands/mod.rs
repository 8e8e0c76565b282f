//! CLI command implementations

pub mod config;
pub mod init;
pub mod map;
pub mod run;

pub use config::execute as config;
pub use init::execute as init;
pub use map::execute as map;
pub use run::execute as run;
