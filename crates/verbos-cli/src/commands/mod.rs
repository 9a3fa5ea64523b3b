//! Command implementations.

pub mod accents;
pub mod generate;
pub mod show;

pub use self::accents::execute_accents;
pub use self::generate::execute_generate;
pub use self::show::execute_show;
