pub mod change;
pub mod collection;
pub mod config;
pub mod group;
pub mod task;

pub use change::*;
pub use collection::*;
pub use config::*;
pub use group::*;
pub use task::*;
