pub mod site;
pub mod snapshot;

pub use site::*;
pub use snapshot::*;
