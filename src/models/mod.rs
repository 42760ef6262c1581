pub mod record;
pub mod wire;

pub use record::*;
pub use wire::*;
