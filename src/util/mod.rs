pub mod src;

pub use self::src::{SrcLoc, SrcRegion};
