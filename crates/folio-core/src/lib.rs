pub mod constants;
pub mod cursor;
pub mod error;
pub mod holo;
pub mod lanyard;
pub mod modal;
pub mod reveal;
pub mod ticker;

pub use cursor::*;
pub use error::*;
pub use holo::*;
pub use modal::*;
pub use reveal::*;
pub use ticker::*;
