//! Infrastructure layer: error taxonomy and the ledger trait seam

mod error;
mod traits;

pub use error::*;
pub use traits::*;
