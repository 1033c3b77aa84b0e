// Application layer: errors shared by the CLI and io modules, and report
// building on top of the domain ledger.

pub mod error;
pub mod reporting;

pub use error::*;
pub use reporting::*;
