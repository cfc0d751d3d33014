//! Core invoice types, arithmetic, dates, status and formatting.
//!
//! Everything in this module is a pure function over explicit inputs.
//! Operations that depend on the current time take `now` as a parameter;
//! [`Clock`] exists for the orchestration code that has to supply it.

pub mod amount;
mod builder;
mod calc;
mod clock;
mod dates;
mod error;
mod format;
mod numbering;
mod status;
mod types;
mod update;
mod validation;
mod view;

pub use builder::*;
pub use calc::*;
pub use clock::*;
pub use dates::*;
pub use error::*;
pub use format::*;
pub use numbering::*;
pub use status::*;
pub use types::*;
pub use update::*;
pub use validation::*;
pub use view::*;
