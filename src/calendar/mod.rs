//! The pure calendar pipeline: normalize → merge → classify → assemble.
//!
//! Every function in this module is a synchronous transformation over
//! already-materialized data. The previous calendar goes in as an argument
//! and the new calendar comes out as a value; persistence and fetching
//! belong to [`crate::store`] and [`crate::scrape`].

pub mod assemble;
pub mod merge;
pub mod normalize;
pub mod status;
mod wire;

pub use assemble::{AssembleOptions, Period, StatusFilter, assemble};
pub use merge::{merge_calendars, merge_records};
pub use normalize::{normalize, parse_lead_managers};
pub use status::{classify, classify_with_date};
pub use wire::{LooseNum, RawRecord};
