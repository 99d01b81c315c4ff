//! Infection rules for the Outbreak propagation engine.
//!
//! - [`InfectionModel`]: the stateless transmission-probability function
//! - [`InfectionSpread`]: one tick of neighbour sampling and trials, with
//!   all infections buffered and committed together at the end
//!
//! # Tick order
//!
//! 1. [`InfectionSpread::scan`] reads tick-start states only
//! 2. [`InfectionSpread::commit`] applies the deduplicated pending set

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod probability;
pub mod spread;

pub use probability::{InfectionModel, InfectionModelBuilder};
pub use spread::{InfectionSpread, PendingInfections, SpreadOutcome};
