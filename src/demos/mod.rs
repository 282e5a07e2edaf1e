//! Ready-made persona rosters for the bundled binaries.

pub mod acme;
pub mod clinic;
