//! Service library for HSA applicant onboarding: the application decision
//! engine, its audit contract, and the app-level configuration and telemetry
//! plumbing shared by the deployable binaries.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
