//! Land Registry Contract
//!
//! Client for the deployed `LandRegistry` smart contract. The portal signs
//! with one configured account and talks to a single contract instance per
//! deployment environment; the ledger owns the records, this side only
//! submits registrations and reads snapshots back.

mod client;

pub use client::{LandRecord, RegistrationOutcome, RegistryClient, RegistryError};
