//! mailscout-verifier - the pure-ish per-address verification kernel plus
//! its concurrency governor.
//!
//! [`verifier::verify`] is the one operation worker code should call; every
//! other module is an internal check it composes. The governor
//! ([`governor::ConcurrencyGovernor`]) owns the DNS resolver, the MX cache,
//! and the semaphore tiers, and is meant to be constructed once per process
//! and shared across every `verify` call.

pub mod catchall;
pub mod config;
pub mod disposable;
pub mod dns;
pub mod governor;
pub mod normalize;
pub mod provider;
pub mod role;
pub mod scoring;
pub mod smtp;
pub mod verifier;

pub use config::VerifierConfig;
pub use governor::ConcurrencyGovernor;
pub use verifier::{verify, Checks, Verdict, VerdictStatus};
