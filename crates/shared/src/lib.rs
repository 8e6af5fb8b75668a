//! mailscout-shared - process bootstrap shared by every binary
//!
//! Env loading, tracing init, the Postgres pool, and the Redis client live
//! here so `worker`, `autoscaler`, `api`, and `server` don't each reinvent
//! them.

pub mod bootstrap;
