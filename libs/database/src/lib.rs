//! Database connectors.
//!
//! Currently PostgreSQL only, via SeaORM. The connection handle returned by
//! [`postgres::connect`] is the single process-wide handle: share it by
//! cloning (cheap, it wraps a pool) and close it explicitly at shutdown.

pub mod postgres;
