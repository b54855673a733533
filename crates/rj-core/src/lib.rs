//! # rj-core
//!
//! Core types, clock abstraction, and error types for RoleJuggler.
//!
//! This crate provides the foundational types shared across all RoleJuggler crates:
//! - Entity structs for tasks, jobs, notes, tracked sessions, and insights
//! - Status and priority enums with their wire representations
//! - The `Clock` seam used for time accounting and cache freshness
//! - Cross-cutting error types
//! - CLI response types

pub mod clock;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
