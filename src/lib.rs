//! Pontis Board: task-tracking core for the Pontis kanban service.
//!
//! This crate provides the authoritative logic for creating, moving, and
//! querying task records organised into status columns and named boards,
//! including priority-scoped task-code allocation and work-in-progress
//! enforcement.
//!
//! # Architecture
//!
//! Pontis Board follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! Transport framing, authentication, and presentation belong to external
//! collaborators; the core exposes typed operations and typed errors only.

pub mod task;
