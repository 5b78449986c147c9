//! Task records, boards, and workflow for Pontis Board.
//!
//! This module implements the board core: creating task records with
//! priority-scoped sequential codes, replacing task fields, transitioning
//! tasks between status columns under the work-in-progress guard, and
//! computing the filtered, ordered view of a board. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
