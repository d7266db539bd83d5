//! Domain model for the notes and news applications.
//!
//! # Responsibility
//! - Define canonical records shared by repositories, services and the guard.
//! - Keep ownership explicit: every note and comment carries its author id.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - Author ids are set at construction and never reassigned.

pub mod identity;
pub mod news;
pub mod note;
