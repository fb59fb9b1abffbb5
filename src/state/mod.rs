// State container — fetched content, readiness gating, and tour progression.

pub mod collection;
pub mod events;
pub mod readiness;
pub mod repository;
pub mod tour;
