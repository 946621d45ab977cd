//! # refdata-state: Client-Side State Machines
//!
//! The two stateful pieces of RefData, both plain values owned by their
//! caller. The gateway is passed into each transition rather than stored,
//! so there is no shared or global state.
//!
//! ## State Machines
//!
//! - **StructureForm** (`form.rs`): authoring a structure plus optional seed
//!   elements, and the two-step submission protocol
//!   (`create_structure` then `add_elements`).
//!
//! - **QueryState** (`query.rs`): structure selection, free-text search and
//!   paging over a structure's elements.
//!
//! ```text
//!              select("")                     select(id) ok
//!   ┌──────────────────────────┐   ┌──────────────────────────────┐
//!   ▼                          │   │                              ▼
//! Unselected ──select(id) ok──────────────────────────────────▶ Loaded ◀─┐
//!   ▲                                                            │     │
//!   └──────────── select(id) fails / select("") ─────────────────┘     │
//!                                                  search / goto_page ─┘
//! ```

pub mod form;
pub mod query;

#[cfg(test)]
pub(crate) mod testing;

pub use form::{SubmitError, SubmitOutcome, StructureForm, GENERIC_SUBMIT_FAILURE};
pub use query::{FetchTicket, Freshness, QueryError, QueryPhase, QueryState, SearchTicket};
