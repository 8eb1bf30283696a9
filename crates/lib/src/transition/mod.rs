//! Transition mutators.
//!
//! A transition mutator owns one variant dimension. It decides which
//! variations each module must exist in ([`TransitionMutator::split`]), which
//! variation a dependent asks of a dependency
//! ([`TransitionMutator::outgoing_transition`]), and which variation the
//! dependency actually provides ([`TransitionMutator::incoming_transition`]).

mod engine;
mod types;

pub(crate) use engine::run_transition;
pub use types::*;
