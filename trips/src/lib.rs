//! Trip composition engine for the dispatch board.
//!
//! A dispatcher builds a trip by dragging driver, truck, trailer, and load
//! cards onto drop zones. This crate owns that workflow end to end: it
//! classifies dragged cards, resolves drops into draft mutations, keeps the
//! copy-on-write trip draft, gates facet splits while editing a dispatched
//! trip, and derives equipment warnings. The host UI only forwards gesture
//! events and renders the returned [`engine::TripView`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Session orchestrator ([`engine::Composer`]) and host actions |
//! | [`card`] | Entities, cards, and the payload classifier |
//! | [`zone`] | Drop zones and the drop resolver |
//! | [`draft`] | Trip draft aggregate and its copy-on-write store |
//! | [`split`] | Split preconditions for edit mode |
//! | [`warnings`] | Length, weight, and air-ride warnings |
//! | [`drag`] | Session mode and the drag state machine |
//! | [`form`] | Bridge to the host form fields |
//! | [`labels`] | Translated strings for the view |
//! | [`config`] | Environment configuration |

pub mod card;
pub mod config;
pub mod drag;
pub mod draft;
pub mod engine;
pub mod form;
pub mod labels;
pub mod split;
pub mod warnings;
pub mod zone;

#[cfg(test)]
mod test_helpers;
