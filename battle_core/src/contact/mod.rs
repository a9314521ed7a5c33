//! Contact resolution - what happens when an attacker touches its victim

mod payback;
mod resolution;

pub use payback::{PaybackDescriptor, PaybackKind};
pub use resolution::{resolve_contact, ContactOutcome, ContactRequest, ContactVerdict};
