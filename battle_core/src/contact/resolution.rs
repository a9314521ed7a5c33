//! Contact resolution - matching an attack against the victim's paybacks
//!
//! The victim's paybacks are scanned in order:
//! 1. Skip paybacks that don't cover the contact type
//! 2. Skip paybacks the attacker has a contact exception for
//! 3. Skip paybacks whose contact properties exclude this contact
//! 4. Pick the verdict (same-attribute verdict if the attacker shares the attribute)
//! 5. Failure returns immediately; PartialSuccess is collected; Success is dropped
//!
//! Collected paybacks are combined and returned with the combined
//! payback's own default verdict.

use super::PaybackDescriptor;
use crate::types::{ContactProperty, ContactType, PhysicalAttribute};
use serde::{Deserialize, Serialize};

/// Verdict of a contact
///
/// Ordered by priority: Failure outranks PartialSuccess, which outranks
/// Success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactVerdict {
    /// The attack lands cleanly
    #[default]
    Success,
    /// Both sides are affected
    PartialSuccess,
    /// The attack backfires and the victim is untouched
    Failure,
}

/// Result of resolving contact for one interaction
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactOutcome {
    /// Retaliation to apply to the attacker, if any
    pub payback: Option<PaybackDescriptor>,
    pub verdict: ContactVerdict,
}

impl ContactOutcome {
    /// No retaliation, clean hit
    pub fn success() -> Self {
        ContactOutcome::default()
    }

    /// Whether the attacker gets hit back
    pub fn has_payback(&self) -> bool {
        self.payback.is_some()
    }
}

/// Everything contact resolution looks at
#[derive(Debug, Clone, Copy)]
pub struct ContactRequest<'a> {
    /// Physical attributes the attacker currently has
    pub attacker_attributes: &'a [PhysicalAttribute],
    /// Attributes the attacker ignores for this contact type
    pub attacker_exceptions: &'a [PhysicalAttribute],
    pub contact_type: ContactType,
    pub contact_property: ContactProperty,
    /// The victim's paybacks, in priority order
    pub paybacks: &'a [PaybackDescriptor],
}

/// Resolve contact between an attacker and a victim
pub fn resolve_contact(request: &ContactRequest<'_>) -> ContactOutcome {
    let mut partials: Vec<&PaybackDescriptor> = Vec::new();

    for payback in request.paybacks {
        if !payback.covers_contact(request.contact_type) {
            continue;
        }
        if request.attacker_exceptions.contains(&payback.attribute) {
            continue;
        }
        if !payback.covers_property(request.contact_property) {
            continue;
        }

        let verdict = if request.attacker_attributes.contains(&payback.attribute) {
            payback.same_attribute_verdict
        } else {
            payback.verdict
        };

        match verdict {
            ContactVerdict::Failure => {
                return ContactOutcome {
                    payback: Some(payback.clone()),
                    verdict: ContactVerdict::Failure,
                };
            }
            ContactVerdict::PartialSuccess => partials.push(payback),
            ContactVerdict::Success => {}
        }
    }

    match PaybackDescriptor::combine_all(partials) {
        // The combined verdict comes from the default verdicts, not the
        // verdicts picked above.
        Some(combined) => {
            let verdict = combined.verdict;
            ContactOutcome {
                payback: Some(combined),
                verdict,
            }
        }
        None => ContactOutcome::success(),
    }
}
