//! Status catalog - templates for creating status instances by kind

use super::{StatusBehavior, StatusEffect, StatusKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default parameters for one status kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusTemplate {
    pub kind: StatusKind,
    /// Base duration in phase cycles (0 = until removed)
    #[serde(default)]
    pub duration: i32,
    pub behavior: StatusBehavior,
}

impl StatusTemplate {
    /// Create a fresh, unbound instance
    pub fn instantiate(&self) -> StatusEffect {
        StatusEffect::new(self.kind, self.duration, self.behavior.clone())
    }
}

/// Status template registry
#[derive(Debug, Clone, Default)]
pub struct StatusCatalog {
    templates: HashMap<StatusKind, StatusTemplate>,
}

impl StatusCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        StatusCatalog {
            templates: HashMap::new(),
        }
    }

    /// Register a template, replacing any previous one for its kind
    pub fn register(&mut self, template: StatusTemplate) {
        self.templates.insert(template.kind, template);
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusTemplate> {
        self.templates.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Create an instance with the template's duration
    pub fn create(&self, kind: StatusKind) -> Option<StatusEffect> {
        self.get(kind).map(StatusTemplate::instantiate)
    }

    /// Create an instance with an explicit duration
    pub fn create_with_duration(&self, kind: StatusKind, duration: i32) -> Option<StatusEffect> {
        self.get(kind)
            .map(|template| StatusEffect::new(kind, duration, template.behavior.clone()))
    }

    /// Load the bundled catalog
    pub fn with_defaults() -> Self {
        crate::config::default_status_catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusPhase;

    #[test]
    fn test_defaults_cover_every_kind() {
        let catalog = StatusCatalog::with_defaults();
        for kind in StatusKind::all() {
            assert!(catalog.get(kind).is_some(), "missing template for {kind}");
        }
    }

    #[test]
    fn test_create_is_unbound() {
        let catalog = StatusCatalog::with_defaults();
        let status = catalog.create(StatusKind::Sleep).unwrap();
        assert_eq!(status.kind(), StatusKind::Sleep);
        assert_eq!(status.phase(), StatusPhase::Unbound);
    }

    #[test]
    fn test_create_with_duration() {
        let catalog = StatusCatalog::with_defaults();
        let status = catalog.create_with_duration(StatusKind::Burn, 7).unwrap();
        assert_eq!(status.duration(), 7);
    }

    #[test]
    fn test_register_replaces() {
        let mut catalog = StatusCatalog::new();
        catalog.register(StatusTemplate {
            kind: StatusKind::Dizzy,
            duration: 1,
            behavior: StatusBehavior::Marker,
        });
        catalog.register(StatusTemplate {
            kind: StatusKind::Dizzy,
            duration: 4,
            behavior: StatusBehavior::Marker,
        });
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(StatusKind::Dizzy).unwrap().duration, 4);
    }
}
