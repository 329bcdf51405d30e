//! Registry of job kinds and their display metadata.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::{LazyLock, OnceLock};

use serde::{Deserialize, Serialize};

use crate::jobs::{Job, JobKind, builtin};

pub const DEFAULT_DESCRIPTION: &str = "No description available.";
pub const DEFAULT_CATEGORY: &str = "General";

/// Display metadata for one job kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescriptor {
    pub kind: String,
    pub display_name: String,
    pub description: String,
    pub category: String,
}

impl JobDescriptor {
    fn matches(&self, term: &str, category: &str) -> bool {
        let category_ok = category.is_empty() || self.category.eq_ignore_ascii_case(category);
        if !category_ok {
            return false;
        }
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.display_name.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
    }
}

/// Entry in the registration table: static metadata plus a constructor.
#[derive(Clone, Copy)]
pub struct JobRegistration {
    pub kind: &'static str,
    pub description: Option<&'static str>,
    pub category: Option<&'static str>,
    pub factory: fn() -> Box<dyn Job>,
}

impl JobRegistration {
    pub fn of<T: JobKind>() -> Self {
        Self {
            kind: T::KIND,
            description: T::DESCRIPTION,
            category: T::CATEGORY,
            factory: make::<T>,
        }
    }

    fn descriptor(&self) -> JobDescriptor {
        JobDescriptor {
            kind: self.kind.to_string(),
            display_name: self.kind.to_string(),
            description: self.description.unwrap_or(DEFAULT_DESCRIPTION).to_string(),
            category: self.category.unwrap_or(DEFAULT_CATEGORY).to_string(),
        }
    }
}

impl fmt::Debug for JobRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobRegistration")
            .field("kind", &self.kind)
            .field("description", &self.description)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

fn make<T: JobKind>() -> Box<dyn Job> {
    Box::new(T::default())
}

static GLOBAL: LazyLock<JobRegistry> = LazyLock::new(|| JobRegistry::new(builtin::registrations()));

/// Job kinds known to the process.
///
/// Descriptors are built on first query and memoized. An empty registry is
/// valid: callers treat "no jobs found" as a normal state.
#[derive(Debug, Default)]
pub struct JobRegistry {
    registrations: Vec<JobRegistration>,
    descriptors: OnceLock<Vec<JobDescriptor>>,
}

impl JobRegistry {
    pub fn new(registrations: Vec<JobRegistration>) -> Self {
        let mut registry = Self::default();
        for registration in registrations {
            registry.register(registration);
        }
        registry
    }

    /// Process-wide registry of the built-in kinds.
    pub fn global() -> &'static JobRegistry {
        &GLOBAL
    }

    /// Add a kind, replacing any earlier registration of the same kind.
    pub fn register(&mut self, registration: JobRegistration) {
        match self
            .registrations
            .iter_mut()
            .find(|r| r.kind == registration.kind)
        {
            Some(existing) => *existing = registration,
            None => self.registrations.push(registration),
        }
        self.descriptors = OnceLock::new();
        tracing::debug!("Registered job kind: {}", registration.kind);
    }

    /// All descriptors, ordered by category then display name.
    pub fn discover(&self) -> &[JobDescriptor] {
        self.descriptors.get_or_init(|| {
            let mut descriptors: Vec<_> = self
                .registrations
                .iter()
                .map(JobRegistration::descriptor)
                .collect();
            descriptors.sort_by(|a, b| {
                a.category
                    .cmp(&b.category)
                    .then_with(|| a.display_name.cmp(&b.display_name))
            });
            tracing::debug!(count = descriptors.len(), "Discovered job kinds");
            descriptors
        })
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.discover()
            .iter()
            .map(|d| d.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Descriptors in `category` (any when empty) whose name or description
    /// contains `term` (any when empty), ignoring case. Keeps discovery order.
    pub fn search(&self, term: &str, category: &str) -> Vec<&JobDescriptor> {
        self.discover()
            .iter()
            .filter(|d| d.matches(term, category))
            .collect()
    }

    /// New default instance of `kind`.
    pub fn create(&self, kind: &str) -> Option<Box<dyn Job>> {
        self.registrations
            .iter()
            .find(|r| r.kind == kind)
            .map(|r| (r.factory)())
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::builtin::{DebugProbe, MovementJob, PatrolRoute, TemplateJob};

    fn registry() -> JobRegistry {
        JobRegistry::new(vec![
            JobRegistration::of::<PatrolRoute>(),
            JobRegistration::of::<TemplateJob>(),
            JobRegistration::of::<MovementJob>(),
            JobRegistration::of::<DebugProbe>(),
        ])
    }

    fn kinds(found: &[&JobDescriptor]) -> Vec<String> {
        found.iter().map(|d| d.kind.clone()).collect()
    }

    #[test]
    fn empty_search_lists_everything_by_category_then_name() {
        let registry = registry();
        assert_eq!(
            kinds(&registry.search("", "")),
            ["DebugProbe", "TemplateJob", "MovementJob", "PatrolRoute"]
        );
    }

    #[test]
    fn missing_metadata_gets_defaults() {
        let registry = registry();
        let template = registry
            .discover()
            .iter()
            .find(|d| d.kind == "TemplateJob")
            .unwrap();
        assert_eq!(template.description, DEFAULT_DESCRIPTION);
        assert_eq!(template.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn search_filters_by_term_and_category() {
        let registry = registry();
        assert_eq!(kinds(&registry.search("WAYPOINT", "")), ["PatrolRoute"]);
        assert_eq!(
            kinds(&registry.search("", "movement")),
            ["MovementJob", "PatrolRoute"]
        );
        assert!(registry.search("patrol", "Debug").is_empty());

        let all = registry.search("", "");
        for found in registry.search("o", "") {
            assert!(all.contains(&found));
        }
    }

    #[test]
    fn categories_are_distinct_and_sorted() {
        assert_eq!(registry().categories(), ["Debug", "General", "Movement"]);
    }

    #[test]
    fn create_builds_fresh_instances() {
        let registry = registry();
        let job = registry.create("MovementJob").unwrap();
        assert_eq!(job.kind(), "MovementJob");
        assert_eq!(job.name(), "Movement");
        assert!(registry.create("Nope").is_none());
    }

    #[test]
    fn empty_registry_is_valid() {
        let registry = JobRegistry::new(Vec::new());
        assert!(registry.discover().is_empty());
        assert!(registry.categories().is_empty());
        assert!(registry.search("", "").is_empty());
    }

    #[test]
    fn registering_invalidates_cached_descriptors() {
        let mut registry = JobRegistry::new(vec![JobRegistration::of::<TemplateJob>()]);
        assert_eq!(registry.discover().len(), 1);
        registry.register(JobRegistration::of::<DebugProbe>());
        registry.register(JobRegistration::of::<DebugProbe>());
        assert_eq!(registry.discover().len(), 2);
    }

    #[test]
    fn global_registry_holds_builtins() {
        let global = JobRegistry::global();
        assert_eq!(global.len(), builtin::registrations().len());
        assert!(global.create("InputTrigger").is_some());
    }
}
