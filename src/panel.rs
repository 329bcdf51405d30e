//! Panel state and the calls a host UI makes into the core.

use std::collections::BTreeMap;

use tracing::{debug, info};
use uuid::Uuid;

use crate::editor::{Ui, render_and_apply};
use crate::error::{ListError, PanelError, Result};
use crate::jobs::{Clipboard, JobDescriptor, JobRegistry};
use crate::orchestrator::JobOrchestrator;

/// Label of the category option that disables filtering.
pub const ALL_CATEGORIES: &str = "All Categories";

/// Per-session panel state: fold-outs, job selector and dirty tracking.
///
/// Expanded flags are kept parallel to the job list and are resynchronized
/// after every structural change.
#[derive(Debug, Default)]
pub struct Panel {
    expanded: Vec<bool>,
    search: String,
    category: Option<String>,
    selector_open: bool,
    dirty: bool,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match the expanded flags to a list of `len` slots.
    pub fn sync(&mut self, len: usize) {
        self.expanded.resize(len, false);
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.get(index).copied().unwrap_or(false)
    }

    /// Flip the fold-out of slot `index`. Returns the new state.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.expanded.get_mut(index) {
            Some(flag) => {
                *flag = !*flag;
                *flag
            }
            None => false,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Selected category; `None` means all.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn is_selector_open(&self) -> bool {
        self.selector_open
    }

    pub fn open_selector(&mut self) {
        self.selector_open = true;
    }

    pub fn close_selector(&mut self) {
        self.selector_open = false;
    }

    /// Descriptors matching the current search, grouped by category.
    pub fn catalog<'r>(&self, registry: &'r JobRegistry) -> Vec<(String, Vec<&'r JobDescriptor>)> {
        let category = self.category.as_deref().unwrap_or("");
        let mut groups: Vec<(String, Vec<&JobDescriptor>)> = Vec::new();
        for descriptor in registry.search(&self.search, category) {
            match groups.last_mut() {
                Some((name, members)) if *name == descriptor.category => {
                    members.push(descriptor);
                    continue;
                }
                _ => {}
            }
            groups.push((descriptor.category.clone(), vec![descriptor]));
        }
        groups
    }

    /// Category filter choices, [`ALL_CATEGORIES`] first.
    pub fn category_options(&self, registry: &JobRegistry) -> Vec<String> {
        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(registry.categories())
            .collect()
    }

    /// Select the option at `index` of [`Panel::category_options`].
    /// Out-of-range indices are ignored.
    pub fn select_category(&mut self, registry: &JobRegistry, index: usize) {
        if index == 0 {
            self.category = None;
            return;
        }
        match registry.categories().into_iter().nth(index - 1) {
            Some(category) => self.category = Some(category),
            None => debug!(index, "Ignored unknown category option"),
        }
    }

    /// Add a new job of `kind`. The new slot starts expanded and the selector
    /// closes.
    pub fn add_kind(
        &mut self,
        orchestrator: &mut JobOrchestrator,
        registry: &JobRegistry,
        kind: &str,
    ) -> Result<Uuid> {
        ensure_idle(orchestrator)?;
        let job = registry
            .create(kind)
            .ok_or_else(|| PanelError::UnknownKind(kind.to_string()))?;
        let id = orchestrator.add(job);
        self.after_append(orchestrator.len());
        self.selector_open = false;
        Ok(id)
    }

    pub fn remove(&mut self, orchestrator: &mut JobOrchestrator, index: usize) -> Result<()> {
        ensure_idle(orchestrator)?;
        orchestrator.remove_at(index)?;
        self.sync(orchestrator.len() + 1);
        self.expanded.remove(index);
        self.dirty = true;
        Ok(())
    }

    /// Swap slot `index` with its predecessor. No-op for the first slot.
    pub fn move_up(&mut self, orchestrator: &mut JobOrchestrator, index: usize) -> Result<()> {
        if index == 0 {
            check(orchestrator, index)?;
            return Ok(());
        }
        self.relocate(orchestrator, index, index - 1)
    }

    /// Swap slot `index` with its successor. No-op for the last slot.
    pub fn move_down(&mut self, orchestrator: &mut JobOrchestrator, index: usize) -> Result<()> {
        check(orchestrator, index)?;
        if index + 1 == orchestrator.len() {
            return Ok(());
        }
        self.relocate(orchestrator, index, index + 1)
    }

    /// Put a copy of slot `index` on the clipboard.
    pub fn copy(
        &self,
        orchestrator: &JobOrchestrator,
        clipboard: &mut Clipboard,
        index: usize,
    ) -> Result<()> {
        check(orchestrator, index)?;
        let job = orchestrator
            .get(index)
            .and_then(|slot| slot.job.as_deref())
            .ok_or(PanelError::EmptySlot(index))?;
        clipboard.copy(job);
        Ok(())
    }

    /// Append a copy of the clipboard's job, expanded. `None` when the
    /// clipboard is empty.
    pub fn paste(
        &mut self,
        orchestrator: &mut JobOrchestrator,
        clipboard: &Clipboard,
    ) -> Result<Option<Uuid>> {
        ensure_idle(orchestrator)?;
        let id = orchestrator.paste_from(clipboard);
        if id.is_some() {
            self.after_append(orchestrator.len());
        }
        Ok(id)
    }

    /// Render slot `index` if it is expanded and holds a job. Returns true
    /// when a member changed.
    pub fn edit_slot(
        &mut self,
        orchestrator: &mut JobOrchestrator,
        ui: &mut dyn Ui,
        index: usize,
    ) -> bool {
        self.sync(orchestrator.len());
        if !self.is_expanded(index) {
            return false;
        }
        let Some(job) = orchestrator
            .get_mut(index)
            .and_then(|slot| slot.job.as_deref_mut())
        else {
            return false;
        };
        let changed = render_and_apply(job, ui);
        self.dirty |= changed;
        changed
    }

    /// Whether anything changed since the last call. Clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Categories present in the current catalog with their sizes.
    pub fn catalog_counts(&self, registry: &JobRegistry) -> BTreeMap<String, usize> {
        self.catalog(registry)
            .into_iter()
            .map(|(category, members)| (category, members.len()))
            .collect()
    }

    fn relocate(&mut self, orchestrator: &mut JobOrchestrator, from: usize, to: usize) -> Result<()> {
        ensure_idle(orchestrator)?;
        orchestrator.move_to(from, to)?;
        self.sync(orchestrator.len());
        let flag = self.expanded.remove(from);
        self.expanded.insert(to, flag);
        self.dirty = true;
        Ok(())
    }

    fn after_append(&mut self, len: usize) {
        self.sync(len);
        if let Some(last) = self.expanded.last_mut() {
            *last = true;
        }
        self.dirty = true;
    }
}

fn ensure_idle(orchestrator: &JobOrchestrator) -> Result<()> {
    if orchestrator.is_running() || orchestrator.is_any_running() {
        info!("Structural change refused while running");
        return Err(PanelError::Busy.into());
    }
    Ok(())
}

fn check(orchestrator: &JobOrchestrator, index: usize) -> Result<()> {
    if index < orchestrator.len() {
        return Ok(());
    }
    Err(ListError::OutOfRange {
        index,
        len: orchestrator.len(),
    }
    .into())
}
