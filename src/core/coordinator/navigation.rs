//! The navigation stack that coordinators push their screens onto.

use super::CoordinatorId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenKind {
    List,
    Details { recipe_id: String },
}

/// One screen on the stack and the coordinator that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenEntry {
    pub coordinator: CoordinatorId,
    pub title: String,
    pub kind: ScreenKind,
}

#[derive(Debug, Default)]
pub struct NavigationStack {
    screens: Vec<ScreenEntry>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole stack with a single root screen.
    pub fn set_root(&mut self, entry: ScreenEntry) {
        self.screens.clear();
        self.screens.push(entry);
    }

    pub fn push(&mut self, entry: ScreenEntry) {
        self.screens.push(entry);
    }

    /// Pops the top screen. The root screen stays.
    pub fn pop(&mut self) -> Option<ScreenEntry> {
        if self.screens.len() <= 1 {
            return None;
        }
        self.screens.pop()
    }

    /// Drops every screen owned by `coordinator`.
    pub fn remove_owned_by(&mut self, coordinator: CoordinatorId) {
        self.screens.retain(|entry| entry.coordinator != coordinator);
    }

    pub fn top(&self) -> Option<&ScreenEntry> {
        self.screens.last()
    }

    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    pub fn screens(&self) -> &[ScreenEntry] {
        &self.screens
    }
}
