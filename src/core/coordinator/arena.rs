//! Generational arena holding the coordinator tree.
//!
//! Parents hold their children by id and children point back at their
//! delegate by id. Neither keeps the other alive. A released slot bumps its
//! generation, so an id that outlived its coordinator resolves to `None`
//! instead of to whatever reuses the slot.

use super::Coordinator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinatorId {
    index: u32,
    generation: u32,
}

impl CoordinatorId {
    /// An id that never resolves in any arena.
    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self {
            index: u32::MAX,
            generation: u32::MAX,
        }
    }
}

/// A live coordinator plus its links in the tree.
pub struct Node {
    /// Notified when this coordinator finishes. Non-owning.
    pub delegate: Option<CoordinatorId>,
    pub children: Vec<CoordinatorId>,
    pub coordinator: Coordinator,
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Default)]
pub struct Arena {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves a slot and builds the coordinator with its own id.
    pub fn insert(
        &mut self,
        delegate: Option<CoordinatorId>,
        build: impl FnOnce(CoordinatorId) -> Coordinator,
    ) -> CoordinatorId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: None,
                });
                (self.slots.len() - 1) as u32
            }
        };

        let slot = &mut self.slots[index as usize];
        let id = CoordinatorId {
            index,
            generation: slot.generation,
        };
        slot.node = Some(Node {
            delegate,
            children: Vec::new(),
            coordinator: build(id),
        });
        id
    }

    pub fn get(&self, id: CoordinatorId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, id: CoordinatorId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn contains(&self, id: CoordinatorId) -> bool {
        self.get(id).is_some()
    }

    /// Releases the slot. Every outstanding copy of `id` goes dead.
    pub fn remove(&mut self, id: CoordinatorId) -> Option<Node> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(node)
    }

    /// Number of live coordinators.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinator::AppCoordinator;
    use crate::test_support::{StubSource, stub_repository};
    use std::sync::Arc;

    fn root() -> Coordinator {
        Coordinator::App(AppCoordinator::new(stub_repository(Arc::new(
            StubSource::new(Vec::new()),
        ))))
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut arena = Arena::new();
        let id = arena.insert(None, |_| root());
        assert!(arena.contains(id));
        assert_eq!(arena.len(), 1);
        assert!(arena.get(id).unwrap().delegate.is_none());
    }

    #[test]
    fn test_released_id_resolves_to_none_even_after_slot_reuse() {
        let mut arena = Arena::new();
        let first = arena.insert(None, |_| root());
        assert!(arena.remove(first).is_some());
        assert!(arena.remove(first).is_none());

        let second = arena.insert(None, |_| root());
        assert_ne!(first, second);
        assert!(arena.get(first).is_none());
        assert!(arena.get(second).is_some());
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_builder_receives_its_own_id() {
        let mut arena = Arena::new();
        let mut seen = None;
        let id = arena.insert(None, |id| {
            seen = Some(id);
            root()
        });
        assert_eq!(seen, Some(id));
    }

    #[test]
    fn test_foreign_id_never_resolves() {
        let arena = Arena::new();
        assert!(arena.get(CoordinatorId::for_tests()).is_none());
        assert!(arena.is_empty());
    }
}
