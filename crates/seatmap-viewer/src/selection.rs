use indexmap::IndexSet;
use seatmap_core::SectionId;

/// The set of selected section ids, in the order they were selected.
///
/// This is the only record of what is selected; the `selected` class on
/// shapes is always written from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    ids: IndexSet<SectionId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership. Returns true if the section is now selected.
    pub fn toggle(&mut self, id: SectionId) -> bool {
        if self.ids.shift_remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: SectionId) -> bool {
        self.ids.contains(&id)
    }

    /// Empty the set, returning what was selected.
    pub fn clear(&mut self) -> Vec<SectionId> {
        self.ids.drain(..).collect()
    }

    pub fn ids(&self) -> Vec<SectionId> {
        self.ids.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_alternates() {
        let mut sel = SelectionState::new();
        let a = SectionId::intern("A1");
        for n in 1..=6 {
            let now = sel.toggle(a);
            assert_eq!(now, n % 2 == 1);
            assert_eq!(sel.contains(a), n % 2 == 1);
        }
    }

    #[test]
    fn order_follows_selection() {
        let mut sel = SelectionState::new();
        for id in ["C", "A", "B"] {
            sel.toggle(SectionId::intern(id));
        }
        sel.toggle(SectionId::intern("A"));
        sel.toggle(SectionId::intern("A"));
        let binding = sel.ids();
        let ids: Vec<&str> = binding.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["C", "B", "A"]);
    }

    #[test]
    fn clear_returns_previous() {
        let mut sel = SelectionState::new();
        sel.toggle(SectionId::intern("A"));
        assert_eq!(sel.clear(), vec![SectionId::intern("A")]);
        assert!(sel.is_empty());
    }
}
