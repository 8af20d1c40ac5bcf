use std::cell::RefCell;
use std::rc::Rc;

/// Id-keyed list of callbacks shared by the store and subjects.
///
/// Entries are handed out as `Rc` clones so a notification pass can run
/// while callbacks register or remove entries.
pub(crate) struct Registry<F: ?Sized> {
    next_id: u64,
    entries: Vec<(u64, Rc<RefCell<F>>)>,
}

impl<F: ?Sized> Default for Registry<F> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<F: ?Sized> Registry<F> {
    pub(crate) fn insert(&mut self, entry: Rc<RefCell<F>>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, entry));
        id
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Clone the current entries in registration order.
    pub(crate) fn snapshot(&self) -> Vec<(u64, Rc<RefCell<F>>)> {
        self.entries
            .iter()
            .map(|(id, entry)| (*id, Rc::clone(entry)))
            .collect()
    }
}
