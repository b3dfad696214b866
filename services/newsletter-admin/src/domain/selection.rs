use std::collections::HashSet;

use crate::domain::{Subscriber, SubscriberDirectory};

/// The subset of the directory chosen to receive the next broadcast.
///
/// The selection is always a subset of the directory it was last synchronized with.
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    /// Distinct addresses of the directory, in directory order.
    universe: Vec<Subscriber>,
    selected: HashSet<Subscriber>,
    initialized: bool,
}

impl SelectionModel {
    /// Re-derive the selection from a freshly fetched directory.
    ///
    /// On the first population everything is selected. Afterwards, the selection keeps only
    /// the addresses still present in the directory; new addresses start unselected.
    pub fn sync(&mut self, directory: &SubscriberDirectory) {
        if !directory.is_populated() {
            return;
        }
        self.universe = directory.addresses().into_iter().cloned().collect();
        if self.initialized {
            let universe: HashSet<&Subscriber> = self.universe.iter().collect();
            self.selected.retain(|subscriber| universe.contains(subscriber));
        } else {
            self.initialized = true;
            self.select_all();
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.universe.iter().cloned().collect();
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Select everything unless everything is already selected, in which case deselect all.
    /// A partial selection goes to the full selection.
    pub fn toggle_all(&mut self) {
        if self.is_all_selected() {
            self.deselect_all();
        } else {
            self.select_all();
        }
    }

    /// Flip the selection of one address. Addresses outside the directory are ignored.
    pub fn toggle_one(&mut self, address: &Subscriber) {
        if !self.universe.contains(address) {
            return;
        }
        if !self.selected.remove(address) {
            self.selected.insert(address.clone());
        }
    }

    pub fn is_selected(&self, address: &Subscriber) -> bool {
        self.selected.contains(address)
    }

    pub fn is_all_selected(&self) -> bool {
        self.selected.len() == self.universe.len()
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The selected addresses, in directory order.
    pub fn recipients(&self) -> Vec<Subscriber> {
        self.universe
            .iter()
            .filter(|subscriber| self.selected.contains(*subscriber))
            .cloned()
            .collect()
    }
}
