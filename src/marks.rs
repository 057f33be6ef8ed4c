use std::{fmt, ops};

use crate::graph::CellId;

/// Observer called with the cell and its new value, only on an actual flip.
pub type MarkObserver = Box<dyn FnMut(CellId, bool) + Send>;

/// Dense per-cell boolean state with a configurable default and change
/// notification.
///
/// Every generator run owns two of these (visited and highlighted cells);
/// they are scoped to that run and discarded afterward.
pub struct Marks {
    bits: Vec<bool>,
    default: bool,
    observer: Option<MarkObserver>,
}

impl Marks {
    pub fn new(len: usize, default: bool) -> Self {
        Self {
            bits: vec![default; len],
            default,
            observer: None,
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn default_value(&self) -> bool {
        self.default
    }

    pub fn set_observer(&mut self, observer: MarkObserver) {
        self.observer = Some(observer);
    }

    pub fn get(&self, cell: CellId) -> bool {
        self.bits.get(cell.index()).copied().unwrap_or(self.default)
    }

    /// Sets the mark of `cell`, returning whether the value actually flipped.
    /// The observer fires only on a flip.
    pub fn set(&mut self, cell: CellId, value: bool) -> bool {
        let slot = &mut self.bits[cell.index()];
        if *slot == value {
            return false;
        }
        *slot = value;
        if let Some(observer) = &mut self.observer {
            observer(cell, value);
        }
        true
    }

    /// Sets every cell to `value`, notifying per flipped cell.
    pub fn set_all(&mut self, value: bool) {
        for i in 0..self.bits.len() {
            self.set(CellId(i as i32), value);
        }
    }

    /// Back to the configured default everywhere.
    pub fn reset(&mut self) {
        self.set_all(self.default);
    }

    pub fn count(&self, value: bool) -> usize {
        self.bits.iter().filter(|&&bit| bit == value).count()
    }

    pub fn all(&self, value: bool) -> bool {
        self.bits.iter().all(|&bit| bit == value)
    }
}

impl ops::Index<CellId> for Marks {
    type Output = bool;

    /// Returns the value at the cell, or the default out of bounds.
    fn index(&self, cell: CellId) -> &Self::Output {
        self.bits.get(cell.index()).unwrap_or(&self.default)
    }
}

impl fmt::Debug for Marks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Marks")
            .field("bits", &self.bits)
            .field("default", &self.default)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[test]
    fn observer_fires_once_per_flip() {
        let mut marks = Marks::new(4, false);
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        marks.set_observer(Box::new(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        assert!(marks.set(CellId(2), true));
        assert!(!marks.set(CellId(2), true));
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        assert!(marks.set(CellId(2), false));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn set_all_reaches_every_cell() {
        let mut marks = Marks::new(5, false);
        marks.set_all(true);
        assert!(marks.all(true));
        assert_eq!(marks.count(true), 5);
        marks.reset();
        assert!(marks.all(false));
    }

    #[test]
    fn default_true_starts_marked() {
        let marks = Marks::new(3, true);
        assert!(marks.get(CellId(0)));
        assert_eq!(marks.count(true), 3);
    }
}
