use std::hash::Hash;

use hashbrown::HashMap;

/// Disjoint-set forest over any hashable element type.
///
/// Elements are registered with [`add`](Self::add) (idempotent) or implicitly
/// by [`find`](Self::find)/[`union`](Self::union). `find` compresses paths,
/// `union` merges by rank.
#[derive(Debug, Clone, Default)]
pub struct DisjointSet<T> {
    index: HashMap<T, usize>,
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl<T: Eq + Hash + Clone> DisjointSet<T> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            parent: Vec::new(),
            rank: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            parent: Vec::with_capacity(capacity),
            rank: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Registers `item` as a singleton set. Returns `true` only if it was not
    /// present before.
    pub fn add(&mut self, item: T) -> bool {
        if self.index.contains_key(&item) {
            return false;
        }
        let slot = self.parent.len();
        self.index.insert(item, slot);
        self.parent.push(slot);
        self.rank.push(0);
        true
    }

    /// Returns the representative slot of `item`'s set, registering `item`
    /// first if it is new.
    pub fn find(&mut self, item: &T) -> usize {
        let slot = match self.index.get(item) {
            Some(&slot) => slot,
            None => {
                self.add(item.clone());
                self.parent.len() - 1
            }
        };
        self.find_slot(slot)
    }

    /// Merges the sets of `a` and `b`. Returns whether they were in different
    /// sets before the call; unioning an element with itself is `false`.
    pub fn union(&mut self, a: &T, b: &T) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }

        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }

    fn find_slot(&mut self, slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // compress the walked path
        let mut cur = slot;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }
}
