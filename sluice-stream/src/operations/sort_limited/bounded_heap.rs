// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sluice_core::{Item, ItemComparator};
use std::cmp::Ordering;
use std::mem;

struct Ranked {
    item: Item,
    arrival: u64,
}

/// Total order used for ranking: the comparator (flipped when reversed),
/// then arrival, so equal items keep their input order.
struct Rank {
    comparator: ItemComparator,
    reversed: bool,
}

impl Rank {
    fn compare(&self, a: &Ranked, b: &Ranked) -> Ordering {
        let ord = self.comparator.compare(&a.item, &b.item);
        let ord = if self.reversed { ord.reverse() } else { ord };
        ord.then(a.arrival.cmp(&b.arrival))
    }
}

/// Retains the best `limit` items seen, or every item when unbounded.
///
/// Bounded, the entries form a binary max-heap on [`Rank`] so the worst
/// retained entry sits at the root. A candidate replaces it only when it
/// ranks strictly better; since later arrivals rank worse on ties, an equal
/// candidate never displaces an incumbent.
pub(crate) struct BoundedHeap {
    entries: Vec<Ranked>,
    limit: Option<usize>,
    rank: Rank,
    arrivals: u64,
}

impl BoundedHeap {
    pub(crate) fn new(comparator: ItemComparator, reversed: bool, limit: Option<usize>) -> Self {
        Self {
            entries: Vec::with_capacity(limit.unwrap_or_default()),
            limit,
            rank: Rank {
                comparator,
                reversed,
            },
            arrivals: 0,
        }
    }

    pub(crate) const fn limit(&self) -> Option<usize> {
        self.limit
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn push(&mut self, item: Item) {
        let candidate = Ranked {
            item,
            arrival: self.arrivals,
        };
        self.arrivals += 1;

        let Some(limit) = self.limit else {
            self.entries.push(candidate);
            return;
        };

        if self.entries.len() < limit {
            self.entries.push(candidate);
            sift_up(&mut self.entries, &self.rank);
        } else if self
            .entries
            .first()
            .is_some_and(|worst| self.rank.compare(&candidate, worst) == Ordering::Less)
        {
            self.entries[0] = candidate;
            sift_down(&mut self.entries, 0, &self.rank);
        }
    }

    /// Lower the bound, never raise it, and drop the excess immediately.
    pub(crate) fn apply_limit(&mut self, limit: usize) {
        let limit = self.limit.map_or(limit, |current| current.min(limit));
        self.limit = Some(limit);

        let rank = &self.rank;
        self.entries.sort_by(|a, b| rank.compare(a, b));
        self.entries.truncate(limit);
        // Sorted best-first; reversing yields a valid max-heap.
        self.entries.reverse();
    }

    /// All retained items, best first.
    pub(crate) fn drain_sorted(&mut self) -> Vec<Item> {
        let mut entries = mem::take(&mut self.entries);
        let rank = &self.rank;
        entries.sort_by(|a, b| rank.compare(a, b));
        entries.into_iter().map(|ranked| ranked.item).collect()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

fn sift_up(entries: &mut [Ranked], rank: &Rank) {
    let mut child = entries.len().saturating_sub(1);
    while child > 0 {
        let parent = (child - 1) / 2;
        if rank.compare(&entries[child], &entries[parent]) != Ordering::Greater {
            break;
        }
        entries.swap(child, parent);
        child = parent;
    }
}

fn sift_down(entries: &mut [Ranked], mut parent: usize, rank: &Rank) {
    loop {
        let left = 2 * parent + 1;
        let right = left + 1;
        let mut largest = parent;

        if left < entries.len()
            && rank.compare(&entries[left], &entries[largest]) == Ordering::Greater
        {
            largest = left;
        }
        if right < entries.len()
            && rank.compare(&entries[right], &entries[largest]) == Ordering::Greater
        {
            largest = right;
        }
        if largest == parent {
            return;
        }
        entries.swap(parent, largest);
        parent = largest;
    }
}
