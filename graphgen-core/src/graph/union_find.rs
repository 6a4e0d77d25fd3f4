//! Union-find over node positions, used to check weak connectivity.

#[derive(Clone, Debug)]
pub(super) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    components: usize,
}

impl DisjointSet {
    pub(super) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            components: n,
        }
    }

    pub(super) const fn components(&self) -> usize {
        self.components
    }

    pub(super) fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while let Some(&parent) = self.parent.get(root) {
            if parent == root {
                break;
            }
            root = parent;
        }

        while let Some(slot) = self.parent.get_mut(node) {
            if *slot == node {
                break;
            }
            let parent = *slot;
            *slot = root;
            node = parent;
        }

        root
    }

    pub(super) fn union(&mut self, left: usize, right: usize) {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return;
        }
        let left_rank = self.rank.get(left).copied().unwrap_or(0);
        let right_rank = self.rank.get(right).copied().unwrap_or(0);
        if left_rank < right_rank {
            std::mem::swap(&mut left, &mut right);
        }
        if let Some(slot) = self.parent.get_mut(right) {
            *slot = left;
        }
        if left_rank == right_rank
            && let Some(rank) = self.rank.get_mut(left)
        {
            *rank = left_rank.saturating_add(1);
        }
        self.components = self.components.saturating_sub(1);
    }
}
