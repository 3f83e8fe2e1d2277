use hashbrown::HashMap;

/// Key to row positions, in log order.
pub type VecIndex<K> = HashMap<K, Vec<usize>>;

/// Builds a [`VecIndex`] over `items` keyed by `key`.
pub fn build_index<T, K, F>(items: &[T], key: F) -> VecIndex<K>
where
    K: std::hash::Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut index = VecIndex::new();
    for (pos, item) in items.iter().enumerate() {
        index.entry(key(item)).or_default().push(pos);
    }
    index
}
