use crate::arena::NodeArena;
use crate::tree::SplayTree;

pub(crate) fn int_tree(keys: &[i64]) -> SplayTree<i64, ()> {
    let mut tree = SplayTree::new();
    for &key in keys {
        tree.insert_or_find(key, ()).unwrap();
    }
    tree
}

pub(crate) fn keys_of<V, A: NodeArena<i64, V>>(tree: &SplayTree<i64, V, A>) -> Vec<i64> {
    tree.iter().map(|(key, _)| *key).collect()
}
