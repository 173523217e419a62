use std::fmt::Debug;
use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

/// Conversion between a typed identifier and its position in a [`KeyedVec`].
pub trait StorageKey: Clone {
    fn index(&self) -> usize;

    fn create_from_index(index: usize) -> Self;
}

impl StorageKey for usize {
    fn index(&self) -> usize {
        *self
    }

    fn create_from_index(index: usize) -> Self {
        index
    }
}

/// Dense storage addressed by a typed key.
///
/// Domains, propagators and automaton states are all numbered from zero; giving each its own key
/// type keeps a `DomainId` from indexing a table of states.
#[derive(PartialEq, Eq, Hash)]
pub struct KeyedVec<Key, Value> {
    values: Vec<Value>,
    key_type: PhantomData<fn(Key) -> Key>,
}

impl<Key, Value> KeyedVec<Key, Value> {
    fn from_values(values: Vec<Value>) -> Self {
        KeyedVec {
            values,
            key_type: PhantomData,
        }
    }
}

impl<Key, Value> Default for KeyedVec<Key, Value> {
    fn default() -> Self {
        KeyedVec::from_values(Vec::new())
    }
}

impl<Key, Value: Clone> Clone for KeyedVec<Key, Value> {
    fn clone(&self) -> Self {
        KeyedVec::from_values(self.values.clone())
    }
}

impl<Key, Value: Debug> Debug for KeyedVec<Key, Value> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.values).finish()
    }
}

impl<Key: StorageKey, Value> KeyedVec<Key, Value> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Appends `value`, returning the key under which it is stored.
    pub fn push(&mut self, value: Value) -> Key {
        let key = Key::create_from_index(self.values.len());
        self.values.push(value);
        key
    }

    pub fn get(&self, key: Key) -> Option<&Value> {
        self.values.get(key.index())
    }

    pub fn keys(&self) -> impl Iterator<Item = Key> {
        (0..self.values.len()).map(Key::create_from_index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Value> {
        self.values.iter_mut()
    }
}

impl<Key: StorageKey, Value: Clone> KeyedVec<Key, Value> {
    /// Grows the storage until `key` is valid; new positions hold `filler`.
    pub(crate) fn accomodate(&mut self, key: Key, filler: Value) {
        let required = key.index() + 1;
        if self.values.len() < required {
            self.values.resize(required, filler);
        }
    }
}

impl<Key: StorageKey, Value> Index<Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, key: Key) -> &Value {
        &self.values[key.index()]
    }
}

impl<Key: StorageKey, Value> Index<&Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, key: &Key) -> &Value {
        &self.values[key.index()]
    }
}

impl<Key: StorageKey, Value> IndexMut<Key> for KeyedVec<Key, Value> {
    fn index_mut(&mut self, key: Key) -> &mut Value {
        &mut self.values[key.index()]
    }
}

impl<Key, Value> FromIterator<Value> for KeyedVec<Key, Value> {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        KeyedVec::from_values(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_the_index_of_the_value() {
        let mut keyed_vec: KeyedVec<usize, &str> = KeyedVec::default();
        let first = keyed_vec.push("first");
        let second = keyed_vec.push("second");

        assert_eq!((0, 1), (first, second));
        assert_eq!("second", keyed_vec[second]);
        assert_eq!(vec![0, 1], keyed_vec.keys().collect::<Vec<_>>());
    }

    #[test]
    fn accomodate_only_grows() {
        let mut keyed_vec: KeyedVec<usize, bool> = KeyedVec::default();
        keyed_vec.accomodate(3, false);
        keyed_vec[3] = true;
        keyed_vec.accomodate(1, false);

        assert_eq!(4, keyed_vec.len());
        assert!(keyed_vec[3]);
    }
}
