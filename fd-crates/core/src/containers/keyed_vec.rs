use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

/// Conversion between a typed id and a position in a [`KeyedVec`].
pub trait StorageKey {
    fn index(&self) -> usize;

    fn create_from_index(index: usize) -> Self;
}

/// A `Vec<Value>` indexed by a typed id instead of a `usize`, so that e.g. a domain id cannot
/// be used to index the propagators.
#[derive(Debug)]
pub struct KeyedVec<Key, Value> {
    elements: Vec<Value>,
    key: PhantomData<Key>,
}

impl<Key, Value: Clone> Clone for KeyedVec<Key, Value> {
    fn clone(&self) -> Self {
        KeyedVec {
            elements: self.elements.clone(),
            key: PhantomData,
        }
    }
}

impl<Key, Value> Default for KeyedVec<Key, Value> {
    fn default() -> Self {
        KeyedVec {
            elements: Vec::new(),
            key: PhantomData,
        }
    }
}

impl<Key: StorageKey, Value> KeyedVec<Key, Value> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Appends `value` and returns the key under which it is stored.
    pub fn push(&mut self, value: Value) -> Key {
        let key = Key::create_from_index(self.elements.len());
        self.elements.push(value);
        key
    }

    pub fn get(&self, key: Key) -> Option<&Value> {
        self.elements.get(key.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.elements.iter()
    }

    /// Pads with copies of `filler` until `key` is in range.
    pub(crate) fn extend_to_include(&mut self, key: Key, filler: Value)
    where
        Value: Clone,
    {
        let required = key.index() + 1;
        if required > self.elements.len() {
            self.elements.resize(required, filler);
        }
    }
}

impl<Key: StorageKey, Value> Index<Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, key: Key) -> &Value {
        &self.elements[key.index()]
    }
}

impl<Key: StorageKey, Value> IndexMut<Key> for KeyedVec<Key, Value> {
    fn index_mut(&mut self, key: Key) -> &mut Value {
        &mut self.elements[key.index()]
    }
}
