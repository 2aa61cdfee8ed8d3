use std::collections::HashMap;
use std::rc::Rc;

/// ## Name registry
///
/// Maps names to entities, remembering first-insertion order. Setting an
/// existing name overwrites it in place. Nothing is ever removed.

#[derive(Debug)]
pub struct Registry<T> {
    keys: Vec<Rc<str>>,
    values: Vec<T>,
    positions: HashMap<Rc<str>, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Registry {
            keys: vec![],
            values: vec![],
            positions: HashMap::new(),
        }
    }
}

impl<T> Registry<T> {
    pub fn new() -> Registry<T> {
        Registry::default()
    }

    /// Returns the position of `key`.
    pub fn set(&mut self, key: &str, value: T) -> usize {
        if let Some(index) = self.index(key) {
            self.values[index] = value;
            return index;
        }
        let key: Rc<str> = key.into();
        let index = self.values.len();
        self.keys.push(key.clone());
        self.values.push(value);
        self.positions.insert(key, index);
        index
    }

    pub fn index(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    pub fn find(&self, key: &str) -> Option<&T> {
        self.get(self.index(key)?)
    }

    pub fn key(&self, index: usize) -> Option<&str> {
        self.keys.get(index).map(|k| k.as_ref())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.keys.iter().map(|k| k.as_ref()).zip(self.values.iter())
    }
}
