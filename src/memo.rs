use parking_lot::Mutex;

/// Single-slot cache keyed by the inputs of a computation.
///
/// The value is recomputed only when the key differs from the one it was
/// last computed with.
#[derive(Debug)]
pub struct Memo<K, V> {
    slot: Mutex<Option<(K, V)>>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }
}

impl<K: PartialEq, V: Clone> Memo<K, V> {
    pub fn get_or_compute(&self, key: K, compute: impl FnOnce() -> V) -> V {
        let mut slot = self.slot.lock();
        if let Some((cached_key, value)) = slot.as_ref() {
            if *cached_key == key {
                return value.clone();
            }
        }
        let value = compute();
        *slot = Some((key, value.clone()));
        value
    }

    pub fn invalidate(&self) {
        *self.slot.lock() = None;
    }

    pub fn is_cached(&self, key: &K) -> bool {
        matches!(self.slot.lock().as_ref(), Some((cached, _)) if cached == key)
    }
}
