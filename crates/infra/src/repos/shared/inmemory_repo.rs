use calarm_domain::Entity;
use std::sync::{Mutex, MutexGuard};

/// Useful functions for creating inmemory repositories.
/// They work on a locked collection so that repos can combine them atomically.

pub fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// Replaces the value with the same id or inserts it. Returns the replaced value.
pub fn upsert<T: Clone + Entity>(val: &T, collection: &mut Vec<T>) -> Option<T> {
    match collection.iter().position(|item| item.id() == val.id()) {
        Some(i) => Some(std::mem::replace(&mut collection[i], val.clone())),
        None => {
            collection.push(val.clone());
            None
        }
    }
}

pub fn find<T: Clone + Entity>(val_id: &str, collection: &[T]) -> Option<T> {
    collection.iter().find(|item| item.id() == val_id).cloned()
}

pub fn delete<T: Entity>(val_id: &str, collection: &mut Vec<T>) -> Option<T> {
    let i = collection.iter().position(|item| item.id() == val_id)?;
    Some(collection.remove(i))
}
