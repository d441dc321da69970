use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Minimal contract of anything kept in an ordered collection.
///
/// `id` is `None` until the entity has been persisted. `position` is the
/// zero-based slot of the entity within its collection (or within its parent,
/// for owned children).
pub trait Movable {
    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: Option<i64>);

    fn position(&self) -> i32;

    fn set_position(&mut self, position: i32);
}

/// A catalog root entity that can be cached and persisted.
pub trait Entity: Movable + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Type name used in errors and log events.
    const KIND: &'static str;

    /// Assigns ids to this entity and to every owned child that has none.
    ///
    /// Aggregates override this to walk their children; `next_id` yields a
    /// fresh id on every call.
    fn assign_ids(&mut self, next_id: &mut dyn FnMut() -> i64) {
        assign_missing_id(self, next_id);
    }

    /// Largest id held by this entity or any owned child.
    ///
    /// Id sequences start above this so generated ids never collide with
    /// ids the caller supplied.
    fn max_id(&self) -> Option<i64> {
        self.id()
    }
}

/// Produces a structurally independent copy of an entity and all of its
/// owned children, with every id cleared.
pub type CopyStrategy<T> = Arc<dyn Fn(&T) -> T + Send + Sync>;

/// Gives `movable` a fresh id when it has none yet.
pub fn assign_missing_id<M: Movable + ?Sized>(movable: &mut M, next_id: &mut dyn FnMut() -> i64) {
    if movable.id().is_none() {
        movable.set_id(Some(next_id()));
    }
}

/// Returns true if positions run `0..len` in slice order.
pub fn is_contiguous<M: Movable>(items: &[M]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(index, item)| i64::from(item.position()) == index as i64)
}
