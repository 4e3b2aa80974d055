/// Hooks that run when an item of a [`PoolList`][crate::PoolList] changes between the active
/// and inactive states.
///
/// Both hooks default to doing nothing, so an implementation only overrides what it needs.
///
/// * [`activate()`][Self::activate] runs when an item enters the active sequence, whether it was
///   just created by the factory or taken back out of the reserve. It runs before the
///   `item_added` event fires.
/// * [`deactivate()`][Self::deactivate] runs when an item leaves the active sequence, after the
///   item's release hook (if any) and before the item is pushed onto the reserve.
///
/// A reused item still carries whatever state it had when it was deactivated. If that state
/// must not be visible after reuse, reset it in [`activate()`][Self::activate].
///
/// # Example
///
/// ```rust
/// use pool_list::{Lifecycle, PoolList};
///
/// #[derive(Debug, Default)]
/// struct Sprite {
///     visible: bool,
/// }
///
/// struct ToggleVisibility;
///
/// impl Lifecycle<Sprite> for ToggleVisibility {
///     fn activate(&mut self, item: &mut Sprite) {
///         item.visible = true;
///     }
///
///     fn deactivate(&mut self, item: &mut Sprite) {
///         item.visible = false;
///     }
/// }
///
/// let mut sprites = PoolList::builder(Sprite::default)
///     .lifecycle(ToggleVisibility)
///     .build();
///
/// sprites.scope(2).unwrap();
/// assert!(sprites.iter().all(|sprite| sprite.visible));
///
/// sprites.clear();
/// assert!(sprites.is_empty());
/// ```
pub trait Lifecycle<T> {
    /// Called when `item` becomes active.
    fn activate(&mut self, item: &mut T) {
        _ = item;
    }

    /// Called when `item` stops being active.
    fn deactivate(&mut self, item: &mut T) {
        _ = item;
    }
}

/// The lifecycle used when none is configured. Does nothing.
#[derive(Debug, Default)]
pub(crate) struct NoopLifecycle;

impl<T> Lifecycle<T> for NoopLifecycle {}

/// Implemented by items that want to clear their own state when a pool list deactivates them.
///
/// This is an optional capability: a pool list only calls [`on_release()`][Self::on_release] if
/// it was created with [`PoolList::new_poolable()`][crate::PoolList::new_poolable],
/// [`PoolList::with_default_poolable()`][crate::PoolList::with_default_poolable] or built with
/// [`release_poolable_items()`][crate::PoolListBuilder::release_poolable_items].
/// Item types that do not implement this trait can be pooled all the same.
///
/// On deactivation the release hook runs before [`Lifecycle::deactivate()`], so the item has
/// already cleared itself by the time the container-level hook sees it.
///
/// # Example
///
/// ```rust
/// use pool_list::{PoolList, Poolable};
///
/// #[derive(Default)]
/// struct Scratch {
///     buffer: Vec<u8>,
/// }
///
/// impl Poolable for Scratch {
///     fn on_release(&mut self) {
///         // Keeps the allocation, forgets the contents.
///         self.buffer.clear();
///     }
/// }
///
/// let mut list = PoolList::builder(Scratch::default)
///     .release_poolable_items()
///     .build();
///
/// list.acquire().unwrap().buffer.extend_from_slice(b"frame data");
/// list.clear();
///
/// let reused = list.acquire().unwrap();
/// assert!(reused.buffer.is_empty());
/// assert!(reused.buffer.capacity() >= 10);
/// ```
pub trait Poolable {
    /// Called when the item transitions from active to inactive.
    fn on_release(&mut self);
}
