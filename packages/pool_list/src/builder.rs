use std::any::type_name;
use std::fmt;

use crate::{Event, FactoryError, Lifecycle, NoopLifecycle, PoolList, Poolable};

pub(crate) type BoxedFactory<T> = Box<dyn FnMut() -> Result<T, FactoryError>>;
pub(crate) type BoxedRelease<T> = Box<dyn FnMut(&mut T)>;

/// Builder for creating an instance of [`PoolList`].
///
/// You only need to use this builder if you want to customize the pool list. The constructors
/// [`PoolList::new()`][1], [`PoolList::with_fallible_factory()`][2] and
/// [`PoolList::with_default()`][3] are sufficient when only a factory is needed.
///
/// # Examples
///
/// ```
/// use pool_list::PoolList;
///
/// let list = PoolList::builder(String::new)
///     .capacity(16)
///     .on_item_added(|item: &String| println!("activated {item:?}"))
///     .build();
///
/// assert!(list.is_empty());
/// ```
///
/// [1]: PoolList::new
/// [2]: PoolList::with_fallible_factory
/// [3]: PoolList::with_default
#[must_use]
pub struct PoolListBuilder<T> {
    factory: BoxedFactory<T>,
    lifecycle: Box<dyn Lifecycle<T>>,
    release: Option<BoxedRelease<T>>,
    capacity: usize,
    item_added: Event<T>,
    item_deactivated: Event<T>,
}

impl<T> fmt::Debug for PoolListBuilder<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("releases_items", &self.release.is_some())
            .field("capacity", &self.capacity)
            .field("item_added", &self.item_added)
            .field("item_deactivated", &self.item_deactivated)
            .finish_non_exhaustive()
    }
}

impl<T> PoolListBuilder<T> {
    pub(crate) fn new(factory: BoxedFactory<T>) -> Self {
        Self {
            factory,
            lifecycle: Box::new(NoopLifecycle),
            release: None,
            capacity: 0,
            item_added: Event::new(),
            item_deactivated: Event::new(),
        }
    }

    /// Sets the hooks that run when items are activated and deactivated.
    ///
    /// Replaces any previously configured lifecycle.
    ///
    /// # Examples
    ///
    /// ```
    /// use pool_list::{Lifecycle, PoolList};
    ///
    /// struct ZeroOnActivate;
    ///
    /// impl Lifecycle<u64> for ZeroOnActivate {
    ///     fn activate(&mut self, item: &mut u64) {
    ///         *item = 0;
    ///     }
    /// }
    ///
    /// let mut list = PoolList::builder(|| 99_u64)
    ///     .lifecycle(ZeroOnActivate)
    ///     .build();
    ///
    /// assert_eq!(*list.acquire().unwrap(), 0);
    /// ```
    pub fn lifecycle<L>(mut self, lifecycle: L) -> Self
    where
        L: Lifecycle<T> + 'static,
    {
        self.lifecycle = Box::new(lifecycle);
        self
    }

    /// Calls [`Poolable::on_release()`] on every item the pool list deactivates.
    ///
    /// The release hook runs before the lifecycle's deactivation hook.
    ///
    /// [`PoolList::new_poolable()`] is a shorthand for a pool list that only needs this.
    #[allow(
        clippy::redundant_closure_for_method_calls,
        reason = "the T::on_release fn item would require T: 'static, the closure does not"
    )]
    pub fn release_poolable_items(self) -> Self
    where
        T: Poolable,
    {
        self.on_release(|item: &mut T| item.on_release())
    }

    /// Calls `release` on every item the pool list deactivates.
    ///
    /// This is the same mechanism as [`release_poolable_items()`][Self::release_poolable_items]
    /// for item types that do not (or cannot) implement [`Poolable`]. The hook may capture
    /// state. Replaces any previously configured release hook.
    ///
    /// # Examples
    ///
    /// ```
    /// use pool_list::PoolList;
    ///
    /// let mut list = PoolList::builder(Vec::<u8>::new)
    ///     .on_release(Vec::clear)
    ///     .build();
    ///
    /// list.acquire().unwrap().push(1);
    /// list.clear();
    ///
    /// assert!(list.acquire().unwrap().is_empty());
    /// ```
    pub fn on_release<F>(mut self, release: F) -> Self
    where
        F: FnMut(&mut T) + 'static,
    {
        self.release = Some(Box::new(release));
        self
    }

    /// Pre-allocates storage for `capacity` active items.
    ///
    /// This only sizes the bookkeeping storage. No items are created until they are acquired.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Subscribes a handler to the `item_added` event of the pool list being built.
    ///
    /// Further handlers can be subscribed after building via [`PoolList::item_added()`].
    pub fn on_item_added<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&T) + 'static,
    {
        self.item_added.subscribe(handler);
        self
    }

    /// Subscribes a handler to the `item_deactivated` event of the pool list being built.
    ///
    /// Further handlers can be subscribed after building via [`PoolList::item_deactivated()`].
    pub fn on_item_deactivated<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&T) + 'static,
    {
        self.item_deactivated.subscribe(handler);
        self
    }

    /// Builds the pool list with the specified configuration.
    ///
    /// The pool list starts empty: the factory is not called until the first item is acquired.
    ///
    /// # Examples
    ///
    /// ```
    /// use pool_list::PoolList;
    ///
    /// let list = PoolList::builder(|| 0_u8).build();
    ///
    /// assert_eq!(list.len(), 0);
    /// assert_eq!(list.inactive_len(), 0);
    /// ```
    #[must_use]
    pub fn build(self) -> PoolList<T> {
        PoolList::new_inner(
            self.factory,
            self.lifecycle,
            self.release,
            self.capacity,
            self.item_added,
            self.item_deactivated,
        )
    }
}
