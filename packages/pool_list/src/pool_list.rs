use std::any::type_name;
use std::ops::{Index, IndexMut};
use std::{fmt, mem, slice, vec};

use tracing::{debug, trace};

use crate::builder::{BoxedFactory, BoxedRelease};
use crate::{Error, Event, FactoryError, Lifecycle, PoolListBuilder, Poolable, Result};

/// An ordered, indexable list of active items that recycles items instead of dropping them.
///
/// The list owns two collections:
///
/// * The **active** sequence: the items currently in use, in the order they were acquired. This
///   is what indexing, iteration and [`len()`][1] operate on.
/// * The **reserve**: items that were active before but have been deactivated. The reserve is a
///   stack - the most recently deactivated item is the first to be reused.
///
/// Every item the list owns is in exactly one of these. New items are only created by the factory
/// supplied at construction, and only when the reserve is empty and the active sequence needs to
/// grow.
///
/// The typical way to drive the list is [`scope()`][2], which grows or shrinks the active sequence
/// to a target count, or [`apply_with()`][3], which scopes the list to the length of another
/// slice and pairs the two positionally.
///
/// # Hooks and events
///
/// * A [`Lifecycle`] runs when items enter and leave the active sequence.
/// * An optional release hook ([`Poolable`][4] or a closure) lets items clear their own state
///   on deactivation. It is opt-in: see [`new_poolable()`][7] and [`builder()`][8].
/// * The [`item_added()`][5] and [`item_deactivated()`][6] events notify subscribers of every
///   membership change.
///
/// # Thread safety
///
/// The list is a single-owner structure: it is neither `Send` nor `Sync`.
///
/// # Example
///
/// ```rust
/// use pool_list::PoolList;
///
/// let mut labels = PoolList::new(String::new);
///
/// let names = ["Alice", "Bob", "Charlie"];
/// labels
///     .apply_with(&names, |name, label| {
///         label.clear();
///         label.push_str(name);
///     })
///     .unwrap();
///
/// assert_eq!(labels.len(), 3);
/// assert_eq!(labels[1], "Bob");
///
/// // Shrinking keeps the deactivated items around for reuse.
/// labels.scope(1).unwrap();
/// assert_eq!(labels.len(), 1);
/// assert_eq!(labels.inactive_len(), 2);
/// ```
///
/// [1]: Self::len
/// [2]: Self::scope
/// [3]: Self::apply_with
/// [4]: crate::Poolable
/// [5]: Self::item_added
/// [6]: Self::item_deactivated
/// [7]: Self::new_poolable
/// [8]: Self::builder
pub struct PoolList<T> {
    /// Items in use, in acquisition order.
    active: Vec<T>,

    /// Deactivated items, used as a stack. Every item here has passed through deactivation.
    reserve: Vec<T>,

    factory: BoxedFactory<T>,
    lifecycle: Box<dyn Lifecycle<T>>,
    release: Option<BoxedRelease<T>>,

    item_added: Event<T>,
    item_deactivated: Event<T>,
}

impl<T> PoolList<T> {
    pub(crate) fn new_inner(
        factory: BoxedFactory<T>,
        lifecycle: Box<dyn Lifecycle<T>>,
        release: Option<BoxedRelease<T>>,
        capacity: usize,
        item_added: Event<T>,
        item_deactivated: Event<T>,
    ) -> Self {
        Self {
            active: Vec::with_capacity(capacity),
            reserve: Vec::new(),
            factory,
            lifecycle,
            release,
            item_added,
            item_deactivated,
        }
    }

    /// Creates an empty pool list that creates new items with `factory`.
    ///
    /// No release hook is configured, even if `T` implements [`Poolable`]. Use
    /// [`new_poolable()`][Self::new_poolable] or the [builder][Self::builder] for that.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pool_list::PoolList;
    ///
    /// let mut list = PoolList::new(|| vec![0_u8; 64]);
    /// assert!(list.is_empty());
    ///
    /// let buffer = list.acquire().unwrap();
    /// assert_eq!(buffer.len(), 64);
    /// ```
    #[must_use]
    pub fn new<F>(factory: F) -> Self
    where
        F: FnMut() -> T + 'static,
    {
        Self::builder(factory).build()
    }

    /// Creates an empty pool list whose factory may fail.
    ///
    /// A factory failure surfaces as [`Error::Factory`] from whichever operation needed the new
    /// item.
    ///
    /// No release hook is configured, even if `T` implements [`Poolable`]. Use
    /// [`builder_fallible()`][Self::builder_fallible] with
    /// [`release_poolable_items()`][PoolListBuilder::release_poolable_items] for that.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pool_list::PoolList;
    ///
    /// let mut remaining = 2_u32;
    /// let mut list = PoolList::with_fallible_factory(move || {
    ///     if remaining == 0 {
    ///         return Err("no more handles");
    ///     }
    ///
    ///     remaining -= 1;
    ///     Ok(remaining)
    /// });
    ///
    /// assert!(list.scope(3).is_err());
    ///
    /// // Growth is not rolled back: the two items created before the failure are active.
    /// assert_eq!(list.len(), 2);
    /// ```
    #[must_use]
    pub fn with_fallible_factory<F, E>(factory: F) -> Self
    where
        F: FnMut() -> std::result::Result<T, E> + 'static,
        E: Into<FactoryError>,
    {
        Self::builder_fallible(factory).build()
    }

    /// Creates an empty pool list that creates new items with [`Default::default()`].
    ///
    /// No release hook is configured, even if `T` implements [`Poolable`]. Use
    /// [`with_default_poolable()`][Self::with_default_poolable] for that.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pool_list::PoolList;
    ///
    /// let mut list = PoolList::<u32>::with_default();
    /// list.scope(2).unwrap();
    ///
    /// assert_eq!(list.as_slice(), &[0, 0]);
    /// ```
    #[must_use]
    #[allow(
        clippy::redundant_closure_for_method_calls,
        reason = "the T::default fn item would require T: 'static, the closure does not"
    )]
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|| T::default())
    }

    /// Creates an empty pool list of [`Poolable`] items that creates new items with `factory`.
    ///
    /// [`Poolable::on_release()`] is called on every item the list deactivates.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pool_list::{PoolList, Poolable};
    ///
    /// struct Scratch(Vec<u8>);
    ///
    /// impl Poolable for Scratch {
    ///     fn on_release(&mut self) {
    ///         self.0.clear();
    ///     }
    /// }
    ///
    /// let mut list = PoolList::new_poolable(|| Scratch(Vec::with_capacity(256)));
    ///
    /// list.acquire().unwrap().0.push(7);
    /// list.clear();
    ///
    /// assert!(list.acquire().unwrap().0.is_empty());
    /// ```
    #[must_use]
    pub fn new_poolable<F>(factory: F) -> Self
    where
        T: Poolable,
        F: FnMut() -> T + 'static,
    {
        Self::builder(factory).release_poolable_items().build()
    }

    /// Creates an empty pool list of [`Poolable`] items that creates new items with
    /// [`Default::default()`].
    ///
    /// [`Poolable::on_release()`] is called on every item the list deactivates.
    #[must_use]
    #[allow(
        clippy::redundant_closure_for_method_calls,
        reason = "the T::default fn item would require T: 'static, the closure does not"
    )]
    pub fn with_default_poolable() -> Self
    where
        T: Default + Poolable,
    {
        Self::new_poolable(|| T::default())
    }

    /// Starts building a new [`PoolList`] with an infallible factory.
    ///
    /// Use this when you want to configure hooks, events or capacity up front.
    pub fn builder<F>(mut factory: F) -> PoolListBuilder<T>
    where
        F: FnMut() -> T + 'static,
    {
        PoolListBuilder::new(Box::new(move || Ok::<T, FactoryError>(factory())))
    }

    /// Starts building a new [`PoolList`] with a factory that may fail.
    pub fn builder_fallible<F, E>(mut factory: F) -> PoolListBuilder<T>
    where
        F: FnMut() -> std::result::Result<T, E> + 'static,
        E: Into<FactoryError>,
    {
        PoolListBuilder::new(Box::new(move || factory().map_err(Into::<FactoryError>::into)))
    }

    /// The number of active items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether there are no active items.
    ///
    /// An empty pool list may still be holding inactive items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// The number of inactive items waiting in the reserve to be reused.
    #[must_use]
    pub fn inactive_len(&self) -> usize {
        self.reserve.len()
    }

    /// The number of items owned by the pool list, active and inactive.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.active
            .len()
            .checked_add(self.reserve.len())
            .expect("both collections are in memory at the same time so their sum cannot overflow")
    }

    /// The number of active items the list can hold without reallocating its bookkeeping storage.
    #[must_use]
    pub fn active_capacity(&self) -> usize {
        self.active.capacity()
    }

    /// Reserves bookkeeping storage for at least `additional` more active items.
    ///
    /// No items are created.
    #[cfg_attr(test, mutants::skip)] // Only affects allocation behavior.
    pub fn reserve_capacity(&mut self, additional: usize) {
        self.active.reserve(additional);
    }

    /// Gets a reference to the active item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index` is not less than [`len()`][Self::len].
    ///
    /// # Example
    ///
    /// ```rust
    /// use pool_list::{Error, PoolList};
    ///
    /// let mut list = PoolList::new(|| 7_u32);
    /// list.scope(1).unwrap();
    ///
    /// assert_eq!(*list.get(0).unwrap(), 7);
    /// assert!(matches!(list.get(1), Err(Error::OutOfRange { index: 1, len: 1 })));
    /// ```
    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.active.len();

        self.active.get(index).ok_or(Error::OutOfRange { index, len })
    }

    /// Gets an exclusive reference to the active item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index` is not less than [`len()`][Self::len].
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.active.len();

        self.active
            .get_mut(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    /// Replaces the active item at `index` with `item`, returning the item that was there.
    ///
    /// No hooks run and no events fire. The returned item is no longer owned by the pool list,
    /// and `item` takes over its slot as if it had been acquired there.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index` is not less than [`len()`][Self::len].
    pub fn set(&mut self, index: usize, item: T) -> Result<T> {
        let slot = self.get_mut(index)?;

        Ok(mem::replace(slot, item))
    }

    /// The first active item, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.active.first()
    }

    /// The last active item, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.active.last()
    }

    /// The active items, in order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.active
    }

    /// Activates one more item and appends it to the end of the active sequence.
    ///
    /// The item is the most recently deactivated item in the reserve, or a new item from the
    /// factory if the reserve is empty. The activation hook runs and then `item_added` fires,
    /// before the item is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Factory`] if a new item was needed and the factory failed. The pool list
    /// is unchanged in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pool_list::PoolList;
    ///
    /// let mut list = PoolList::new(String::new);
    ///
    /// list.acquire().unwrap().push_str("first");
    /// list.acquire().unwrap().push_str("second");
    ///
    /// assert_eq!(list.as_slice(), ["first", "second"]);
    /// ```
    pub fn acquire(&mut self) -> Result<&mut T> {
        self.activate_next()?;

        Ok(self
            .active
            .last_mut()
            .expect("we just pushed an item onto the active sequence"))
    }

    /// Grows or shrinks the active sequence until it holds exactly `target` items.
    ///
    /// * Growth acquires items one at a time (see [`acquire()`][Self::acquire]), appending them
    ///   to the end.
    /// * Shrinking deactivates items from the end: for each item the release hook (if configured)
    ///   runs, then the lifecycle's deactivation hook, then the item is pushed onto the reserve
    ///   and `item_deactivated` fires.
    ///
    /// Returns the signed change in the number of active items. Retained items keep their
    /// relative order.
    ///
    /// `target` may be any integer type. Negative values are rejected.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidTargetCount`] if `target` is negative or does not fit in `usize`. The
    ///   pool list is unchanged.
    /// * [`Error::Factory`] if the factory fails during growth. Items acquired before the failure
    ///   remain active; there is no rollback.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pool_list::{Error, PoolList};
    ///
    /// let mut list = PoolList::new(|| 0_u32);
    ///
    /// assert_eq!(list.scope(3).unwrap(), 3);
    /// assert_eq!(list.scope(1).unwrap(), -2);
    /// assert_eq!(list.scope(1).unwrap(), 0);
    ///
    /// assert!(matches!(list.scope(-1), Err(Error::InvalidTargetCount)));
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn scope<C>(&mut self, target: C) -> Result<isize>
    where
        C: TryInto<usize>,
    {
        let target = TryInto::<usize>::try_into(target)
            .ok()
            .ok_or(Error::InvalidTargetCount)?;
        let before = self.active.len();

        while self.active.len() < target {
            self.activate_next()?;
        }

        self.shrink_to(target);

        let delta = signed_delta(before, self.active.len());

        if delta != 0 {
            debug!(
                item_type = type_name::<T>(),
                from = before,
                to = target,
                delta,
                inactive = self.reserve.len(),
                "scoped pool list"
            );
        }

        Ok(delta)
    }

    /// Deactivates every active item, moving all of them to the reserve.
    ///
    /// Equivalent to `scope(0)`. Nothing is dropped.
    pub fn clear(&mut self) {
        let before = self.active.len();

        self.shrink_to(0);

        if before != 0 {
            debug!(
                item_type = type_name::<T>(),
                deactivated = before,
                inactive = self.reserve.len(),
                "cleared pool list"
            );
        }
    }

    /// Scopes the list to the length of `others` and calls `action` for each positional pair.
    ///
    /// Pairs are visited in index order: `action(&others[0], &mut self[0])`, then index 1, and so
    /// on. Returns the delta of the underlying [`scope()`][Self::scope].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Factory`] if the factory fails while growing. `action` is not called in
    /// that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pool_list::PoolList;
    ///
    /// #[derive(Default)]
    /// struct Marker {
    ///     x: i32,
    /// }
    ///
    /// let mut markers = PoolList::<Marker>::with_default();
    ///
    /// let delta = markers
    ///     .apply_with(&[10, 20, 30], |x, marker| marker.x = *x)
    ///     .unwrap();
    ///
    /// assert_eq!(delta, 3);
    /// assert_eq!(markers[2].x, 30);
    /// ```
    pub fn apply_with<O, F>(&mut self, others: &[O], mut action: F) -> Result<isize>
    where
        F: FnMut(&O, &mut T),
    {
        let delta = self.scope(others.len())?;

        for (other, item) in others.iter().zip(self.active.iter_mut()) {
            action(other, item);
        }

        Ok(delta)
    }

    /// Scopes the list to exactly one active item and calls `action` with it.
    ///
    /// Returns the delta of the underlying [`scope()`][Self::scope].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Factory`] if the list was empty, the reserve was empty and the factory
    /// failed. `action` is not called in that case.
    pub fn apply<O, F>(&mut self, other: &O, action: F) -> Result<isize>
    where
        F: FnOnce(&O, &mut T),
    {
        let delta = self.scope(1_usize)?;

        let item = self
            .active
            .first_mut()
            .expect("we just scoped the list to exactly one active item");

        action(other, item);

        Ok(delta)
    }

    /// Calls `action` for every active item, in order.
    pub fn for_each<F>(&self, action: F)
    where
        F: FnMut(&T),
    {
        self.active.iter().for_each(action);
    }

    /// Calls `action` with an exclusive reference to every active item, in order.
    pub fn for_each_mut<F>(&mut self, action: F)
    where
        F: FnMut(&mut T),
    {
        self.active.iter_mut().for_each(action);
    }

    /// Iterates over the active items, in order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.active.iter()
    }

    /// Iterates mutably over the active items, in order.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.active.iter_mut()
    }

    /// Finds the position of the first active item equal to `item`.
    ///
    /// Returns `None` if no active item matches. Inactive items are never found.
    #[must_use]
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.position(|candidate| candidate == item)
    }

    /// Finds the position of the first active item matching `predicate`.
    ///
    /// Use this for identity comparisons, e.g. with [`Rc::ptr_eq`][std::rc::Rc::ptr_eq].
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// use pool_list::PoolList;
    ///
    /// let mut list = PoolList::new(|| Rc::new(Cell::new(0)));
    /// list.scope(3).unwrap();
    ///
    /// let second = Rc::clone(&list[1]);
    ///
    /// assert_eq!(list.position(|item| Rc::ptr_eq(item, &second)), Some(1));
    /// ```
    #[must_use]
    pub fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.active.iter().position(predicate)
    }

    /// Whether any active item is equal to `item`.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.active.contains(item)
    }

    /// Removes all inactive items from the reserve and hands them to the caller.
    ///
    /// The pool list never disposes of items itself. Use this to release the resources held by
    /// items that are no longer expected to be reused. Active items are not affected.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pool_list::PoolList;
    ///
    /// let mut list = PoolList::new(|| vec![0_u8; 1024]);
    /// list.scope(4).unwrap();
    /// list.scope(1).unwrap();
    ///
    /// let released: Vec<_> = list.drain_inactive().collect();
    ///
    /// assert_eq!(released.len(), 3);
    /// assert_eq!(list.inactive_len(), 0);
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn drain_inactive(&mut self) -> vec::Drain<'_, T> {
        trace!(
            item_type = type_name::<T>(),
            count = self.reserve.len(),
            "draining inactive items"
        );

        self.reserve.drain(..)
    }

    /// The event fired after an item has been appended to the active sequence.
    ///
    /// Use the returned reference to subscribe or unsubscribe handlers.
    pub fn item_added(&mut self) -> &mut Event<T> {
        &mut self.item_added
    }

    /// The event fired after an item has been moved from the active sequence to the reserve.
    ///
    /// Use the returned reference to subscribe or unsubscribe handlers.
    pub fn item_deactivated(&mut self) -> &mut Event<T> {
        &mut self.item_deactivated
    }

    /// Takes the next item (reused or new), activates it and appends it to the active sequence.
    fn activate_next(&mut self) -> Result<()> {
        let mut item = if let Some(item) = self.reserve.pop() {
            trace!(
                item_type = type_name::<T>(),
                index = self.active.len(),
                "reusing inactive item"
            );

            item
        } else {
            let item = (self.factory)().map_err(Error::Factory)?;

            trace!(
                item_type = type_name::<T>(),
                index = self.active.len(),
                "created new item"
            );

            item
        };

        self.lifecycle.activate(&mut item);
        self.active.push(item);

        let item = self
            .active
            .last()
            .expect("we just pushed an item onto the active sequence");
        self.item_added.emit(item);

        Ok(())
    }

    /// Deactivates items from the end of the active sequence until at most `target` remain.
    fn shrink_to(&mut self, target: usize) {
        while self.active.len() > target {
            let Some(mut item) = self.active.pop() else {
                break;
            };

            if let Some(release) = &mut self.release {
                release(&mut item);
            }

            self.lifecycle.deactivate(&mut item);
            self.reserve.push(item);

            trace!(
                item_type = type_name::<T>(),
                index = self.active.len(),
                "deactivated item"
            );

            let item = self
                .reserve
                .last()
                .expect("we just pushed an item onto the reserve");
            self.item_deactivated.emit(item);
        }
    }

    /// Checks that no item is tracked twice. Only meaningful for items with identity.
    #[cfg(test)]
    #[cfg_attr(test, mutants::skip)] // This is essentially test logic, mutation is meaningless.
    pub(crate) fn integrity_check(&self, same: impl Fn(&T, &T) -> bool) {
        let all: Vec<&T> = self.active.iter().chain(self.reserve.iter()).collect();

        for (i, a) in all.iter().enumerate() {
            for b in all.iter().skip(i + 1) {
                assert!(!same(a, b), "an item is tracked more than once");
            }
        }
    }
}

/// The signed difference `after - before`.
fn signed_delta(before: usize, after: usize) -> isize {
    let magnitude = isize::try_from(after.abs_diff(before))
        .expect("the active sequence cannot change by more than isize::MAX items in one call");

    if after >= before {
        magnitude
    } else {
        magnitude
            .checked_neg()
            .expect("negating a non-negative isize cannot overflow")
    }
}

impl<T> Index<usize> for PoolList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        let len = self.active.len();

        self.active.get(index).unwrap_or_else(|| {
            panic!("index {index} is out of range for a pool list with {len} active items")
        })
    }
}

impl<T> IndexMut<usize> for PoolList<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let len = self.active.len();

        self.active.get_mut(index).unwrap_or_else(|| {
            panic!("index {index} is out of range for a pool list with {len} active items")
        })
    }
}

impl<'a, T> IntoIterator for &'a PoolList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut PoolList<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> fmt::Debug for PoolList<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("len", &self.active.len())
            .field("inactive_len", &self.reserve.len())
            .field("releases_items", &self.release.is_some())
            .field("item_added", &self.item_added)
            .field("item_deactivated", &self.item_deactivated)
            .finish_non_exhaustive()
    }
}
