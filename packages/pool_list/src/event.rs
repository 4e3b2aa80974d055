use std::any::type_name;
use std::fmt;

/// Identifies one subscription to an [`Event`], for later use with [`Event::unsubscribe()`].
///
/// Identifiers are unique within the event that issued them and are never reused.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SubscriptionId(u64);

type Handler<T> = Box<dyn FnMut(&T)>;

/// A synchronous multicast notification channel.
///
/// Every handler subscribed to the event is called, in subscription order, each time the event
/// is emitted. Delivery happens on the emitting thread before the emitting operation returns.
///
/// Handlers receive a shared reference to the item the event is about. They cannot reach the
/// emitter through it, so they cannot change the membership of the pool list that owns the event.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use pool_list::PoolList;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let mut list = PoolList::new(|| 0_u32);
/// let subscription = list.item_added().subscribe({
///     let seen = Rc::clone(&seen);
///     move |item: &u32| seen.borrow_mut().push(*item)
/// });
///
/// list.scope(2).unwrap();
/// assert_eq!(*seen.borrow(), vec![0, 0]);
///
/// assert!(list.item_added().unsubscribe(subscription));
/// list.scope(3).unwrap();
/// assert_eq!(seen.borrow().len(), 2);
/// ```
pub struct Event<T> {
    handlers: Vec<(SubscriptionId, Handler<T>)>,
    next_id: u64,
}

impl<T> Event<T> {
    /// Creates an event with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers a handler that is called every time the event is emitted.
    ///
    /// Handlers are called in the order they were subscribed.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id);

        self.next_id = self
            .next_id
            .checked_add(1)
            .expect("u64 subscription ids cannot be exhausted by any realistic program");

        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Removes a previously registered handler.
    ///
    /// Returns `false` if no handler with this identifier is registered, either because it was
    /// already removed or because it was issued by a different event.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let Some(position) = self
            .handlers
            .iter()
            .position(|(candidate, _)| *candidate == id)
        else {
            return false;
        };

        // Ordered removal keeps the delivery order of the remaining handlers intact.
        self.handlers.remove(position);
        true
    }

    /// The number of registered handlers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Calls every registered handler with `item`, in subscription order.
    pub(crate) fn emit(&mut self, item: &T) {
        for (_, handler) in &mut self.handlers {
            handler(item);
        }
    }
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("subscriber_count", &self.handlers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use static_assertions::assert_not_impl_any;

    use super::*;

    assert_not_impl_any!(Event<u32>: Send, Sync);

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&'static str) -> Box<dyn FnMut(&u32)>) {
        let log = Rc::new(RefCell::new(Vec::new()));

        let make = {
            let log = Rc::clone(&log);
            move |name: &'static str| -> Box<dyn FnMut(&u32)> {
                let log = Rc::clone(&log);
                Box::new(move |value: &u32| log.borrow_mut().push(format!("{name}:{value}")))
            }
        };

        (log, make)
    }

    #[test]
    fn emit_without_subscribers_is_noop() {
        let mut event = Event::<u32>::new();
        event.emit(&1);

        assert!(event.is_empty());
        assert_eq!(event.subscriber_count(), 0);
    }

    #[test]
    fn delivers_in_subscription_order() {
        let (log, make) = recorder();
        let mut event = Event::<u32>::new();

        event.subscribe(make("a"));
        event.subscribe(make("b"));
        event.subscribe(make("c"));

        event.emit(&7);
        event.emit(&8);

        assert_eq!(
            *log.borrow(),
            vec!["a:7", "b:7", "c:7", "a:8", "b:8", "c:8"]
        );
    }

    #[test]
    fn unsubscribe_keeps_order_of_remaining() {
        let (log, make) = recorder();
        let mut event = Event::<u32>::new();

        event.subscribe(make("a"));
        let b = event.subscribe(make("b"));
        event.subscribe(make("c"));

        assert!(event.unsubscribe(b));
        assert_eq!(event.subscriber_count(), 2);

        event.emit(&1);

        assert_eq!(*log.borrow(), vec!["a:1", "c:1"]);
    }

    #[test]
    fn unsubscribe_twice_reports_missing() {
        let mut event = Event::<u32>::new();
        let id = event.subscribe(|_| {});

        assert!(event.unsubscribe(id));
        assert!(!event.unsubscribe(id));
        assert!(event.is_empty());
    }

    #[test]
    fn ids_are_not_reused() {
        let mut event = Event::<u32>::new();

        let first = event.subscribe(|_| {});
        event.unsubscribe(first);
        let second = event.subscribe(|_| {});

        assert_ne!(first, second);
        assert!(!event.unsubscribe(first));
        assert!(event.unsubscribe(second));
    }

    #[test]
    fn handler_state_persists_between_emits() {
        let mut event = Event::<u32>::new();
        let total = Rc::new(RefCell::new(0_u32));

        event.subscribe({
            let total = Rc::clone(&total);
            move |value: &u32| *total.borrow_mut() += *value
        });

        event.emit(&2);
        event.emit(&3);

        assert_eq!(*total.borrow(), 5);
    }

    #[test]
    fn debug_reports_subscriber_count() {
        let mut event = Event::<u32>::new();
        event.subscribe(|_| {});

        let output = format!("{event:?}");
        assert!(output.contains("subscriber_count: 1"));
    }
}
