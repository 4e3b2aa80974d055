#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! This package provides [`PoolList`], an ordered, indexable list of active items that recycles
//! deactivated items instead of dropping them.
//!
//! It is meant for collections of uniform, expensive-to-create objects whose size changes often,
//! such as render handles, audio voices or per-frame scratch buffers: shrinking the list moves
//! items to a reserve, growing it takes them back out, and new items are only created when the
//! reserve runs dry.
//!
//! # Features
//!
//! - **List semantics**: active items are ordered and index-addressable; iteration follows
//!   acquisition order.
//! - **Bulk resizing**: [`PoolList::scope()`] grows or shrinks the active sequence to a target
//!   count and reports the signed change.
//! - **LIFO reuse**: the most recently deactivated item is the first to be reused.
//! - **Injected factory**: new items come from a closure supplied at construction, which may be
//!   fallible.
//! - **Lifecycle hooks**: [`Lifecycle`] runs on every activation and deactivation; items may
//!   opt in to clearing themselves via [`Poolable`].
//! - **Notifications**: [`Event`] channels report every item added and deactivated.
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use pool_list::PoolList;
//!
//! let created = Rc::new(Cell::new(0));
//!
//! let mut list = PoolList::new({
//!     let created = Rc::clone(&created);
//!     move || {
//!         created.set(created.get() + 1);
//!         String::with_capacity(256)
//!     }
//! });
//!
//! // Three new items are created.
//! assert_eq!(list.scope(3).unwrap(), 3);
//! assert_eq!(created.get(), 3);
//!
//! // Two items are deactivated and kept in reserve.
//! assert_eq!(list.scope(1).unwrap(), -2);
//! assert_eq!(list.inactive_len(), 2);
//!
//! // Growing again reuses them instead of calling the factory.
//! assert_eq!(list.scope(3).unwrap(), 2);
//! assert_eq!(created.get(), 3);
//! ```
//!
//! # Logging
//!
//! The package emits [`tracing`](https://docs.rs/tracing) events: `trace` level for every item
//! created, reused and deactivated, `debug` level for every resize that changed the list. No
//! subscriber is installed by the package itself.

mod builder;
mod error;
mod event;
mod lifecycle;
mod pool_list;

pub use builder::*;
pub use error::*;
pub use event::*;
pub use lifecycle::*;
pub use pool_list::*;
