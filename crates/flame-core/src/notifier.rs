//! Synchronous publish/subscribe channel for state snapshots.
//!
//! Delivery happens on the calling thread, in registration order, with no
//! buffering and no replay for late subscribers. Every callback is isolated:
//! an `Err` or a panic from one subscriber is logged and the remaining
//! subscribers still run.

use fnv::FnvHashMap;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

/// Topic on which `FlameDynamics` publishes its snapshots.
pub const CANDLE_STATE_CHANGED: &str = "candleStateChanged";

pub type Subscriber<T> = Rc<dyn Fn(&T) -> anyhow::Result<()>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

type SubscriberList<T> = SmallVec<[(SubscriptionHandle, Subscriber<T>); 4]>;

pub struct ChangeNotifier<T> {
    topics: RefCell<FnvHashMap<String, SubscriberList<T>>>,
    next_id: Cell<u64>,
}

impl<T> Default for ChangeNotifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ChangeNotifier<T> {
    pub fn new() -> Self {
        Self {
            topics: RefCell::new(FnvHashMap::default()),
            next_id: Cell::new(0),
        }
    }

    pub fn subscribe<F>(&self, topic: &str, callback: F) -> SubscriptionHandle
    where
        F: Fn(&T) -> anyhow::Result<()> + 'static,
    {
        let handle = SubscriptionHandle(self.next_id.get());
        self.next_id.set(handle.0 + 1);
        self.topics
            .borrow_mut()
            .entry(topic.to_owned())
            .or_default()
            .push((handle, Rc::new(callback)));
        handle
    }

    /// Returns `false` if the handle was already removed.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let mut topics = self.topics.borrow_mut();
        let mut removed = false;
        for list in topics.values_mut() {
            let before = list.len();
            list.retain(|(h, _)| *h != handle);
            removed |= list.len() != before;
        }
        topics.retain(|_, list| !list.is_empty());
        removed
    }

    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics.borrow().get(topic).map_or(0, |l| l.len())
    }

    /// Deliver `payload` to every subscriber of `topic`.
    ///
    /// Returns how many callbacks completed successfully. The subscriber list
    /// is snapshotted first, so callbacks may subscribe or unsubscribe; those
    /// changes apply from the next emit.
    pub fn emit(&self, topic: &str, payload: &T) -> usize {
        let subscribers: SubscriberList<T> = match self.topics.borrow().get(topic) {
            Some(list) => list.clone(),
            None => return 0,
        };
        let mut delivered = 0;
        for (handle, callback) in subscribers.iter() {
            match panic::catch_unwind(AssertUnwindSafe(|| callback(payload))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(e)) => {
                    log::warn!("[notifier] subscriber {:?} on '{}' failed: {:#}", handle, topic, e)
                }
                Err(_) => log::error!("[notifier] subscriber {:?} on '{}' panicked", handle, topic),
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_without_subscribers_delivers_nothing() {
        let n = ChangeNotifier::<u32>::new();
        assert_eq!(n.emit("nobody", &1), 0);
    }

    #[test]
    fn handles_are_unique_across_topics() {
        let n = ChangeNotifier::<u32>::new();
        let a = n.subscribe("a", |_| Ok(()));
        let b = n.subscribe("b", |_| Ok(()));
        assert_ne!(a, b);
        assert!(n.unsubscribe(a));
        assert_eq!(n.subscriber_count("a"), 0);
        assert_eq!(n.subscriber_count("b"), 1);
    }
}
