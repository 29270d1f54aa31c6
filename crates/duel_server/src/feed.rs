//! Keyed publish/subscribe channels for pushing document changes.
//!
//! A [`Feed`] fans values out to every [`Subscription`] registered under the
//! same key. Subscriptions have an explicit lifecycle: they stop receiving as
//! soon as [`Subscription::unsubscribe`] is called or the handle is dropped.

use futures::Stream;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, instrument, trace};

type Subscribers<K, T> = HashMap<u64, (K, UnboundedSender<T>)>;

struct FeedInner<K, T> {
    next_id: u64,
    subscribers: Subscribers<K, T>,
}

/// Fan-out channel keyed by document or player id.
pub struct Feed<K, T> {
    inner: Arc<Mutex<FeedInner<K, T>>>,
}

impl<K, T> Clone for Feed<K, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, T> fmt::Debug for Feed<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Feed")
            .field("subscribers", &lock(&self.inner).subscribers.len())
            .finish()
    }
}

fn lock<K, T>(inner: &Mutex<FeedInner<K, T>>) -> MutexGuard<'_, FeedInner<K, T>> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<K, T> Feed<K, T>
where
    K: Eq + Hash + Clone + fmt::Debug + Send + 'static,
    T: Clone + Send + 'static,
{
    /// Creates a feed with no subscribers.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FeedInner {
                next_id: 0,
                subscribers: HashMap::new(),
            })),
        }
    }

    /// Registers a subscriber for `key`.
    ///
    /// `initial` is queued before anything published afterwards, so the
    /// subscriber starts from a snapshot.
    #[instrument(skip(self, initial))]
    pub fn subscribe(&self, key: K, initial: impl IntoIterator<Item = T>) -> Subscription<T> {
        let (sender, receiver) = unbounded_channel();
        for value in initial {
            // The receiver is held right here, so this cannot fail.
            let _ = sender.send(value);
        }

        let mut inner = lock(&self.inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.insert(id, (key, sender));
        debug!(id, total = inner.subscribers.len(), "Subscriber registered");
        drop(inner);

        let weak: Weak<Mutex<FeedInner<K, T>>> = Arc::downgrade(&self.inner);
        Subscription {
            id,
            receiver,
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    lock(&inner).subscribers.remove(&id);
                }
            })),
        }
    }

    /// Sends `value` to every subscriber of `key`, returning how many got it.
    ///
    /// Subscribers whose receiving side is gone are pruned.
    #[instrument(skip(self, value))]
    pub fn publish(&self, key: &K, value: &T) -> usize {
        let mut inner = lock(&self.inner);
        let mut delivered = 0;
        inner.subscribers.retain(|id, (subscribed, sender)| {
            if *subscribed != *key {
                return true;
            }
            match sender.send(value.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(_) => {
                    trace!(id, "Pruning closed subscriber");
                    false
                }
            }
        });
        trace!(delivered, "Published");
        delivered
    }

    /// Number of live registrations across all keys.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).subscribers.len()
    }
}

impl<K, T> Default for Feed<K, T>
where
    K: Eq + Hash + Clone + fmt::Debug + Send + 'static,
    T: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving end of a [`Feed`] registration.
pub struct Subscription<T> {
    id: u64,
    receiver: UnboundedReceiver<T>,
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl<T: Send + 'static> Subscription<T> {
    /// Waits for the next value. Returns `None` once unsubscribed and drained.
    pub async fn next(&mut self) -> Option<T> {
        self.receiver.recv().await
    }

    /// Returns a queued value without waiting.
    pub fn try_next(&mut self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    /// Stops delivery and releases the registration.
    ///
    /// Values already queued can still be read; nothing published afterwards
    /// arrives.
    pub fn unsubscribe(&mut self) {
        self.detach();
    }

    /// Turns the subscription into a stream that ends when it is released.
    pub fn into_stream(self) -> impl Stream<Item = T> + Send + 'static {
        futures::stream::unfold(self, |mut subscription| async move {
            subscription
                .next()
                .await
                .map(|value| (value, subscription))
        })
    }

    fn detach(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
            self.receiver.close();
            debug!(id = self.id, "Subscriber released");
        }
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}
