//! Change subscriptions.
//!
//! Views subscribe a listener and re-render when it fires. Every mutation
//! calls every listener synchronously, after the change is applied and
//! before the mutating call returns. No-op mutations still fire.

use serde::Serialize;
use vitrine_commerce::ProductId;

use crate::state::StoreState;

/// What just happened to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "productId", rename_all = "snake_case")]
pub enum StoreEvent {
    ProductAdded(ProductId),
    ProductUpdated(ProductId),
    ProductDeleted(ProductId),
    CartItemAdded(ProductId),
    CartItemRemoved(ProductId),
    CartQuantityUpdated(ProductId),
    CartCleared,
}

impl StoreEvent {
    /// The product the mutation targeted, if any.
    pub fn product_id(&self) -> Option<&ProductId> {
        match self {
            StoreEvent::ProductAdded(id)
            | StoreEvent::ProductUpdated(id)
            | StoreEvent::ProductDeleted(id)
            | StoreEvent::CartItemAdded(id)
            | StoreEvent::CartItemRemoved(id)
            | StoreEvent::CartQuantityUpdated(id) => Some(id),
            StoreEvent::CartCleared => None,
        }
    }

    /// Check if the event changed the cart (as opposed to the catalog).
    pub fn touches_cart(&self) -> bool {
        !matches!(
            self,
            StoreEvent::ProductAdded(_) | StoreEvent::ProductUpdated(_) | StoreEvent::ProductDeleted(_)
        )
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A change listener. It sees the event and the state after the change.
pub type Listener = Box<dyn FnMut(&StoreEvent, &StoreState)>;

/// The set of active listeners, called in subscription order.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent, &StoreState) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the subscription was not active.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() < len_before
    }

    pub fn notify(&mut self, event: &StoreEvent, state: &StoreState) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event, state);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
