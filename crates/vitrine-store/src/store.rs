//! The catalog/cart store.

use chrono::Utc;
use tracing::{debug, info, warn};
use vitrine_commerce::{
    CartItem, CartPricing, CatalogQuery, CategoryFilter, CommerceError, Currency, Filter, Money,
    Product, ProductDraft, ProductId, ProductPatch, SortOption,
};

use crate::config::{StoreConfig, ValidationPolicy};
use crate::notify::{Notification, NotificationQueue};
use crate::observer::{Observers, StoreEvent, SubscriptionId};
use crate::seed;
use crate::state::StoreState;
use crate::StoreError;

const MSG_PRODUCT_ADDED: &str = "Produto adicionado com sucesso!";
const MSG_PRODUCT_UPDATED: &str = "Produto atualizado com sucesso!";
const MSG_PRODUCT_DELETED: &str = "Produto removido com sucesso!";
const MSG_CART_ADDED: &str = "Produto adicionado ao carrinho!";
const MSG_CART_REMOVED: &str = "Produto removido do carrinho";
const MSG_CART_CLEARED: &str = "Carrinho esvaziado";
const MSG_MISSING_FIELDS: &str = "Por favor, preencha todos os campos obrigatórios";

/// Single source of truth for the catalog and the cart.
///
/// One instance lives for the whole session and is handed by reference to
/// every view. Reads are plain borrows of the current state; each mutation
/// applies immediately, queues a user notification where the storefront
/// shows one, and then calls every subscribed listener before returning.
///
/// Unknown ids are never an error: updating, deleting or removing something
/// that is not there is a logged no-op.
///
/// # Example
///
/// ```rust
/// use vitrine_store::{Store, StoreConfig};
/// use vitrine_commerce::ProductId;
///
/// let mut store = Store::seeded(StoreConfig::default());
/// let dress = store.find_product(&ProductId::new("6")).unwrap().clone();
///
/// store.add_to_cart(&dress, 2);
/// assert_eq!(store.total_items(), 2);
/// assert_eq!(store.total_price().display(), "R$ 599,80");
/// ```
#[derive(Debug)]
pub struct Store {
    config: StoreConfig,
    state: StoreState,
    observers: Observers,
    notifications: NotificationQueue,
}

impl Store {
    /// Create a store with an empty catalog.
    pub fn new(config: StoreConfig) -> Self {
        let notifications = NotificationQueue::new(&config.notifications);
        Self {
            config,
            state: StoreState::default(),
            observers: Observers::new(),
            notifications,
        }
    }

    /// Create a store with the sample catalog, unless the config turns seeding off.
    pub fn seeded(config: StoreConfig) -> Self {
        let mut store = Self::new(config);
        if store.config.store.seed_catalog {
            store.state.products = seed::sample_products(store.currency(), Utc::now());
            debug!(products = store.state.products.len(), "seeded sample catalog");
        }
        store
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Currency totals are computed in.
    pub fn currency(&self) -> Currency {
        self.config.store.currency
    }

    // ---------------------------------------------------------------------
    // Selectors
    // ---------------------------------------------------------------------

    /// Catalog in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.state.products
    }

    /// Cart entries in insertion order.
    pub fn cart(&self) -> &[CartItem] {
        self.state.cart.items()
    }

    /// The category list, "todos" first.
    pub fn categories(&self) -> &'static [CategoryFilter] {
        self.state.categories()
    }

    /// Σ effective price × quantity over the cart, recomputed on every call.
    ///
    /// Entries priced in another currency than the store's are left out.
    pub fn total_price(&self) -> Money {
        self.cart_pricing().subtotal
    }

    /// Σ quantity over the cart.
    pub fn total_items(&self) -> i64 {
        self.state.cart.item_count()
    }

    pub fn find_product(&self, id: &ProductId) -> Option<&Product> {
        self.state.product(id)
    }

    /// Featured products in catalog order, at most `limit`.
    pub fn featured_products(&self, limit: usize) -> Vec<&Product> {
        CatalogQuery::new()
            .with_filter(Filter::Featured)
            .with_sort(SortOption::Catalog)
            .with_limit(limit)
            .run(&self.state.products)
    }

    /// Run a listing query over the catalog.
    pub fn search(&self, query: &CatalogQuery) -> Vec<&Product> {
        query.run(&self.state.products)
    }

    /// Per-line cart breakdown; its subtotal always equals [`Store::total_price`].
    pub fn cart_pricing(&self) -> CartPricing {
        let pricing = self.state.cart.pricing(&self.state.products, self.currency());
        for line in pricing.foreign_lines() {
            warn!(
                product_id = %line.product_id,
                currency = %line.total.currency,
                store_currency = %self.currency(),
                "cart entry priced in another currency left out of the total"
            );
        }
        pricing
    }

    pub fn cart_line(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.state.cart.get(product_id)
    }

    pub fn is_in_cart(&self, product_id: &ProductId) -> bool {
        self.state.cart.contains(product_id)
    }

    /// A copy of the current products and cart.
    pub fn snapshot(&self) -> StoreState {
        self.state.clone()
    }

    // ---------------------------------------------------------------------
    // Catalog mutations
    // ---------------------------------------------------------------------

    /// Add a product to the end of the catalog and return its new id.
    ///
    /// Under [`ValidationPolicy::Trusting`] this never fails. Under
    /// [`ValidationPolicy::Strict`] a draft that fails the admin form checks
    /// is rejected and the catalog is left unchanged.
    pub fn add_product(&mut self, draft: ProductDraft) -> Result<ProductId, StoreError> {
        let draft = match self.config.store.validation {
            ValidationPolicy::Trusting => draft,
            ValidationPolicy::Strict => {
                self.check(draft.validate())?;
                self.check(self.check_currency(&draft.price))?;
                draft.normalized()
            }
        };

        let id = ProductId::generate();
        let product = Product::from_draft(id.clone(), draft, Utc::now());
        info!(product_id = %id, name = %product.name, price = %product.price, "product added");
        self.state.products.push(product);

        self.notifications.success(MSG_PRODUCT_ADDED);
        self.emit(StoreEvent::ProductAdded(id.clone()));
        Ok(id)
    }

    /// Merge `patch` onto a product. `id` and `created_at` never change.
    ///
    /// An unknown id is a no-op that still reports success, as the admin
    /// panel expects.
    pub fn update_product(&mut self, id: &ProductId, patch: ProductPatch) -> Result<(), StoreError> {
        let strict = self.config.store.validation == ValidationPolicy::Strict;
        if strict {
            if let Some(current) = self.state.product(id) {
                let verdict = patch.validate_against(current);
                self.check(verdict)?;
                if let Some(price) = patch.price {
                    self.check(self.check_currency(&price))?;
                }
            }
        }

        match self.state.product_mut(id) {
            Some(product) => {
                product.apply_patch(patch);
                if strict && product.discount_price.is_some() && !product.is_on_sale() {
                    debug!(product_id = %id, "dropped discount that is not below the price");
                    product.discount_price = None;
                }
                info!(product_id = %id, "product updated");
            }
            None => debug!(product_id = %id, "update for unknown product ignored"),
        }

        self.notifications.success(MSG_PRODUCT_UPDATED);
        self.emit(StoreEvent::ProductUpdated(id.clone()));
        Ok(())
    }

    /// Remove a product from the catalog.
    ///
    /// Cart entries for it stay put (priced from their snapshot) unless
    /// `cart.prune_deleted_products` is set.
    pub fn delete_product(&mut self, id: &ProductId) {
        let len_before = self.state.products.len();
        self.state.products.retain(|p| &p.id != id);

        if self.state.products.len() < len_before {
            info!(product_id = %id, "product deleted");
            if self.config.cart.prune_deleted_products {
                let pruned = self.state.cart.retain_listed(&self.state.products);
                if pruned > 0 {
                    info!(product_id = %id, pruned, "pruned cart entries for deleted product");
                }
            } else if self.state.cart.contains(id) {
                debug!(product_id = %id, "deleted product is still in the cart");
            }
        } else {
            debug!(product_id = %id, "delete for unknown product ignored");
        }

        self.notifications.success(MSG_PRODUCT_DELETED);
        self.emit(StoreEvent::ProductDeleted(id.clone()));
    }

    // ---------------------------------------------------------------------
    // Cart mutations
    // ---------------------------------------------------------------------

    /// Put `quantity` units of `product` in the cart.
    ///
    /// Adding a product that is already there grows its entry. Stock and
    /// upper bounds are not checked. A quantity of zero or less is ignored.
    pub fn add_to_cart(&mut self, product: &Product, quantity: i64) {
        match self.state.cart.add(product, quantity) {
            Ok(total) => {
                info!(product_id = %product.id, quantity, total, "added to cart");
            }
            Err(CommerceError::InvalidQuantity(q)) => {
                warn!(product_id = %product.id, quantity = q, "ignored add to cart with non-positive quantity");
                return;
            }
            Err(e) => {
                warn!(product_id = %product.id, error = %e, "add to cart failed");
                return;
            }
        }

        self.notifications.success(MSG_CART_ADDED);
        self.emit(StoreEvent::CartItemAdded(product.id.clone()));
    }

    /// Drop a product's cart entry.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) {
        if self.state.cart.remove(product_id) {
            info!(product_id = %product_id, "removed from cart");
        } else {
            debug!(product_id = %product_id, "remove for product not in cart ignored");
        }

        self.notifications.info(MSG_CART_REMOVED);
        self.emit(StoreEvent::CartItemRemoved(product_id.clone()));
    }

    /// Set a cart entry's quantity. Zero or less removes the entry exactly
    /// as [`Store::remove_from_cart`] does.
    pub fn update_cart_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(product_id);
            return;
        }

        if self.state.cart.set_quantity(product_id, quantity) {
            debug!(product_id = %product_id, quantity, "cart quantity set");
        } else {
            debug!(product_id = %product_id, "quantity update for product not in cart ignored");
        }

        self.emit(StoreEvent::CartQuantityUpdated(product_id.clone()));
    }

    /// One more unit of an entry already in the cart.
    pub fn increment_quantity(&mut self, product_id: &ProductId) {
        let current = self.cart_line(product_id).map_or(0, |i| i.quantity);
        self.update_cart_quantity(product_id, current.saturating_add(1));
    }

    /// One less unit; the entry goes away when it reaches zero.
    pub fn decrement_quantity(&mut self, product_id: &ProductId) {
        let current = self.cart_line(product_id).map_or(0, |i| i.quantity);
        self.update_cart_quantity(product_id, current - 1);
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        let removed = self.state.cart.unique_item_count();
        self.state.cart.clear();
        info!(removed, "cart cleared");

        self.notifications.info(MSG_CART_CLEARED);
        self.emit(StoreEvent::CartCleared);
    }

    // ---------------------------------------------------------------------
    // Observers and notifications
    // ---------------------------------------------------------------------

    /// Register a listener called after every mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent, &StoreState) + 'static,
    {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Take the notifications queued since the last drain.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    /// Peek at queued notifications.
    pub fn pending_notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.pending()
    }

    fn emit(&mut self, event: StoreEvent) {
        self.observers.notify(&event, &self.state);
    }

    /// Pass a validation verdict through, surfacing failures to the user.
    fn check(&mut self, verdict: Result<(), CommerceError>) -> Result<(), StoreError> {
        verdict.map_err(|e| {
            warn!(error = %e, "rejected product input");
            self.notifications.error(MSG_MISSING_FIELDS);
            StoreError::from(e)
        })
    }

    fn check_currency(&self, price: &Money) -> Result<(), CommerceError> {
        if price.currency == self.currency() {
            Ok(())
        } else {
            Err(CommerceError::Validation(format!(
                "price in {} but the store prices in {}",
                price.currency,
                self.currency()
            )))
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::seeded(StoreConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;
    use vitrine_commerce::Category;

    fn brl(cents: i64) -> Money {
        Money::new(cents, Currency::BRL)
    }

    fn strict() -> StoreConfig {
        let mut config = StoreConfig::default();
        config.store.validation = ValidationPolicy::Strict;
        config
    }

    fn complete_draft() -> ProductDraft {
        ProductDraft::new("Saia Longa", brl(19990), Category::Saias)
            .with_description("Saia longa de linho")
            .with_image("https://example.com/saia.jpg")
    }

    #[test]
    fn test_seeded_store() {
        let store = Store::default();
        assert_eq!(store.products().len(), 6);
        assert!(store.cart().is_empty());
        assert_eq!(store.categories().len(), 6);
        assert_eq!(store.categories()[0], CategoryFilter::Todos);
    }

    #[test]
    fn test_seeding_can_be_disabled() {
        let mut config = StoreConfig::default();
        config.store.seed_catalog = false;
        assert!(Store::seeded(config).products().is_empty());
    }

    #[test]
    fn test_featured_products_in_catalog_order() {
        let store = Store::default();
        let ids: Vec<&str> = store
            .featured_products(3)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, ["1", "3", "5"]);
    }

    #[test]
    fn test_trusting_accepts_incomplete_draft() {
        let mut store = Store::new(StoreConfig::default());
        let id = store
            .add_product(ProductDraft::new("", brl(0), Category::Blusas))
            .unwrap();
        assert_eq!(store.find_product(&id).unwrap().price, brl(0));
    }

    #[test]
    fn test_strict_rejects_incomplete_draft() {
        let mut store = Store::new(strict());
        let err = store
            .add_product(ProductDraft::new("", brl(1000), Category::Blusas))
            .unwrap_err();

        assert!(err.is_validation());
        assert!(store.products().is_empty());
        let notes = store.drain_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].severity, Severity::Error);
        assert_eq!(notes[0].message, MSG_MISSING_FIELDS);
    }

    #[test]
    fn test_strict_normalizes_discount_and_currency() {
        let mut store = Store::new(strict());
        let id = store
            .add_product(complete_draft().with_discount_price(brl(25000)))
            .unwrap();
        assert_eq!(store.find_product(&id).unwrap().discount_price, None);

        let usd = ProductDraft {
            price: Money::new(1000, Currency::USD),
            ..complete_draft()
        };
        assert!(store.add_product(usd).is_err());
    }

    #[test]
    fn test_strict_rejects_bad_patch() {
        let mut store = Store::new(strict());
        let id = store.add_product(complete_draft()).unwrap();

        let err = store
            .update_product(&id, ProductPatch::new().with_price(brl(0)))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.find_product(&id).unwrap().price, brl(19990));

        // unknown ids stay a silent no-op even under strict validation
        assert!(store
            .update_product(&ProductId::new("nope"), ProductPatch::new().with_price(brl(0)))
            .is_ok());
    }

    #[test]
    fn test_strict_update_drops_discount_not_below_price() {
        let mut store = Store::new(strict());
        let id = store
            .add_product(complete_draft().with_discount_price(brl(15000)))
            .unwrap();

        store
            .update_product(&id, ProductPatch::new().with_discount_price(brl(19990)))
            .unwrap();
        assert_eq!(store.find_product(&id).unwrap().discount_price, None);

        store
            .update_product(&id, ProductPatch::new().with_discount_price(brl(12000)))
            .unwrap();
        store
            .update_product(&id, ProductPatch::new().with_price(brl(10000)))
            .unwrap();
        assert_eq!(store.find_product(&id).unwrap().discount_price, None);
        assert_eq!(store.find_product(&id).unwrap().effective_price(), brl(10000));
    }

    #[test]
    fn test_trusting_update_keeps_discount_as_given() {
        let mut store = Store::new(StoreConfig::default());
        let id = store.add_product(complete_draft()).unwrap();
        store
            .update_product(&id, ProductPatch::new().with_discount_price(brl(25000)))
            .unwrap();

        let product = store.find_product(&id).unwrap();
        assert_eq!(product.discount_price, Some(brl(25000)));
        assert_eq!(product.effective_price(), brl(19990));
    }

    #[test]
    fn test_total_leaves_out_other_currencies() {
        let mut store = Store::new(StoreConfig::default());
        let brl_id = store.add_product(complete_draft()).unwrap();
        let usd_id = store
            .add_product(ProductDraft {
                price: Money::new(10000, Currency::USD),
                ..complete_draft()
            })
            .unwrap();
        let in_brl = store.find_product(&brl_id).unwrap().clone();
        let in_usd = store.find_product(&usd_id).unwrap().clone();

        store.add_to_cart(&in_brl, 1);
        store.add_to_cart(&in_usd, 1);

        assert_eq!(store.total_price(), brl(19990));
        assert_eq!(store.total_items(), 2);
        assert_eq!(store.cart_pricing().foreign_lines().count(), 1);
    }

    #[test]
    fn test_notification_messages() {
        let mut store = Store::default();
        let p = store.products()[0].clone();

        store.add_to_cart(&p, 1);
        store.update_cart_quantity(&p.id, 3);
        store.remove_from_cart(&p.id);
        store.clear_cart();

        let notes: Vec<(Severity, String)> = store
            .drain_notifications()
            .into_iter()
            .map(|n| (n.severity, n.message))
            .collect();
        assert_eq!(
            notes,
            [
                (Severity::Success, MSG_CART_ADDED.to_string()),
                (Severity::Info, MSG_CART_REMOVED.to_string()),
                (Severity::Info, MSG_CART_CLEARED.to_string()),
            ]
        );
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut store = Store::default();
        let p = store.products()[1].clone();
        store.add_to_cart(&p, 1);

        store.increment_quantity(&p.id);
        assert_eq!(store.cart_line(&p.id).unwrap().quantity, 2);

        store.decrement_quantity(&p.id);
        store.decrement_quantity(&p.id);
        assert!(!store.is_in_cart(&p.id));

        store.increment_quantity(&p.id);
        assert!(!store.is_in_cart(&p.id));
    }

    #[test]
    fn test_non_positive_add_is_ignored() {
        let mut store = Store::default();
        let p = store.products()[0].clone();
        store.add_to_cart(&p, 0);
        store.add_to_cart(&p, -3);
        assert!(store.cart().is_empty());
        assert!(store.drain_notifications().is_empty());
    }

    #[test]
    fn test_prune_deleted_products() {
        let mut config = StoreConfig::default();
        config.cart.prune_deleted_products = true;
        let mut store = Store::seeded(config);
        let p = store.products()[0].clone();
        let q = store.products()[1].clone();
        store.add_to_cart(&p, 2);
        store.add_to_cart(&q, 1);

        store.delete_product(&p.id);
        assert!(!store.is_in_cart(&p.id));
        assert!(store.is_in_cart(&q.id));
    }

    #[test]
    fn test_pricing_agrees_with_total() {
        let mut store = Store::default();
        let products: Vec<Product> = store.products().to_vec();
        for (i, p) in products.iter().enumerate() {
            store.add_to_cart(p, i as i64 + 1);
        }
        let pricing = store.cart_pricing();
        assert_eq!(pricing.subtotal, store.total_price());
        assert_eq!(pricing.item_count, store.total_items());
        assert_eq!(pricing.item_count, 21);
        assert_eq!(pricing.savings(), brl(6000 * 6));
    }
}
