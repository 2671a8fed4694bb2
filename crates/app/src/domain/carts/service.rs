//! Carts service.
//!
//! The active cart is scoped to the signed-in identity and reloaded from
//! storage whenever the identity changes; while signed out the cart exists
//! only in memory and is not persisted.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use jiff::Timestamp;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{CartLine, Order, OrderStatus, OrderUuid},
            repositories::{CartRepository, OrdersRepository},
        },
        catalog::models::{Product, ProductUuid},
        identity::{IdentityService, models::{Address, UserUuid}},
    },
    storage::Storage,
};

pub struct LocalCartsService {
    storage: Arc<dyn Storage>,
    identity: Arc<dyn IdentityService>,
    cart_repository: CartRepository,
    orders_repository: OrdersRepository,
    state: Mutex<CartState>,
}

#[derive(Debug, Default)]
struct CartState {
    owner: Option<UserUuid>,
    lines: Vec<CartLine>,
    orders: Vec<Order>,
}

impl LocalCartsService {
    /// Load the global order list from storage and bind the cart to the
    /// identity store.
    ///
    /// # Errors
    ///
    /// Returns an error when the persisted order list cannot be read.
    pub fn new(
        storage: Arc<dyn Storage>,
        identity: Arc<dyn IdentityService>,
    ) -> Result<Self, CartsServiceError> {
        let orders_repository = OrdersRepository::new();
        let orders = orders_repository.load_orders(storage.as_ref())?;

        Ok(Self {
            storage,
            identity,
            cart_repository: CartRepository::new(),
            orders_repository,
            state: Mutex::new(CartState {
                orders,
                ..CartState::default()
            }),
        })
    }

    fn state(&self) -> MutexGuard<'_, CartState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Point the in-memory cart at the signed-in identity, reloading the
    /// persisted lines whenever the identity changed since the last call.
    fn sync_owner(&self, state: &mut CartState) -> Result<Option<UserUuid>, CartsServiceError> {
        let owner = self.identity.current_user()?.map(|user| user.uuid);

        if owner != state.owner {
            state.lines = match owner {
                Some(user) => self.cart_repository.load_lines(self.storage.as_ref(), user)?,
                None => Vec::new(),
            };
            state.owner = owner;
        }

        Ok(owner)
    }

    fn persist_lines(&self, state: &CartState) -> Result<(), CartsServiceError> {
        if let Some(owner) = state.owner {
            self.cart_repository
                .save_lines(self.storage.as_ref(), owner, &state.lines)?;
        }

        Ok(())
    }
}

impl CartsService for LocalCartsService {
    fn lines(&self) -> Result<Vec<CartLine>, CartsServiceError> {
        let mut state = self.state();

        self.sync_owner(&mut state)?;

        Ok(state.lines.clone())
    }

    fn add_to_cart(&self, product: &Product, quantity: u32) -> Result<(), CartsServiceError> {
        let mut state = self.state();

        self.sync_owner(&mut state)?;

        if let Some(line) = state
            .lines
            .iter_mut()
            .find(|line| line.product_uuid == product.uuid)
        {
            line.quantity += quantity;
        } else {
            state.lines.push(CartLine {
                product_uuid: product.uuid,
                quantity,
                product: product.clone(),
            });
        }

        self.persist_lines(&state)
    }

    fn remove_from_cart(&self, product: ProductUuid) -> Result<(), CartsServiceError> {
        let mut state = self.state();

        self.sync_owner(&mut state)?;

        let before = state.lines.len();
        state.lines.retain(|line| line.product_uuid != product);

        if state.lines.len() == before {
            return Ok(());
        }

        self.persist_lines(&state)
    }

    fn update_quantity(&self, product: ProductUuid, quantity: i64) -> Result<(), CartsServiceError> {
        if quantity <= 0 {
            return self.remove_from_cart(product);
        }

        let mut state = self.state();

        self.sync_owner(&mut state)?;

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(line) = state
            .lines
            .iter_mut()
            .find(|line| line.product_uuid == product)
        {
            line.quantity = quantity;
        }

        self.persist_lines(&state)
    }

    fn clear_cart(&self) -> Result<(), CartsServiceError> {
        let mut state = self.state();

        self.sync_owner(&mut state)?;

        state.lines.clear();

        self.persist_lines(&state)
    }

    fn total_price(&self) -> Result<u64, CartsServiceError> {
        let mut state = self.state();

        self.sync_owner(&mut state)?;

        Ok(state.lines.iter().map(CartLine::subtotal).sum())
    }

    fn total_items(&self) -> Result<u64, CartsServiceError> {
        let mut state = self.state();

        self.sync_owner(&mut state)?;

        Ok(state.lines.iter().map(|line| u64::from(line.quantity)).sum())
    }

    #[tracing::instrument(
        name = "carts.service.create_order",
        skip(self, shipping_address, payment_method),
        fields(order_uuid = tracing::field::Empty, user_uuid = tracing::field::Empty),
        err
    )]
    fn create_order(
        &self,
        shipping_address: Address,
        payment_method: &str,
    ) -> Result<OrderUuid, CartsServiceError> {
        let mut state = self.state();

        let Some(user) = self.sync_owner(&mut state)? else {
            return Err(CartsServiceError::NotSignedIn);
        };

        let order = Order {
            uuid: OrderUuid::new(),
            user_uuid: user,
            items: state.lines.clone(),
            total: state.lines.iter().map(CartLine::subtotal).sum(),
            status: OrderStatus::Pending,
            created_at: Timestamp::now(),
            shipping_address,
            payment_method: payment_method.to_string(),
        };

        let span = Span::current();

        span.record("order_uuid", tracing::field::display(order.uuid));
        span.record("user_uuid", tracing::field::display(user));

        state.orders.push(order.clone());

        self.orders_repository
            .save_orders(self.storage.as_ref(), &state.orders)?;

        state.lines.clear();

        self.persist_lines(&state)?;

        info!(order_uuid = %order.uuid, total = order.total, "placed order");

        Ok(order.uuid)
    }

    fn user_orders(&self) -> Result<Vec<Order>, CartsServiceError> {
        let mut state = self.state();

        let Some(user) = self.sync_owner(&mut state)? else {
            return Ok(Vec::new());
        };

        Ok(state
            .orders
            .iter()
            .filter(|order| order.user_uuid == user)
            .cloned()
            .collect())
    }

    fn orders(&self) -> Result<Vec<Order>, CartsServiceError> {
        Ok(self.state().orders.clone())
    }
}

#[automock]
pub trait CartsService: Send + Sync {
    /// The signed-in identity's cart lines; empty while signed out.
    fn lines(&self) -> Result<Vec<CartLine>, CartsServiceError>;

    /// Add `quantity` of a product, merging into an existing line for the
    /// same product and preserving line order.
    fn add_to_cart(&self, product: &Product, quantity: u32) -> Result<(), CartsServiceError>;

    /// Drop the line for a product; no-op when absent.
    fn remove_from_cart(&self, product: ProductUuid) -> Result<(), CartsServiceError>;

    /// Overwrite a line's quantity; zero or negative quantities remove the
    /// line instead.
    fn update_quantity(&self, product: ProductUuid, quantity: i64)
    -> Result<(), CartsServiceError>;

    /// Empty the cart.
    fn clear_cart(&self) -> Result<(), CartsServiceError>;

    /// Sum of unit price times quantity over all lines.
    fn total_price(&self) -> Result<u64, CartsServiceError>;

    /// Sum of quantities over all lines.
    fn total_items(&self) -> Result<u64, CartsServiceError>;

    /// Snapshot the cart into a new pending order owned by the signed-in
    /// identity, then empty the cart.
    fn create_order(
        &self,
        shipping_address: Address,
        payment_method: &str,
    ) -> Result<OrderUuid, CartsServiceError>;

    /// Orders owned by the signed-in identity; empty while signed out.
    fn user_orders(&self) -> Result<Vec<Order>, CartsServiceError>;

    /// The global order list.
    fn orders(&self) -> Result<Vec<Order>, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, sample_product, shipping_address};

    use super::*;

    #[test]
    fn repeated_adds_merge_into_a_single_line() -> TestResult {
        let ctx = TestContext::new();
        ctx.sign_in_customer();

        let product = ctx.catalog.create_product(sample_product("Gold Chain", 320_00))?;

        ctx.carts.add_to_cart(&product, 1)?;
        ctx.carts.add_to_cart(&product, 2)?;
        ctx.carts.add_to_cart(&product, 3)?;

        let lines = ctx.carts.lines()?;

        assert_eq!(lines.len(), 1, "same product should merge into one line");
        assert_eq!(lines[0].quantity, 6);

        Ok(())
    }

    #[test]
    fn adding_distinct_products_preserves_line_order() -> TestResult {
        let ctx = TestContext::new();
        ctx.sign_in_customer();

        let first = ctx.catalog.create_product(sample_product("Silver Ring", 80_00))?;
        let second = ctx.catalog.create_product(sample_product("Gold Ring", 240_00))?;

        ctx.carts.add_to_cart(&first, 1)?;
        ctx.carts.add_to_cart(&second, 1)?;
        ctx.carts.add_to_cart(&first, 1)?;

        let lines = ctx.carts.lines()?;

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product_uuid, first.uuid);
        assert_eq!(lines[1].product_uuid, second.uuid);

        Ok(())
    }

    #[test]
    fn remove_from_cart_drops_the_line() -> TestResult {
        let ctx = TestContext::new();
        ctx.sign_in_customer();

        let product = ctx.catalog.create_product(sample_product("Pearl Strand", 150_00))?;

        ctx.carts.add_to_cart(&product, 2)?;
        ctx.carts.remove_from_cart(product.uuid)?;

        assert!(ctx.carts.lines()?.is_empty());

        Ok(())
    }

    #[test]
    fn update_quantity_overwrites_the_line() -> TestResult {
        let ctx = TestContext::new();
        ctx.sign_in_customer();

        let product = ctx.catalog.create_product(sample_product("Charm", 25_00))?;

        ctx.carts.add_to_cart(&product, 1)?;
        ctx.carts.update_quantity(product.uuid, 5)?;

        let lines = ctx.carts.lines()?;
        assert_eq!(lines[0].quantity, 5);

        Ok(())
    }

    #[test]
    fn update_quantity_to_zero_removes_the_line() -> TestResult {
        let ctx = TestContext::new();
        ctx.sign_in_customer();

        let product = ctx.catalog.create_product(sample_product("Locket", 95_00))?;

        ctx.carts.add_to_cart(&product, 3)?;
        ctx.carts.update_quantity(product.uuid, 0)?;

        assert!(ctx.carts.lines()?.is_empty());

        Ok(())
    }

    #[test]
    fn update_quantity_negative_removes_the_line() -> TestResult {
        let ctx = TestContext::new();
        ctx.sign_in_customer();

        let product = ctx.catalog.create_product(sample_product("Anklet", 45_00))?;

        ctx.carts.add_to_cart(&product, 1)?;
        ctx.carts.update_quantity(product.uuid, -4)?;

        assert!(ctx.carts.lines()?.is_empty());

        Ok(())
    }

    #[test]
    fn totals_sum_price_times_quantity() -> TestResult {
        let ctx = TestContext::new();
        ctx.sign_in_customer();

        let a = ctx.catalog.create_product(sample_product("A", 100))?;
        let b = ctx.catalog.create_product(sample_product("B", 50))?;

        ctx.carts.add_to_cart(&a, 2)?;
        ctx.carts.add_to_cart(&b, 1)?;

        assert_eq!(ctx.carts.total_price()?, 250);
        assert_eq!(ctx.carts.total_items()?, 3);

        Ok(())
    }

    #[test]
    fn create_order_while_signed_out_fails_without_touching_orders() -> TestResult {
        let ctx = TestContext::new();

        let result = ctx.carts.create_order(shipping_address(), "card");

        assert!(
            matches!(result, Err(CartsServiceError::NotSignedIn)),
            "expected NotSignedIn, got {result:?}"
        );
        assert!(ctx.carts.orders()?.is_empty(), "order list should be empty");

        Ok(())
    }

    #[test]
    fn create_order_snapshots_the_cart_and_empties_it() -> TestResult {
        let ctx = TestContext::new();
        let user = ctx.sign_in_customer();

        let product = ctx.catalog.create_product(sample_product("Tiara", 999_00))?;

        ctx.carts.add_to_cart(&product, 2)?;

        let order_uuid = ctx.carts.create_order(shipping_address(), "card")?;

        let orders = ctx.carts.orders()?;
        assert_eq!(orders.len(), 1, "exactly one order should be appended");

        let order = &orders[0];
        assert_eq!(order.uuid, order_uuid);
        assert_eq!(order.user_uuid, user.uuid);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, 1998_00);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.payment_method, "card");

        assert!(ctx.carts.lines()?.is_empty(), "cart should be empty");
        assert_eq!(ctx.carts.total_items()?, 0);

        Ok(())
    }

    #[test]
    fn user_orders_filters_by_owner() -> TestResult {
        let ctx = TestContext::new();
        ctx.sign_in_customer();

        let product = ctx.catalog.create_product(sample_product("Bracelet", 120_00))?;

        ctx.carts.add_to_cart(&product, 1)?;
        ctx.carts.create_order(shipping_address(), "card")?;

        // A different account sees no orders of its own.
        ctx.identity.login("admin@jewelry.com", "pw")?;
        assert!(ctx.carts.user_orders()?.is_empty());

        ctx.identity.login("customer@example.com", "pw")?;
        assert_eq!(ctx.carts.user_orders()?.len(), 1);

        Ok(())
    }

    #[test]
    fn user_orders_is_empty_while_signed_out() -> TestResult {
        let ctx = TestContext::new();

        assert!(ctx.carts.user_orders()?.is_empty());

        Ok(())
    }

    #[test]
    fn cart_is_scoped_to_the_signed_in_identity() -> TestResult {
        let ctx = TestContext::new();
        ctx.sign_in_customer();

        let product = ctx.catalog.create_product(sample_product("Pendant", 60_00))?;

        ctx.carts.add_to_cart(&product, 2)?;

        // The admin's cart is a different document entirely.
        ctx.identity.login("admin@jewelry.com", "pw")?;
        assert!(ctx.carts.lines()?.is_empty());

        // Signing back in restores the customer's persisted cart.
        ctx.identity.login("customer@example.com", "pw")?;
        let lines = ctx.carts.lines()?;
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);

        Ok(())
    }

    #[test]
    fn signed_out_cart_is_not_persisted() -> TestResult {
        let ctx = TestContext::new();

        let product = ctx.catalog.create_product(sample_product("Keepsake", 30_00))?;

        // Works in memory while signed out.
        ctx.carts.add_to_cart(&product, 1)?;
        assert_eq!(ctx.carts.lines()?.len(), 1);

        // Signing in replaces it with the identity's persisted (empty) cart.
        ctx.sign_in_customer();
        assert!(ctx.carts.lines()?.is_empty());

        Ok(())
    }

    #[test]
    fn orders_survive_a_service_rebuild() -> TestResult {
        let ctx = TestContext::new();
        ctx.sign_in_customer();

        let product = ctx.catalog.create_product(sample_product("Signet", 210_00))?;

        ctx.carts.add_to_cart(&product, 1)?;
        let order_uuid = ctx.carts.create_order(shipping_address(), "paypal")?;

        let reopened = ctx.reopen();
        let orders = reopened.carts.orders()?;

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].uuid, order_uuid);

        Ok(())
    }

    #[test]
    fn total_price_uses_the_canonical_price_only() -> TestResult {
        let ctx = TestContext::new();
        ctx.sign_in_customer();

        let mut listing = sample_product("Marked Down Ring", 100);
        listing.original_price = Some(200);
        listing.discount = Some(50);

        let product = ctx.catalog.create_product(listing)?;

        ctx.carts.add_to_cart(&product, 1)?;

        assert_eq!(ctx.carts.total_price()?, 100);

        Ok(())
    }
}
