//! Catalog service.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use jiff::Timestamp;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    domain::catalog::{
        errors::CatalogServiceError,
        models::{
            Discount, DiscountUpdate, DiscountUuid, NewDiscount, NewProduct, Product,
            ProductUpdate, ProductUuid,
        },
        repositories::{DiscountsRepository, ProductsRepository},
    },
    storage::Storage,
};

#[derive(Debug)]
pub struct LocalCatalogService {
    storage: Arc<dyn Storage>,
    products_repository: ProductsRepository,
    discounts_repository: DiscountsRepository,
    state: Mutex<CatalogState>,
}

#[derive(Debug, Default)]
struct CatalogState {
    products: Vec<Product>,
    discounts: Vec<Discount>,
}

impl LocalCatalogService {
    /// Load products and discounts from storage, seeding the defaults for
    /// any absent key.
    ///
    /// # Errors
    ///
    /// Returns an error when a persisted document cannot be read.
    pub fn new(storage: Arc<dyn Storage>) -> Result<Self, CatalogServiceError> {
        let products_repository = ProductsRepository::new();
        let discounts_repository = DiscountsRepository::new();

        let products = products_repository.load_products(storage.as_ref())?;
        let discounts = discounts_repository.load_discounts(storage.as_ref())?;

        Ok(Self {
            storage,
            products_repository,
            discounts_repository,
            state: Mutex::new(CatalogState {
                products,
                discounts,
            }),
        })
    }

    fn state(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CatalogService for LocalCatalogService {
    fn list_products(&self) -> Result<Vec<Product>, CatalogServiceError> {
        Ok(self.state().products.clone())
    }

    fn get_product(&self, product: ProductUuid) -> Result<Option<Product>, CatalogServiceError> {
        Ok(self
            .state()
            .products
            .iter()
            .find(|p| p.uuid == product)
            .cloned())
    }

    fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError> {
        let mut state = self.state();

        let product = Product {
            uuid: ProductUuid::new(),
            name: product.name,
            price: product.price,
            original_price: product.original_price,
            description: product.description,
            category: product.category,
            image: product.image,
            images: product.images,
            in_stock: product.in_stock,
            featured: product.featured,
            new_arrival: product.new_arrival,
            discount: product.discount,
            rating: product.rating,
            reviews: product.reviews,
            specifications: product.specifications,
        };

        state.products.push(product.clone());

        self.products_repository
            .save_products(self.storage.as_ref(), &state.products)?;

        Ok(product)
    }

    fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<(), CatalogServiceError> {
        let mut state = self.state();

        // Unknown uuids are a silent no-op.
        let Some(index) = state.products.iter().position(|p| p.uuid == product) else {
            return Ok(());
        };

        update.apply(&mut state.products[index]);

        self.products_repository
            .save_products(self.storage.as_ref(), &state.products)?;

        Ok(())
    }

    fn delete_product(&self, product: ProductUuid) -> Result<(), CatalogServiceError> {
        let mut state = self.state();

        let before = state.products.len();
        state.products.retain(|p| p.uuid != product);

        if state.products.len() == before {
            return Ok(());
        }

        self.products_repository
            .save_products(self.storage.as_ref(), &state.products)?;

        Ok(())
    }

    fn list_discounts(&self) -> Result<Vec<Discount>, CatalogServiceError> {
        Ok(self.state().discounts.clone())
    }

    #[tracing::instrument(
        name = "catalog.service.create_discount",
        skip(self, discount),
        fields(discount_uuid = tracing::field::Empty, code = tracing::field::Empty),
        err
    )]
    fn create_discount(&self, discount: NewDiscount) -> Result<Discount, CatalogServiceError> {
        let mut state = self.state();

        let discount = Discount {
            uuid: DiscountUuid::new(),
            code: discount.code,
            rule: discount.rule,
            min_amount: discount.min_amount,
            expires_at: discount.expires_at,
            is_active: discount.is_active,
            usage_limit: discount.usage_limit,
            used_count: 0,
        };

        let span = Span::current();

        span.record("discount_uuid", tracing::field::display(discount.uuid));
        span.record("code", tracing::field::display(&discount.code));

        state.discounts.push(discount.clone());

        self.discounts_repository
            .save_discounts(self.storage.as_ref(), &state.discounts)?;

        info!(discount_uuid = %discount.uuid, rule = discount.rule.to_str(), "created discount");

        Ok(discount)
    }

    fn update_discount(
        &self,
        discount: DiscountUuid,
        update: DiscountUpdate,
    ) -> Result<(), CatalogServiceError> {
        let mut state = self.state();

        let Some(index) = state.discounts.iter().position(|d| d.uuid == discount) else {
            return Ok(());
        };

        update.apply(&mut state.discounts[index]);

        self.discounts_repository
            .save_discounts(self.storage.as_ref(), &state.discounts)?;

        info!(discount_uuid = %discount, "updated discount");

        Ok(())
    }

    fn delete_discount(&self, discount: DiscountUuid) -> Result<(), CatalogServiceError> {
        let mut state = self.state();

        let before = state.discounts.len();
        state.discounts.retain(|d| d.uuid != discount);

        if state.discounts.len() == before {
            return Ok(());
        }

        self.discounts_repository
            .save_discounts(self.storage.as_ref(), &state.discounts)?;

        Ok(())
    }

    fn apply_discount(&self, code: &str, amount: u64) -> u64 {
        let now = Timestamp::now();
        let state = self.state();

        let Some(discount) = state
            .discounts
            .iter()
            .find(|d| d.code == code && d.eligible(amount, now))
        else {
            return amount;
        };

        // Eligibility is checked here but the usage count is not advanced;
        // callers treat this as a pure pricing computation.
        discount.rule.reduce(amount)
    }
}

#[automock]
pub trait CatalogService: Send + Sync {
    /// Retrieve all products.
    fn list_products(&self) -> Result<Vec<Product>, CatalogServiceError>;

    /// Retrieve a single product, if it exists.
    fn get_product(&self, product: ProductUuid) -> Result<Option<Product>, CatalogServiceError>;

    /// Create a new product under a fresh uuid.
    fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError>;

    /// Merge the partial update into the product; no-op for unknown uuids.
    fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<(), CatalogServiceError>;

    /// Delete a product; no-op for unknown uuids.
    fn delete_product(&self, product: ProductUuid) -> Result<(), CatalogServiceError>;

    /// Retrieve all discount codes.
    fn list_discounts(&self) -> Result<Vec<Discount>, CatalogServiceError>;

    /// Create a new discount under a fresh uuid with a zeroed usage count.
    fn create_discount(&self, discount: NewDiscount) -> Result<Discount, CatalogServiceError>;

    /// Merge the partial update into the discount; no-op for unknown uuids.
    fn update_discount(
        &self,
        discount: DiscountUuid,
        update: DiscountUpdate,
    ) -> Result<(), CatalogServiceError>;

    /// Delete a discount; no-op for unknown uuids.
    fn delete_discount(&self, discount: DiscountUuid) -> Result<(), CatalogServiceError>;

    /// Price `amount` against the discount registered under `code`.
    ///
    /// Returns the reduced amount when an eligible discount matches, and
    /// `amount` unchanged otherwise. Never mutates the discount.
    fn apply_discount(&self, code: &str, amount: u64) -> u64;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::catalog::models::DiscountRule,
        test::{TestContext, fixed_discount, percentage_discount, sample_product},
    };

    use super::*;

    #[test]
    fn catalog_is_seeded_with_six_products_and_two_discounts() -> TestResult {
        let ctx = TestContext::new();

        assert_eq!(ctx.catalog.list_products()?.len(), 6);

        let codes: Vec<String> = ctx
            .catalog
            .list_discounts()?
            .into_iter()
            .map(|d| d.code)
            .collect();

        assert_eq!(codes, ["WELCOME10", "SAVE50"]);

        Ok(())
    }

    #[test]
    fn create_product_assigns_a_fresh_uuid() -> TestResult {
        let ctx = TestContext::new();

        let a = ctx.catalog.create_product(sample_product("Opal Ring", 450_00))?;
        let b = ctx.catalog.create_product(sample_product("Opal Ring", 450_00))?;

        assert!(a.uuid != b.uuid, "uuids should be unique");
        assert_eq!(a.price, 450_00);

        Ok(())
    }

    #[test]
    fn get_product_returns_created_product() -> TestResult {
        let ctx = TestContext::new();

        let created = ctx.catalog.create_product(sample_product("Jade Bangle", 620_00))?;

        let found = ctx.catalog.get_product(created.uuid)?;
        assert_eq!(found, Some(created));

        Ok(())
    }

    #[test]
    fn get_product_unknown_uuid_returns_none() -> TestResult {
        let ctx = TestContext::new();

        assert_eq!(ctx.catalog.get_product(ProductUuid::new())?, None);

        Ok(())
    }

    #[test]
    fn update_product_merges_partial_fields() -> TestResult {
        let ctx = TestContext::new();

        let created = ctx.catalog.create_product(sample_product("Topaz Pin", 150_00))?;

        ctx.catalog.update_product(
            created.uuid,
            ProductUpdate {
                price: Some(175_00),
                in_stock: Some(false),
                ..ProductUpdate::default()
            },
        )?;

        let updated = ctx
            .catalog
            .get_product(created.uuid)?
            .expect("product should still exist");

        assert_eq!(updated.price, 175_00);
        assert!(!updated.in_stock, "stock flag should be cleared");
        assert_eq!(updated.name, created.name);

        Ok(())
    }

    #[test]
    fn update_product_unknown_uuid_is_a_noop() -> TestResult {
        let ctx = TestContext::new();

        let before = ctx.catalog.list_products()?;

        ctx.catalog.update_product(
            ProductUuid::new(),
            ProductUpdate {
                price: Some(1),
                ..ProductUpdate::default()
            },
        )?;

        assert_eq!(ctx.catalog.list_products()?, before);

        Ok(())
    }

    #[test]
    fn delete_product_removes_it_from_the_list() -> TestResult {
        let ctx = TestContext::new();

        let created = ctx.catalog.create_product(sample_product("Onyx Cufflinks", 90_00))?;

        ctx.catalog.delete_product(created.uuid)?;

        assert_eq!(ctx.catalog.get_product(created.uuid)?, None);

        Ok(())
    }

    #[test]
    fn delete_product_unknown_uuid_is_a_noop() -> TestResult {
        let ctx = TestContext::new();

        let before = ctx.catalog.list_products()?;

        ctx.catalog.delete_product(ProductUuid::new())?;

        assert_eq!(ctx.catalog.list_products()?, before);

        Ok(())
    }

    #[test]
    fn create_discount_zeroes_the_usage_count() -> TestResult {
        let ctx = TestContext::new();

        let discount = ctx
            .catalog
            .create_discount(percentage_discount("SPRING15", 15, None))?;

        assert_eq!(discount.used_count, 0);
        assert_eq!(discount.rule, DiscountRule::Percentage { value: 15 });

        Ok(())
    }

    #[test]
    fn update_discount_merges_partial_fields() -> TestResult {
        let ctx = TestContext::new();

        let discount = ctx
            .catalog
            .create_discount(percentage_discount("FLASH", 20, None))?;

        ctx.catalog.update_discount(
            discount.uuid,
            DiscountUpdate {
                is_active: Some(false),
                ..DiscountUpdate::default()
            },
        )?;

        let updated = ctx
            .catalog
            .list_discounts()?
            .into_iter()
            .find(|d| d.uuid == discount.uuid)
            .expect("discount should still exist");

        assert!(!updated.is_active, "discount should be deactivated");
        assert_eq!(updated.code, "FLASH");

        Ok(())
    }

    #[test]
    fn delete_discount_removes_it_from_the_list() -> TestResult {
        let ctx = TestContext::new();

        let discount = ctx
            .catalog
            .create_discount(fixed_discount("TENNER", 10_00, None))?;

        ctx.catalog.delete_discount(discount.uuid)?;

        assert!(
            !ctx.catalog
                .list_discounts()?
                .iter()
                .any(|d| d.uuid == discount.uuid),
            "discount should be gone"
        );

        Ok(())
    }

    #[test]
    fn apply_discount_reduces_by_percentage_over_the_minimum() -> TestResult {
        let ctx = TestContext::new();

        ctx.catalog
            .create_discount(percentage_discount("WELCOME", 10, Some(500)))?;

        assert_eq!(ctx.catalog.apply_discount("WELCOME", 600), 540);

        Ok(())
    }

    #[test]
    fn apply_discount_below_minimum_returns_amount_unchanged() -> TestResult {
        let ctx = TestContext::new();

        ctx.catalog
            .create_discount(percentage_discount("WELCOME", 10, Some(500)))?;

        assert_eq!(ctx.catalog.apply_discount("WELCOME", 400), 400);

        Ok(())
    }

    #[test]
    fn apply_discount_fixed_rule_clamps_at_zero() -> TestResult {
        let ctx = TestContext::new();

        ctx.catalog
            .create_discount(fixed_discount("BIGCUT", 500, None))?;

        assert_eq!(ctx.catalog.apply_discount("BIGCUT", 300), 0);
        assert_eq!(ctx.catalog.apply_discount("BIGCUT", 800), 300);

        Ok(())
    }

    #[test]
    fn apply_discount_unknown_code_returns_amount_unchanged() {
        let ctx = TestContext::new();

        assert_eq!(ctx.catalog.apply_discount("NO-SUCH-CODE", 750), 750);
    }

    #[test]
    fn apply_discount_inactive_code_returns_amount_unchanged() -> TestResult {
        let ctx = TestContext::new();

        let mut discount = percentage_discount("PAUSED", 25, None);
        discount.is_active = false;

        ctx.catalog.create_discount(discount)?;

        assert_eq!(ctx.catalog.apply_discount("PAUSED", 1000), 1000);

        Ok(())
    }

    #[test]
    fn apply_discount_expired_code_returns_amount_unchanged() -> TestResult {
        let ctx = TestContext::new();

        let mut discount = percentage_discount("BYGONE", 25, None);
        discount.expires_at = "2001-01-01T00:00:00Z".parse()?;

        ctx.catalog.create_discount(discount)?;

        assert_eq!(ctx.catalog.apply_discount("BYGONE", 1000), 1000);

        Ok(())
    }

    #[test]
    fn apply_discount_does_not_advance_the_usage_count() -> TestResult {
        let ctx = TestContext::new();

        let created = ctx
            .catalog
            .create_discount(percentage_discount("STEADY", 10, None))?;

        ctx.catalog.apply_discount("STEADY", 1000);
        ctx.catalog.apply_discount("STEADY", 1000);

        let after = ctx
            .catalog
            .list_discounts()?
            .into_iter()
            .find(|d| d.uuid == created.uuid)
            .expect("discount should still exist");

        assert_eq!(after.used_count, 0);

        Ok(())
    }

    #[test]
    fn catalog_changes_survive_a_service_rebuild() -> TestResult {
        let ctx = TestContext::new();

        let created = ctx.catalog.create_product(sample_product("Amber Brooch", 210_00))?;

        let reopened = ctx.reopen();

        assert_eq!(reopened.catalog.get_product(created.uuid)?, Some(created));

        Ok(())
    }
}
