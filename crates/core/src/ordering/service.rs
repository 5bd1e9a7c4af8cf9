//! Quote computation and order intake services

use std::sync::Arc;

use chrono::{DateTime, Utc};
use glasline_common::validation::{
    validate_email, validate_phone, validate_postal_code, validate_required,
};
use glasline_domain::types::order::{ConsentRecord, CustomerDetails, Order, Quote, Selection};
use glasline_domain::{GlaslineError, Result};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use super::ports::{CatalogStore, OrderStore};
use super::pricing::{effective_router_discount, promoted_router_price};
use crate::promotions::{applicable_promotions, router_discount, setup_fee_waived};
use crate::promotions::service::PromotionService;

/// Computes the price breakdown for a selection.
///
/// Promotions enter through the promotion service's fail-closed snapshot, so
/// a broken promotion store produces an undiscounted quote rather than an
/// error.
pub struct QuoteService {
    catalog: Arc<dyn CatalogStore>,
    promotions: Arc<PromotionService>,
}

impl QuoteService {
    /// Create a new quote service.
    pub fn new(catalog: Arc<dyn CatalogStore>, promotions: Arc<PromotionService>) -> Self {
        Self { catalog, promotions }
    }

    /// Compute the quote for the given selection at `now`.
    ///
    /// # Errors
    /// Returns `InvalidInput` when no tariff is selected and `NotFound` when
    /// a selected tariff or router slug does not exist in the catalog.
    pub async fn build_quote(&self, selection: &Selection, now: DateTime<Utc>) -> Result<Quote> {
        let tariff_slug = selection
            .tariff_slug
            .as_deref()
            .ok_or_else(|| GlaslineError::InvalidInput("no tariff selected".into()))?;

        let tariff = self
            .catalog
            .tariff_by_slug(tariff_slug)
            .await?
            .ok_or_else(|| GlaslineError::NotFound(format!("tariff {tariff_slug}")))?;

        let router = match selection.router_slug.as_deref() {
            Some(slug) => Some(
                self.catalog
                    .router_by_slug(slug)
                    .await?
                    .ok_or_else(|| GlaslineError::NotFound(format!("router {slug}")))?,
            ),
            None => None,
        };

        let snapshot = self.promotions.fetch_active(now).await;
        let applicable = applicable_promotions(
            &snapshot.promotions,
            Some(tariff_slug),
            selection.building_id.as_deref(),
        );

        let promotion_discount = router_discount(&applicable);
        let promotion_waives = setup_fee_waived(&applicable);

        let (code_discount, code_waives) = selection
            .promo_code
            .as_ref()
            .map_or((Decimal::ZERO, false), |c| (c.router_discount, c.waives_setup_fee));

        let discount = effective_router_discount(promotion_discount, code_discount);
        let router_base_price = router.as_ref().map(|r| r.monthly_price).unwrap_or_default();
        let router_price = promoted_router_price(router_base_price, discount);

        let setup_fee_waived = promotion_waives || code_waives;
        let setup_fee_due = if setup_fee_waived { Decimal::ZERO } else { tariff.setup_fee };

        Ok(Quote {
            tariff_slug: tariff.slug,
            tariff_monthly_price: tariff.monthly_price,
            router_slug: router.map(|r| r.slug),
            router_base_price,
            router_discount: discount,
            router_price,
            setup_fee: tariff.setup_fee,
            setup_fee_waived,
            setup_fee_due,
            monthly_total: tariff.monthly_price + router_price,
            applied_promotions: applicable.into_iter().map(|p| p.name).collect(),
        })
    }
}

/// An order submission before validation.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub selection: Selection,
    pub customer: CustomerDetails,
    pub accepted_terms: bool,
    pub accepted_privacy: bool,
    pub marketing_opt_in: bool,
}

/// Validates and persists submitted orders.
pub struct OrderService {
    quotes: Arc<QuoteService>,
    orders: Arc<dyn OrderStore>,
}

impl OrderService {
    /// Create a new order service.
    pub fn new(quotes: Arc<QuoteService>, orders: Arc<dyn OrderStore>) -> Self {
        Self { quotes, orders }
    }

    /// Validate a submission, recompute its quote, and persist the order.
    ///
    /// The quote is always recomputed server-side; prices sent by the client
    /// are ignored.
    ///
    /// # Errors
    /// Returns `InvalidInput` listing every failed customer field or missing
    /// mandatory consent.
    pub async fn submit(&self, request: OrderRequest, now: DateTime<Utc>) -> Result<Order> {
        let mut failures = validate_customer(&request.customer);
        if !request.accepted_terms {
            failures.push("terms must be accepted".to_string());
        }
        if !request.accepted_privacy {
            failures.push("privacy policy must be accepted".to_string());
        }
        if !failures.is_empty() {
            return Err(GlaslineError::InvalidInput(failures.join("; ")));
        }

        let quote = self.quotes.build_quote(&request.selection, now).await?;

        let order = Order {
            id: Uuid::new_v4(),
            selection: request.selection,
            quote,
            customer: request.customer,
            consents: ConsentRecord {
                accepted_terms: request.accepted_terms,
                accepted_privacy: request.accepted_privacy,
                marketing_opt_in: request.marketing_opt_in,
                recorded_at: now,
            },
            created_at: now,
        };

        self.orders.insert_order(&order).await?;

        info!(
            order_id = %order.id,
            tariff = %order.quote.tariff_slug,
            monthly_total = %order.quote.monthly_total,
            "order accepted"
        );

        Ok(order)
    }

    /// Load a previously submitted order.
    pub async fn find(&self, id: Uuid) -> Result<Option<Order>> {
        self.orders.order_by_id(id).await
    }
}

fn validate_customer(customer: &CustomerDetails) -> Vec<String> {
    let mut failures = Vec::new();

    let required = [
        ("first name", &customer.first_name),
        ("last name", &customer.last_name),
        ("street", &customer.street),
        ("house number", &customer.house_number),
        ("city", &customer.city),
    ];
    for (field, value) in required {
        if let Err(msg) = validate_required(field, value) {
            failures.push(msg);
        }
    }
    if let Err(msg) = validate_email(&customer.email) {
        failures.push(msg);
    }
    if let Err(msg) = validate_phone(&customer.phone) {
        failures.push(msg);
    }
    if let Err(msg) = validate_postal_code(&customer.postal_code) {
        failures.push(msg);
    }

    failures
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use glasline_domain::types::building::Infrastructure;
    use glasline_domain::types::catalog::{RouterOption, Tariff};
    use glasline_domain::types::promotion::{
        AppliedPromoCode, Discount, DiscountKind, DiscountTarget,
    };
    use tokio::sync::Mutex;

    use super::*;
    use crate::promotions::ports::{PromotionRecord, PromotionStore};

    /// Mock CatalogStore with one tariff and one router
    struct MockCatalog;

    fn tariff() -> Tariff {
        Tariff {
            id: "t-100".into(),
            slug: "einfach-100".into(),
            name: "Einfach 100".into(),
            monthly_price: Decimal::new(3999, 2),
            setup_fee: Decimal::new(6999, 2),
            downstream_mbps: 100,
            upstream_mbps: 50,
            infrastructure: Infrastructure::Ftth,
            sort_order: 1,
        }
    }

    fn router() -> RouterOption {
        RouterOption {
            id: "r-1".into(),
            slug: "fritzbox-7590".into(),
            name: "FRITZ!Box 7590".into(),
            monthly_price: Decimal::new(499, 2),
        }
    }

    #[async_trait]
    impl CatalogStore for MockCatalog {
        async fn list_tariffs(&self) -> Result<Vec<Tariff>> {
            Ok(vec![tariff()])
        }

        async fn tariff_by_slug(&self, slug: &str) -> Result<Option<Tariff>> {
            Ok((slug == "einfach-100").then(tariff))
        }

        async fn list_routers(&self) -> Result<Vec<RouterOption>> {
            Ok(vec![router()])
        }

        async fn router_by_slug(&self, slug: &str) -> Result<Option<RouterOption>> {
            Ok((slug == "fritzbox-7590").then(router))
        }
    }

    /// Mock PromotionStore with one global router discount
    struct MockPromotions {
        discount_amount: Option<Decimal>,
    }

    #[async_trait]
    impl PromotionStore for MockPromotions {
        async fn list_active(&self) -> Result<Vec<PromotionRecord>> {
            if self.discount_amount.is_none() {
                return Ok(vec![]);
            }
            Ok(vec![PromotionRecord {
                id: Uuid::nil(),
                name: "Routeraktion".into(),
                code: None,
                description: None,
                is_global: true,
                is_active: true,
                starts_at: None,
                ends_at: None,
                requires_customer_number: false,
                available_text: None,
                unavailable_text: None,
            }])
        }

        async fn find_by_code(&self, _code: &str) -> Result<Option<PromotionRecord>> {
            Ok(None)
        }

        async fn discounts_for(&self, promotion_id: Uuid) -> Result<Vec<Discount>> {
            Ok(vec![Discount {
                id: Uuid::new_v4(),
                promotion_id,
                applies_to: DiscountTarget::Option,
                kind: DiscountKind::Fixed,
                amount: self.discount_amount,
                tariff_ref: None,
                router_ref: None,
            }])
        }

        async fn buildings_for(&self, _promotion_id: Uuid) -> Result<Vec<String>> {
            Ok(vec![])
        }

        async fn tariff_slug(&self, _tariff_ref: &str) -> Result<Option<String>> {
            Ok(None)
        }

        async fn router_slug(&self, _router_ref: &str) -> Result<Option<String>> {
            Ok(None)
        }
    }

    /// Mock OrderStore collecting inserted orders
    #[derive(Default)]
    struct MockOrders {
        inserted: Mutex<Vec<Order>>,
    }

    #[async_trait]
    impl OrderStore for MockOrders {
        async fn insert_order(&self, order: &Order) -> Result<()> {
            self.inserted.lock().await.push(order.clone());
            Ok(())
        }

        async fn order_by_id(&self, id: Uuid) -> Result<Option<Order>> {
            Ok(self.inserted.lock().await.iter().find(|o| o.id == id).cloned())
        }
    }

    fn quote_service(discount_amount: Option<Decimal>) -> Arc<QuoteService> {
        let promotions =
            Arc::new(PromotionService::new(Arc::new(MockPromotions { discount_amount })));
        Arc::new(QuoteService::new(Arc::new(MockCatalog), promotions))
    }

    fn selection() -> Selection {
        Selection {
            tariff_slug: Some("einfach-100".into()),
            building_id: None,
            router_slug: Some("fritzbox-7590".into()),
            promo_code: None,
        }
    }

    fn customer() -> CustomerDetails {
        CustomerDetails {
            first_name: "Anna".into(),
            last_name: "Schmidt".into(),
            email: "anna.schmidt@example.de".into(),
            phone: "+49 30 1234567".into(),
            street: "Gartenweg".into(),
            house_number: "12a".into(),
            postal_code: "10115".into(),
            city: "Berlin".into(),
            customer_number: None,
        }
    }

    #[tokio::test]
    async fn quote_applies_promotion_discount() {
        let quotes = quote_service(Some(Decimal::new(300, 2)));

        let quote = quotes.build_quote(&selection(), Utc::now()).await.unwrap();
        assert_eq!(quote.router_base_price, Decimal::new(499, 2));
        assert_eq!(quote.router_discount, Decimal::new(300, 2));
        assert_eq!(quote.router_price, Decimal::new(199, 2));
        assert_eq!(quote.monthly_total, Decimal::new(3999 + 199, 2));
        assert_eq!(quote.applied_promotions, vec!["Routeraktion".to_string()]);
    }

    #[tokio::test]
    async fn promo_code_wins_when_larger() {
        let quotes = quote_service(Some(Decimal::new(500, 2)));
        let mut selection = selection();
        selection.promo_code = Some(AppliedPromoCode {
            code: "FIBER8".into(),
            router_discount: Decimal::new(800, 2),
            waives_setup_fee: false,
        });

        let quote = quotes.build_quote(&selection, Utc::now()).await.unwrap();
        // max(5, 8) = 8 - the sources never stack
        assert_eq!(quote.router_discount, Decimal::new(800, 2));
    }

    #[tokio::test]
    async fn discount_never_drives_price_negative() {
        let quotes = quote_service(Some(Decimal::new(1000, 2)));

        let quote = quotes.build_quote(&selection(), Utc::now()).await.unwrap();
        assert_eq!(quote.router_price, Decimal::ZERO);
    }

    #[tokio::test]
    async fn promo_code_waiver_clears_setup_fee() {
        let quotes = quote_service(None);
        let mut selection = selection();
        selection.promo_code = Some(AppliedPromoCode {
            code: "START".into(),
            router_discount: Decimal::ZERO,
            waives_setup_fee: true,
        });

        let quote = quotes.build_quote(&selection, Utc::now()).await.unwrap();
        assert!(quote.setup_fee_waived);
        assert_eq!(quote.setup_fee_due, Decimal::ZERO);
        assert_eq!(quote.setup_fee, Decimal::new(6999, 2));
    }

    #[tokio::test]
    async fn quote_without_tariff_is_invalid() {
        let quotes = quote_service(None);
        let selection = Selection::empty();

        let err = quotes.build_quote(&selection, Utc::now()).await.unwrap_err();
        assert!(matches!(err, GlaslineError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn submit_persists_valid_order() {
        let orders = Arc::new(MockOrders::default());
        let service = OrderService::new(quote_service(None), orders.clone());

        let request = OrderRequest {
            selection: selection(),
            customer: customer(),
            accepted_terms: true,
            accepted_privacy: true,
            marketing_opt_in: false,
        };

        let order = service.submit(request, Utc::now()).await.unwrap();
        assert_eq!(orders.inserted.lock().await.len(), 1);
        assert!(order.consents.accepted_terms);
        assert!(!order.consents.marketing_opt_in);
    }

    #[tokio::test]
    async fn submit_rejects_missing_consents() {
        let service = OrderService::new(quote_service(None), Arc::new(MockOrders::default()));

        let request = OrderRequest {
            selection: selection(),
            customer: customer(),
            accepted_terms: true,
            accepted_privacy: false,
            marketing_opt_in: true,
        };

        let err = service.submit(request, Utc::now()).await.unwrap_err();
        let GlaslineError::InvalidInput(msg) = err else {
            panic!("expected invalid input");
        };
        assert!(msg.contains("privacy"));
    }

    #[tokio::test]
    async fn submit_collects_all_field_failures() {
        let service = OrderService::new(quote_service(None), Arc::new(MockOrders::default()));

        let mut bad_customer = customer();
        bad_customer.email = "not-an-email".into();
        bad_customer.postal_code = "12".into();
        bad_customer.first_name = " ".into();

        let request = OrderRequest {
            selection: selection(),
            customer: bad_customer,
            accepted_terms: true,
            accepted_privacy: true,
            marketing_opt_in: false,
        };

        let err = service.submit(request, Utc::now()).await.unwrap_err();
        let GlaslineError::InvalidInput(msg) = err else {
            panic!("expected invalid input");
        };
        assert!(msg.contains("email"));
        assert!(msg.contains("postal code"));
        assert!(msg.contains("first name"));
    }
}
