//! Checkout reconciliation and payment-session lifecycle

use super::types::{CheckoutPayload, CheckoutRequest, CheckoutSession, ShippingQuote};
use crate::cart::CartService;
use crate::cart::money::{to_decimal, to_f64};
use crate::core::Config;
use crate::db::repository::{CartRepository, OrderRepository, RepoError};
use crate::pricing::PriceResolver;
use crate::promotions::{PromotionEngine, discount_amount};
use crate::services::PaymentProvider;
use chrono::Utc;
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{CarrierKind, CarrierRates, CartLineItem, Order, OrderLine, OrderStatus};
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;
use validator::Validate;

/// Synthetic line key for non-free shipping
const SHIPPING_LINE_KEY: &str = "shipping";

#[derive(Clone)]
pub struct CheckoutService {
    carts: CartRepository,
    cart_service: CartService,
    resolver: PriceResolver,
    promotions: PromotionEngine,
    orders: OrderRepository,
    payment: Arc<dyn PaymentProvider>,
    config: Config,
}

impl CheckoutService {
    pub fn new(db: Surreal<Db>, payment: Arc<dyn PaymentProvider>, config: Config) -> Self {
        Self {
            carts: CartRepository::new(db.clone()),
            cart_service: CartService::new(db.clone()),
            resolver: PriceResolver::new(db.clone()),
            promotions: PromotionEngine::new(db.clone()),
            orders: OrderRepository::new(db),
            payment,
            config,
        }
    }

    /// Shipping cost for a carrier at a given pre-shipping total
    pub fn shipping_quote(&self, carrier: CarrierKind, pre_shipping_total: f64) -> ShippingQuote {
        let rates = self.config.carrier_rates(carrier);
        let cost = shipping_cost(rates, to_decimal(pre_shipping_total));
        ShippingQuote {
            carrier,
            shipping_cost: to_f64(cost),
            free_shipping_threshold: rates.free_shipping_threshold,
            free: cost == Decimal::ZERO,
        }
    }

    /// Re-derive authoritative prices and assemble the provider payload
    ///
    /// Every rejection carries a specific message and leaves cart and
    /// form untouched; the call is idempotent and retryable.
    pub async fn build_payload(
        &self,
        cart_id: &str,
        request: &CheckoutRequest,
        now: i64,
    ) -> AppResult<CheckoutPayload> {
        let cart = self
            .carts
            .find(cart_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::CartNotFound).with_detail("cart_id", cart_id))?;
        let items = self.carts.list_items(cart_id).await?;

        // 1–2. Expired wheel gifts block; the customer removes them
        // explicitly rather than having value silently stripped.
        let expired: Vec<&CartLineItem> =
            items.iter().filter(|item| item.is_expired(now)).collect();
        if let Some(first) = expired.first() {
            return Err(AppError::with_message(
                ErrorCode::ExpiredGiftInCart,
                format!(
                    "The gift \"{}\" has expired, remove it from the cart to continue",
                    first.title
                ),
            )
            .with_detail("item_key", first.item_key.clone()));
        }

        let (payable, gifts): (Vec<&CartLineItem>, Vec<&CartLineItem>) =
            items.iter().partition(|item| !item.is_gift());

        // 3. A cart of only gifts cannot be paid.
        if payable.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::NoPayableItems,
                "The cart contains no payable items",
            ));
        }

        // 4. Cart prices are a cache; re-resolve every payable line.
        let mut lines = Vec::with_capacity(items.len() + 1);
        let mut subtotal = Decimal::ZERO;
        for item in &payable {
            let resolved = self
                .resolver
                .resolve(&item.product_id, item.variant.as_deref())
                .await
                .map_err(|e| match e {
                    RepoError::NotFound(_) => AppError::with_message(
                        ErrorCode::PriceResolutionFailed,
                        format!("No current price for \"{}\", remove it to continue", item.title),
                    )
                    .with_detail("item_key", item.item_key.clone()),
                    other => other.into(),
                })?;

            subtotal += to_decimal(resolved.unit_price) * Decimal::from(item.quantity);
            lines.push(OrderLine {
                item_key: item.item_key.clone(),
                title: item.title.clone(),
                quantity: item.quantity,
                unit_price: resolved.unit_price,
                payment_ref: Some(resolved.payment_ref),
                is_gift: false,
            });
        }

        // 5. Customer form, plus carrier-specific requirements.
        validate_customer(request)?;

        // 6. Promotion discount re-derived from the re-resolved subtotal.
        let discount = cart
            .promotion
            .as_ref()
            .map(|promo| discount_amount(promo, subtotal))
            .unwrap_or(Decimal::ZERO);
        let pre_shipping_total = (subtotal - discount).max(Decimal::ZERO);

        let rates = self.config.carrier_rates(request.carrier);
        let shipping = shipping_cost(rates, pre_shipping_total);
        let total = pre_shipping_total + shipping;

        // 7. Provider floor.
        let minimum = to_decimal(self.config.payment_min_chargeable);
        if total < minimum {
            return Err(AppError::with_message(
                ErrorCode::BelowMinimumCharge,
                format!(
                    "Order total {:.2} € is below the minimum chargeable amount of {:.2} €",
                    to_f64(total),
                    self.config.payment_min_chargeable
                ),
            )
            .with_detail("minimum", self.config.payment_min_chargeable));
        }

        // 8. Gifts ride along zero-priced; shipping becomes a synthetic
        // line when non-free.
        for item in &gifts {
            lines.push(OrderLine {
                item_key: item.item_key.clone(),
                title: item.title.clone(),
                quantity: 1,
                unit_price: 0.0,
                payment_ref: None,
                is_gift: true,
            });
        }
        if shipping > Decimal::ZERO {
            lines.push(OrderLine {
                item_key: SHIPPING_LINE_KEY.to_string(),
                title: match request.carrier {
                    CarrierKind::HomeDelivery => "Livraison à domicile".to_string(),
                    CarrierKind::RelayPoint => "Livraison en point relais".to_string(),
                },
                quantity: 1,
                unit_price: to_f64(shipping),
                payment_ref: None,
                is_gift: false,
            });
        }

        Ok(CheckoutPayload {
            cart_id: cart.cart_id,
            lines,
            subtotal: to_f64(subtotal),
            discount: to_f64(discount),
            shipping_cost: to_f64(shipping),
            total: to_f64(total),
            promotion_code: cart.promotion.map(|p| p.code),
            customer: request.customer.clone(),
            carrier: request.carrier,
            pickup_point: request.pickup_point.clone(),
        })
    }

    /// Build the payload, delegate to the provider and snapshot a
    /// pending order for the returned session
    pub async fn create_session(
        &self,
        cart_id: &str,
        request: &CheckoutRequest,
    ) -> AppResult<CheckoutSession> {
        let now = Utc::now().timestamp_millis();
        let payload = self.build_payload(cart_id, request, now).await?;

        // 9. Provider redirect or error, surfaced unmodified.
        let session = self.payment.create_session(&payload).await?;

        self.orders
            .create(Order {
                order_id: Uuid::new_v4().to_string(),
                cart_id: payload.cart_id.clone(),
                lines: payload.lines.clone(),
                subtotal: payload.subtotal,
                discount: payload.discount,
                shipping_cost: payload.shipping_cost,
                total: payload.total,
                promotion_code: payload.promotion_code.clone(),
                customer: payload.customer.clone(),
                carrier: payload.carrier,
                pickup_point: payload.pickup_point.clone(),
                provider_session_id: session.session_id.clone(),
                status: OrderStatus::PendingPayment,
                created_at: now,
            })
            .await?;

        tracing::info!(cart_id, session = %session.session_id, "Checkout session created");
        Ok(session)
    }

    /// Mark the session's order paid, count the promotion redemption and
    /// clear the cart. Idempotent per provider session.
    pub async fn confirm(&self, session_id: &str) -> AppResult<Order> {
        let order = self
            .orders
            .find_by_session(session_id)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::OrderNotFound).with_detail("session_id", session_id)
            })?;

        if order.status == OrderStatus::Paid {
            return Ok(order);
        }
        if !order.status.can_transition_to(OrderStatus::Paid) {
            return Err(AppError::new(ErrorCode::InvalidStatusTransition)
                .with_detail("from", format!("{:?}", order.status)));
        }

        self.orders
            .set_status(&order.order_id, OrderStatus::Paid)
            .await?;
        if let Some(code) = &order.promotion_code {
            self.promotions.record_usage(code).await?;
        }
        self.cart_service.clear(&order.cart_id).await?;

        tracing::info!(order_id = %order.order_id, "Payment confirmed, cart cleared");
        Ok(Order {
            status: OrderStatus::Paid,
            ..order
        })
    }
}

/// `0` when the pre-shipping total reaches the carrier's free-shipping
/// threshold, the carrier base price otherwise
fn shipping_cost(rates: CarrierRates, pre_shipping_total: Decimal) -> Decimal {
    if pre_shipping_total >= to_decimal(rates.free_shipping_threshold) {
        Decimal::ZERO
    } else {
        to_decimal(rates.base_price)
    }
}

/// Step 5: name/email/phone always; address for home delivery; pickup
/// point for relay delivery
fn validate_customer(request: &CheckoutRequest) -> AppResult<()> {
    if let Err(errors) = request.customer.validate() {
        let field = errors
            .field_errors()
            .keys()
            .next()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "customer".to_string());
        return Err(AppError::with_message(
            ErrorCode::MissingCustomerField,
            format!("Customer field '{field}' is missing or invalid"),
        )
        .with_detail("field", field));
    }

    match request.carrier {
        CarrierKind::HomeDelivery => {
            if request.customer.address.is_none() {
                return Err(AppError::with_message(
                    ErrorCode::MissingCustomerField,
                    "A full postal address is required for home delivery",
                )
                .with_detail("field", "address"));
            }
        }
        CarrierKind::RelayPoint => {
            if request.pickup_point.is_none() {
                return Err(AppError::with_message(
                    ErrorCode::MissingPickupPoint,
                    "Select a pickup point for relay delivery",
                ));
            }
        }
    }
    Ok(())
}
