//! End-to-end storefront journey against an in-memory database
//!
//! Covers the whole path a customer walks: browse, fill the cart across
//! a gift threshold, apply a code, win a wheel prize, check out through
//! the (stubbed) payment provider, confirm, then open a dispute.

use std::sync::Arc;

use async_trait::async_trait;
use reef_server::checkout::{CheckoutPayload, CheckoutRequest, CheckoutSession};
use reef_server::db::DbService;
use reef_server::db::repository::{
    ProductRepository, PromotionRepository, ThresholdRepository, WheelSettingsRepository,
};
use reef_server::services::{PaymentError, PaymentProvider};
use reef_server::{CartService, CheckoutService, Config, GiftManager, OrderService};
use shared::ErrorCode;
use shared::models::{
    AddItemRequest, Address, CarrierKind, CarrierRates, CartThreshold, ClaimWheelGiftRequest,
    CustomerForm, ItemKind, OrderStatus, PickupPoint, Product, ProductVariant, Promotion,
    PromotionKind, SenderRole, WheelGiftSettings,
};

struct RecordingProvider;

#[async_trait]
impl PaymentProvider for RecordingProvider {
    async fn create_session(
        &self,
        payload: &CheckoutPayload,
    ) -> Result<CheckoutSession, PaymentError> {
        // The provider only ever sees resolved payment references on
        // payable lines.
        assert!(
            payload
                .lines
                .iter()
                .filter(|line| !line.is_gift && line.item_key != "shipping")
                .all(|line| line.payment_ref.is_some())
        );
        Ok(CheckoutSession {
            session_id: "sess_flow_1".to_string(),
            redirect_url: "https://pay.example/sess_flow_1".to_string(),
        })
    }
}

fn test_config() -> Config {
    Config {
        work_dir: "/tmp/recif-flow-test".to_string(),
        http_port: 0,
        environment: "test".to_string(),
        payment_api_url: String::new(),
        payment_api_key: String::new(),
        payment_min_chargeable: 0.50,
        pickup_api_url: String::new(),
        home_delivery: CarrierRates {
            base_price: 6.90,
            free_shipping_threshold: 59.00,
        },
        relay_point: CarrierRates {
            base_price: 4.50,
            free_shipping_threshold: 49.00,
        },
        gift_sweep_interval_ms: 1_000,
        wheel_poll_interval_ms: 5_000,
    }
}

async fn seed_catalog(db: &DbService) {
    let products = ProductRepository::new(db.db.clone());
    products
        .create(Product {
            product_id: "sel-recifal".to_string(),
            title: "Sel récifal 20kg".to_string(),
            image_url: None,
            price: 25.00,
            payment_ref: "price_sel".to_string(),
            discount_percentage: None,
            discounted_payment_ref: None,
            stock: Some(10),
            variants: vec![],
        })
        .await
        .unwrap();
    products
        .create(Product {
            product_id: "pompe".to_string(),
            title: "Pompe de remontée".to_string(),
            image_url: None,
            price: 80.00,
            payment_ref: "price_pompe".to_string(),
            discount_percentage: Some(25),
            discounted_payment_ref: Some("price_pompe_promo".to_string()),
            stock: None,
            variants: vec![ProductVariant {
                name: "Debit:3000L/h".to_string(),
                price: Some(120.00),
                payment_ref: Some("price_pompe_3000".to_string()),
                discount_percentage: None,
                discounted_payment_ref: None,
                stock: None,
            }],
        })
        .await
        .unwrap();
    products
        .create(Product {
            product_id: "bandelettes".to_string(),
            title: "Bandelettes de test".to_string(),
            image_url: None,
            price: 4.90,
            payment_ref: "price_bandelettes".to_string(),
            discount_percentage: None,
            discounted_payment_ref: None,
            stock: None,
            variants: vec![],
        })
        .await
        .unwrap();

    ThresholdRepository::new(db.db.clone())
        .create(CartThreshold {
            threshold_id: "t40".to_string(),
            value: 40.0,
            gift_product_id: "bandelettes".to_string(),
            gift_variant: None,
            message: Some("Bandelettes offertes !".to_string()),
        })
        .await
        .unwrap();

    PromotionRepository::new(db.db.clone())
        .create(Promotion {
            code: "RECIF10".to_string(),
            kind: PromotionKind::Percentage,
            value: 10.0,
            is_active: true,
            expires_at: None,
            usage_limit: Some(100),
            usage_count: 0,
            min_order_amount: Some(30.0),
        })
        .await
        .unwrap();
}

fn checkout_request() -> CheckoutRequest {
    CheckoutRequest {
        carrier: CarrierKind::RelayPoint,
        pickup_point: Some(PickupPoint {
            pickup_id: "rp-44000-3".to_string(),
            name: "Tabac de la Place".to_string(),
            street: "1 place du Commerce".to_string(),
            postal_code: "44000".to_string(),
            city: "Nantes".to_string(),
        }),
        customer: CustomerForm {
            name: "Camille Martin".to_string(),
            email: "camille@example.fr".to_string(),
            phone: "+33612345678".to_string(),
            address: Some(Address {
                street: "12 rue des Coraux".to_string(),
                postal_code: "44000".to_string(),
                city: "Nantes".to_string(),
                country: "FR".to_string(),
            }),
        },
    }
}

#[tokio::test]
async fn test_full_storefront_journey() {
    let db = DbService::memory().await.unwrap();
    seed_catalog(&db).await;

    let carts = CartService::new(db.db.clone());
    let gifts = GiftManager::new(db.db.clone());
    let checkout = CheckoutService::new(
        db.db.clone(),
        Arc::new(RecordingProvider),
        test_config(),
    );
    let orders = OrderService::new(db.db.clone());

    // Fill the cart: 2 × 25.00 crosses the 40 € threshold.
    let cart = carts.create_cart().await.unwrap();
    let cart_id = cart.cart_id.clone();
    carts
        .add_item(
            &cart_id,
            AddItemRequest {
                product_id: "sel-recifal".to_string(),
                variant: None,
                quantity: Some(2),
            },
        )
        .await
        .unwrap();
    let view = carts.apply_promotion(&cart_id, "recif10").await.unwrap();
    assert_eq!(view.totals.subtotal, 50.0);
    assert_eq!(view.totals.discount, 5.0);
    assert_eq!(view.totals.total, 45.0);
    assert!(
        view.items
            .iter()
            .any(|i| i.item.kind == ItemKind::ThresholdGift)
    );

    // A wheel prize won on the storefront wheel lands in the cart with
    // the configured TTL.
    let won_at = chrono::Utc::now().timestamp_millis();
    let view = carts
        .claim_wheel_gift(
            &cart_id,
            ClaimWheelGiftRequest {
                product_id: "bandelettes".to_string(),
                variant: None,
                won_at: Some(won_at),
            },
        )
        .await
        .unwrap();
    let wheel = view
        .items
        .iter()
        .find(|i| i.item.kind == ItemKind::WheelGift)
        .unwrap();
    assert_eq!(wheel.item.expires_at, Some(won_at + 72 * 3_600_000));
    // Gift value never leaks into the payable subtotal.
    assert_eq!(view.totals.subtotal, 50.0);

    // Ops shortens the participation window; existing gifts follow.
    WheelSettingsRepository::new(db.db.clone())
        .set(WheelGiftSettings {
            participation_delay_hours: 48,
        })
        .await
        .unwrap();
    let settings = gifts.wheel_settings().await.unwrap();
    gifts.resync_wheel_ttls(&settings, won_at).await.unwrap();
    let view = carts.view(&cart_id).await.unwrap();
    let wheel = view
        .items
        .iter()
        .find(|i| i.item.kind == ItemKind::WheelGift)
        .unwrap();
    assert_eq!(wheel.item.expires_at, Some(won_at + 48 * 3_600_000));

    // Checkout: re-reconciled payload, relay carrier below the free
    // threshold (45.00 < 49.00) so shipping is billed.
    let session = checkout
        .create_session(&cart_id, &checkout_request())
        .await
        .unwrap();
    assert_eq!(session.session_id, "sess_flow_1");

    let order = checkout.confirm(&session.session_id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Paid);
    assert_eq!(order.subtotal, 50.0);
    assert_eq!(order.discount, 5.0);
    assert_eq!(order.shipping_cost, 4.50);
    assert_eq!(order.total, 49.50);
    assert!(order.lines.iter().any(|l| l.is_gift));

    // Payment confirmation emptied the cart.
    let view = carts.view(&cart_id).await.unwrap();
    assert!(view.items.is_empty());
    assert!(view.promotion.is_none());

    // Support thread on the order.
    orders
        .post_message(&order.order_id, SenderRole::Client, "Colis arrivé cassé")
        .await
        .unwrap();
    orders
        .post_message(&order.order_id, SenderRole::Admin, "On renvoie un colis !")
        .await
        .unwrap();
    orders.close_dispute(&order.order_id).await.unwrap();
    let err = orders
        .post_message(&order.order_id, SenderRole::Client, "Merci !")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DisputeClosed);
}

#[tokio::test]
async fn test_discounted_variant_resolution_at_checkout() {
    let db = DbService::memory().await.unwrap();
    seed_catalog(&db).await;

    let carts = CartService::new(db.db.clone());
    let checkout = CheckoutService::new(
        db.db.clone(),
        Arc::new(RecordingProvider),
        test_config(),
    );

    let cart = carts.create_cart().await.unwrap();
    let cart_id = cart.cart_id.clone();
    // Base product carries a 25% discount with its own payment ref.
    let view = carts
        .add_item(
            &cart_id,
            AddItemRequest {
                product_id: "pompe".to_string(),
                variant: None,
                quantity: Some(1),
            },
        )
        .await
        .unwrap();
    let line = &view.items[0].item;
    assert_eq!(line.unit_price, 60.0);
    assert_eq!(line.original_price, Some(80.0));

    let now = chrono::Utc::now().timestamp_millis();
    let payload = checkout
        .build_payload(&cart_id, &checkout_request(), now)
        .await
        .unwrap();
    let payable = payload.lines.iter().find(|l| l.item_key == "pompe").unwrap();
    assert_eq!(payable.unit_price, 60.0);
    assert_eq!(payable.payment_ref.as_deref(), Some("price_pompe_promo"));
    // 60.00 ≥ 49.00 relay threshold: free shipping.
    assert_eq!(payload.shipping_cost, 0.0);

    // The variant has no discount of its own: base payment ref is used.
    let cart2 = carts.create_cart().await.unwrap();
    carts
        .add_item(
            &cart2.cart_id,
            AddItemRequest {
                product_id: "pompe".to_string(),
                variant: Some("Debit:3000L/h".to_string()),
                quantity: Some(1),
            },
        )
        .await
        .unwrap();
    let payload = checkout
        .build_payload(&cart2.cart_id, &checkout_request(), now)
        .await
        .unwrap();
    let payable = payload
        .lines
        .iter()
        .find(|l| l.item_key == "pompe@Debit:3000L/h")
        .unwrap();
    assert_eq!(payable.unit_price, 120.0);
    assert_eq!(payable.payment_ref.as_deref(), Some("price_pompe_3000"));
}
