//! Stripe and Paystack checkout flows against a mock platform.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use paydesk_client::{
    CardConfirmation, CardConfirmer, CheckoutError, CheckoutOutcome, CheckoutRequest,
    FailureKind, InlineCheckout, InlineResult, InlineSession, PaydeskClient, PaystackCheckout,
    StripeCheckout,
};
use paydesk_core::{Currency, Field, Money, PayerDetails, Provider};
use paydesk_events::PaymentNotifier;

// ============================================================================
// Vendor fakes
// ============================================================================

struct FakeCard {
    result: CardConfirmation,
    secrets: Mutex<Vec<String>>,
}

impl FakeCard {
    fn new(result: CardConfirmation) -> Self {
        Self {
            result,
            secrets: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CardConfirmer for FakeCard {
    async fn confirm_card_payment(
        &self,
        client_secret: &str,
        billing: &PayerDetails,
    ) -> CardConfirmation {
        assert!(billing.address.is_some());
        self.secrets.lock().unwrap().push(client_secret.to_string());
        self.result.clone()
    }
}

struct FakePopup {
    result: Option<InlineResult>,
    opened: Mutex<Option<InlineSession>>,
}

impl FakePopup {
    /// Calls back with whatever reference it was opened with.
    fn completing() -> Self {
        Self {
            result: None,
            opened: Mutex::new(None),
        }
    }

    fn returning(result: InlineResult) -> Self {
        Self {
            result: Some(result),
            opened: Mutex::new(None),
        }
    }
}

#[async_trait]
impl InlineCheckout for FakePopup {
    async fn open(&self, session: &InlineSession) -> InlineResult {
        *self.opened.lock().unwrap() = Some(session.clone());
        self.result.clone().unwrap_or_else(|| InlineResult::Callback {
            reference: session.reference.clone(),
        })
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn client(server: &MockServer) -> PaydeskClient {
    PaydeskClient::new(&format!("{}/api", server.uri())).unwrap()
}

fn counting_notifier() -> (PaymentNotifier, Arc<AtomicUsize>, paydesk_events::Subscription) {
    let notifier = PaymentNotifier::in_memory();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let sub = notifier.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (notifier, hits, sub)
}

fn card_request() -> CheckoutRequest {
    CheckoutRequest::new(
        Money::from_minor(5_000, Currency::Usd),
        PayerDetails::new("Ada Obi", "ada@example.com").with_address("1 Marina, Lagos"),
    )
    .with_description("Order #1001")
}

fn paystack_request() -> CheckoutRequest {
    CheckoutRequest::new(
        Money::from_minor(1_250_000, Currency::Ngn),
        PayerDetails::new("Chidi Okeke", "chidi@example.com").with_phone("0801 234 5678"),
    )
    .with_metadata(json!({ "cartId": "cart_7" }))
}

async fn mount_intent(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/payments/stripe/intents"))
        .and(body_partial_json(json!({ "amount": 5_000, "currency": "USD" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pi_123",
            "clientSecret": "pi_123_secret_abc"
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, status: &str, code: u16) {
    Mock::given(method("POST"))
        .and(path("/api/payments/stripe/status"))
        .and(body_partial_json(json!({ "paymentIntentId": "pi_123", "status": status })))
        .respond_with(ResponseTemplate::new(code).set_body_json(json!({})))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_paystack_init(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/payments/paystack/initialize"))
        .and(body_partial_json(json!({
            "email": "chidi@example.com",
            "amount": 1_250_000,
            "currency": "NGN",
            "metadata": { "cartId": "cart_7" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "reference": "ps_ref_42",
                "accessCode": "ac_42",
                "authorizationUrl": "https://checkout.paystack.com/ac_42"
            }
        })))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Stripe
// ============================================================================

#[tokio::test]
async fn stripe_success_is_verified_then_notified() {
    let server = MockServer::start().await;
    mount_intent(&server).await;
    mount_status(&server, "succeeded", 200).await;
    Mock::given(method("GET"))
        .and(path("/api/payments/stripe/verify/pi_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "succeeded",
            "amount": 5_000,
            "currency": "USD",
            "transactionId": "txn_1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (notifier, hits, _sub) = counting_notifier();
    let card = FakeCard::new(CardConfirmation::Succeeded);
    let checkout = StripeCheckout::new(client(&server), card).with_notifier(notifier);

    let outcome = checkout.pay(&card_request()).await.unwrap();

    let payment = match outcome {
        CheckoutOutcome::Success(payment) => payment,
        other => panic!("expected success, got {other:?}"),
    };
    assert_eq!(payment.provider(), Provider::Stripe);
    assert_eq!(payment.reference(), "pi_123");
    assert_eq!(payment.amount(), Money::from_minor(5_000, Currency::Usd));
    assert_eq!(payment.transaction_id().map(|t| t.as_str()), Some("txn_1"));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn stripe_intent_carries_idempotency_key() {
    let server = MockServer::start().await;
    mount_intent(&server).await;
    mount_status(&server, "declined", 200).await;

    let card = FakeCard::new(CardConfirmation::Declined {
        reason: "insufficient funds".into(),
    });
    let checkout = StripeCheckout::new(client(&server), card);
    checkout.pay(&card_request()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let intent = requests
        .iter()
        .find(|r| r.url.path() == "/api/payments/stripe/intents")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&intent.body).unwrap();
    assert!(body["idempotencyKey"].as_str().is_some_and(|k| !k.is_empty()));
    assert_eq!(body["description"], "Order #1001");
}

#[tokio::test]
async fn stripe_decline_skips_verification() {
    let server = MockServer::start().await;
    mount_intent(&server).await;
    mount_status(&server, "declined", 200).await;
    Mock::given(method("GET"))
        .and(path("/api/payments/stripe/verify/pi_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "succeeded" })))
        .expect(0)
        .mount(&server)
        .await;

    let (notifier, hits, _sub) = counting_notifier();
    let card = FakeCard::new(CardConfirmation::Declined {
        reason: "insufficient funds".into(),
    });
    let checkout = StripeCheckout::new(client(&server), card).with_notifier(notifier);

    let outcome = checkout.pay(&card_request()).await.unwrap();

    assert_eq!(
        outcome,
        CheckoutOutcome::Declined {
            reason: "insufficient funds".into()
        }
    );
    assert_eq!(outcome.failure_kind(), Some(FailureKind::PaymentDeclined));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn stripe_widget_error_is_reported_as_error() {
    let server = MockServer::start().await;
    mount_intent(&server).await;
    mount_status(&server, "error", 200).await;

    let card = FakeCard::new(CardConfirmation::Error {
        message: "card element not mounted".into(),
    });
    let checkout = StripeCheckout::new(client(&server), card);

    let outcome = checkout.pay(&card_request()).await.unwrap();
    assert!(matches!(outcome, CheckoutOutcome::Declined { .. }));
}

#[tokio::test]
async fn stripe_unverified_payment_does_not_notify() {
    let server = MockServer::start().await;
    mount_intent(&server).await;
    mount_status(&server, "succeeded", 200).await;
    Mock::given(method("GET"))
        .and(path("/api/payments/stripe/verify/pi_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "requires_payment_method",
            "message": "Payment not completed"
        })))
        .mount(&server)
        .await;

    let (notifier, hits, _sub) = counting_notifier();
    let card = FakeCard::new(CardConfirmation::Succeeded);
    let checkout = StripeCheckout::new(client(&server), card).with_notifier(notifier);

    let outcome = checkout.pay(&card_request()).await.unwrap();

    assert_eq!(
        outcome,
        CheckoutOutcome::VerificationFailed {
            reason: "Payment not completed".into()
        }
    );
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn stripe_verified_amount_mismatch_fails() {
    let server = MockServer::start().await;
    mount_intent(&server).await;
    mount_status(&server, "succeeded", 200).await;
    Mock::given(method("GET"))
        .and(path("/api/payments/stripe/verify/pi_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "succeeded",
            "amount": 500,
            "currency": "USD"
        })))
        .mount(&server)
        .await;

    let card = FakeCard::new(CardConfirmation::Succeeded);
    let checkout = StripeCheckout::new(client(&server), card);
    let outcome = checkout.pay(&card_request()).await.unwrap();

    assert_eq!(outcome.failure_kind(), Some(FailureKind::VerificationFailed));
}

#[tokio::test]
async fn stripe_verification_api_error_is_verification_failure() {
    let server = MockServer::start().await;
    mount_intent(&server).await;
    mount_status(&server, "succeeded", 200).await;
    Mock::given(method("GET"))
        .and(path("/api/payments/stripe/verify/pi_123"))
        .respond_with(
            ResponseTemplate::new(502).set_body_json(json!({ "error": "Stripe unavailable" })),
        )
        .mount(&server)
        .await;

    let (notifier, hits, _sub) = counting_notifier();
    let card = FakeCard::new(CardConfirmation::Succeeded);
    let checkout = StripeCheckout::new(client(&server), card).with_notifier(notifier);

    let outcome = checkout.pay(&card_request()).await.unwrap();
    assert!(matches!(outcome, CheckoutOutcome::VerificationFailed { .. }));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn stripe_status_report_failure_does_not_block() {
    let server = MockServer::start().await;
    mount_intent(&server).await;
    mount_status(&server, "succeeded", 500).await;
    Mock::given(method("GET"))
        .and(path("/api/payments/stripe/verify/pi_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "succeeded" })))
        .expect(1)
        .mount(&server)
        .await;

    let card = FakeCard::new(CardConfirmation::Succeeded);
    let checkout = StripeCheckout::new(client(&server), card);
    assert!(checkout.pay(&card_request()).await.unwrap().is_success());
}

#[tokio::test]
async fn stripe_requires_billing_address_before_any_request() {
    let server = MockServer::start().await;

    let card = FakeCard::new(CardConfirmation::Succeeded);
    let checkout = StripeCheckout::new(client(&server), card);
    let request = CheckoutRequest::new(
        Money::from_minor(5_000, Currency::Usd),
        PayerDetails::new("Ada Obi", "ada@example.com"),
    );

    let err = checkout.pay(&request).await.unwrap_err();

    match &err {
        CheckoutError::Validation(v) => assert_eq!(v.field, Field::Address),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.kind(), FailureKind::ValidationError);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn stripe_intent_refusal_is_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/payments/stripe/intents"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "message": "Currency not supported" })),
        )
        .mount(&server)
        .await;

    let card = FakeCard::new(CardConfirmation::Succeeded);
    let checkout = StripeCheckout::new(client(&server), card);

    let err = checkout.pay(&card_request()).await.unwrap_err();
    match err {
        CheckoutError::Service { status, message } => {
            assert_eq!(status, Some(400));
            assert_eq!(message, "Currency not supported");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ============================================================================
// Paystack
// ============================================================================

#[tokio::test]
async fn paystack_success_is_verified_then_notified() {
    let server = MockServer::start().await;
    mount_paystack_init(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/payments/paystack/verify/ps_ref_42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "status": "success",
                "reference": "ps_ref_42",
                "amount": 1_250_000,
                "currency": "NGN"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (notifier, hits, _sub) = counting_notifier();
    let popup = Arc::new(FakePopup::completing());
    let checkout = PaystackCheckout::new(client(&server), SharedPopup(Arc::clone(&popup)))
        .with_notifier(notifier);

    let outcome = checkout.pay(&paystack_request()).await.unwrap();

    assert!(outcome.is_success());
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    let session = popup.opened.lock().unwrap().clone().unwrap();
    assert_eq!(session.reference, "ps_ref_42");
    assert_eq!(session.access_code, "ac_42");
    assert_eq!(session.amount, 1_250_000);
}

#[tokio::test]
async fn paystack_closed_popup_is_cancelled() {
    let server = MockServer::start().await;
    mount_paystack_init(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/payments/paystack/verify/ps_ref_42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(0)
        .mount(&server)
        .await;

    let (notifier, hits, _sub) = counting_notifier();
    let popup = FakePopup::returning(InlineResult::Closed);
    let checkout = PaystackCheckout::new(client(&server), popup).with_notifier(notifier);

    let outcome = checkout.pay(&paystack_request()).await.unwrap();

    assert_eq!(outcome, CheckoutOutcome::Cancelled);
    assert_eq!(outcome.failure_kind(), None);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn paystack_foreign_reference_is_rejected_without_verifying() {
    let server = MockServer::start().await;
    mount_paystack_init(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/payments/paystack/verify/ps_other"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(0)
        .mount(&server)
        .await;

    let popup = FakePopup::returning(InlineResult::Callback {
        reference: "ps_other".into(),
    });
    let checkout = PaystackCheckout::new(client(&server), popup);

    let outcome = checkout.pay(&paystack_request()).await.unwrap();
    assert!(matches!(outcome, CheckoutOutcome::VerificationFailed { .. }));
}

#[tokio::test]
async fn paystack_failed_verification_does_not_notify() {
    let server = MockServer::start().await;
    mount_paystack_init(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/payments/paystack/verify/ps_ref_42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "failed",
            "verified": false
        })))
        .mount(&server)
        .await;

    let (notifier, hits, _sub) = counting_notifier();
    let checkout = PaystackCheckout::new(client(&server), FakePopup::completing())
        .with_notifier(notifier);

    let outcome = checkout.pay(&paystack_request()).await.unwrap();

    assert_eq!(outcome.failure_kind(), Some(FailureKind::VerificationFailed));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn paystack_unreachable_platform_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = PaydeskClient::new(&format!("http://127.0.0.1:{port}/api")).unwrap();
    let checkout = PaystackCheckout::new(client, FakePopup::completing());

    let err = checkout.pay(&paystack_request()).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::NetworkError);
    assert_eq!(err.kind().code(), "network_error");
}

/// Lets a test keep a handle on the popup it hands to the flow.
struct SharedPopup(Arc<FakePopup>);

#[async_trait]
impl InlineCheckout for SharedPopup {
    async fn open(&self, session: &InlineSession) -> InlineResult {
        self.0.open(session).await
    }
}
