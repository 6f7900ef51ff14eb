//! Restaurant REST API Client
//!
//! Wraps every backend call the dashboard makes. Requests carry the bearer
//! token from the [`Session`]; a 401 clears the session and fires the
//! `on_unauthorized` hook so the UI can route to the login page.

mod error;
mod session;
mod transport;

pub use error::{ApiError, ApiResult, TransportError};
pub use session::{MemoryTokenStore, Session, TokenStore, TOKEN_KEY, USER_KEY};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method};

#[cfg(not(target_arch = "wasm32"))]
pub use transport::ReqwestTransport;

#[cfg(test)]
pub(crate) use transport::testing;

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::models::{
    Account, AdminAccount, AnalyticsRange, AnalyticsSummary, Booking, BookingStatus, CategoryInput,
    Menu, MenuCategory, MenuItem, MenuItemInput, OperatingHoursUpdate, Order, OrderFilter,
    OrderStatus, PaymentStatus, PhoneNumberUpdate, PlatformStats, ProfileUpdate, Transcript,
    TranscriptKind, UserProfile,
};

/// Success envelope: every 2xx body is `{ "data": ... }`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error body; backends disagree on the field name
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// REST client, generic over how bytes move
pub struct ApiClient<T: HttpTransport> {
    base_url: String,
    transport: T,
    session: Rc<Session>,
    on_unauthorized: Option<Rc<dyn Fn()>>,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T, session: Rc<Session>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            session,
            on_unauthorized: None,
        }
    }

    /// Hook run after a 401 has cleared the session
    pub fn on_unauthorized(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Some(Rc::new(hook));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Rc<Session> {
        &self.session
    }

    // ------------------------------------------------------------------
    // Orders
    // ------------------------------------------------------------------

    pub async fn list_orders(&self, account_id: &str, filter: &OrderFilter) -> ApiResult<Vec<Order>> {
        let mut params = vec![("account_id", account_id.to_string())];
        params.extend(filter.to_params());
        self.get("/restaurant/orders", &params).await
    }

    pub async fn get_order(&self, order_id: &str) -> ApiResult<Order> {
        self.get(&format!("/restaurant/orders/{}", encode(order_id)), &[])
            .await
    }

    pub async fn update_order_status(&self, order_id: &str, status: OrderStatus) -> ApiResult<Order> {
        self.send(
            Method::Patch,
            &format!("/restaurant/orders/{}/status", encode(order_id)),
            Some(&json!({ "status": status })),
        )
        .await
    }

    pub async fn update_payment_status(
        &self,
        order_id: &str,
        status: PaymentStatus,
    ) -> ApiResult<Order> {
        self.send(
            Method::Patch,
            &format!("/restaurant/orders/{}/payment", encode(order_id)),
            Some(&json!({ "payment_status": status })),
        )
        .await
    }

    // ------------------------------------------------------------------
    // Reservations
    // ------------------------------------------------------------------

    pub async fn list_bookings(
        &self,
        account_id: &str,
        date: Option<&str>,
        status: Option<BookingStatus>,
    ) -> ApiResult<Vec<Booking>> {
        let mut params = vec![("account_id", account_id.to_string())];
        if let Some(date) = date.filter(|d| !d.is_empty()) {
            params.push(("date", date.to_string()));
        }
        if let Some(status) = status {
            params.push(("status", status.as_str().to_string()));
        }
        self.get("/bookings", &params).await
    }

    pub async fn update_booking_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
    ) -> ApiResult<Booking> {
        self.send(
            Method::Patch,
            &format!("/bookings/{}/status", encode(booking_id)),
            Some(&json!({ "status": status })),
        )
        .await
    }

    // ------------------------------------------------------------------
    // Menu
    // ------------------------------------------------------------------

    pub async fn get_menu(&self, account_id: &str) -> ApiResult<Menu> {
        let menu: Menu = self
            .get(&format!("/onboarding/accounts/{}/menu", encode(account_id)), &[])
            .await?;
        Ok(menu.sorted())
    }

    pub async fn create_menu_item(&self, account_id: &str, input: &MenuItemInput) -> ApiResult<MenuItem> {
        self.send(
            Method::Post,
            &format!("/onboarding/accounts/{}/menu/items", encode(account_id)),
            Some(input),
        )
        .await
    }

    pub async fn update_menu_item(
        &self,
        account_id: &str,
        item_id: &str,
        input: &MenuItemInput,
    ) -> ApiResult<MenuItem> {
        self.send(
            Method::Put,
            &format!(
                "/onboarding/accounts/{}/menu/items/{}",
                encode(account_id),
                encode(item_id)
            ),
            Some(input),
        )
        .await
    }

    pub async fn delete_menu_item(&self, account_id: &str, item_id: &str) -> ApiResult<()> {
        self.send_empty(
            Method::Delete,
            &format!(
                "/onboarding/accounts/{}/menu/items/{}",
                encode(account_id),
                encode(item_id)
            ),
        )
        .await
    }

    pub async fn set_item_availability(
        &self,
        account_id: &str,
        item_id: &str,
        available: bool,
    ) -> ApiResult<MenuItem> {
        self.send(
            Method::Patch,
            &format!(
                "/onboarding/accounts/{}/menu/items/{}/availability",
                encode(account_id),
                encode(item_id)
            ),
            Some(&json!({ "is_available": available })),
        )
        .await
    }

    pub async fn create_category(&self, account_id: &str, input: &CategoryInput) -> ApiResult<MenuCategory> {
        self.send(
            Method::Post,
            &format!("/onboarding/accounts/{}/menu/categories", encode(account_id)),
            Some(input),
        )
        .await
    }

    pub async fn update_category(
        &self,
        account_id: &str,
        category_id: &str,
        input: &CategoryInput,
    ) -> ApiResult<MenuCategory> {
        self.send(
            Method::Put,
            &format!(
                "/onboarding/accounts/{}/menu/categories/{}",
                encode(account_id),
                encode(category_id)
            ),
            Some(input),
        )
        .await
    }

    pub async fn delete_category(&self, account_id: &str, category_id: &str) -> ApiResult<()> {
        self.send_empty(
            Method::Delete,
            &format!(
                "/onboarding/accounts/{}/menu/categories/{}",
                encode(account_id),
                encode(category_id)
            ),
        )
        .await
    }

    // ------------------------------------------------------------------
    // Transcripts & analytics
    // ------------------------------------------------------------------

    pub async fn list_transcripts(
        &self,
        account_id: &str,
        kind: Option<TranscriptKind>,
    ) -> ApiResult<Vec<Transcript>> {
        let mut params = vec![("account_id", account_id.to_string())];
        if let Some(kind) = kind {
            params.push(("type", kind.as_str().to_string()));
        }
        self.get("/transcripts", &params).await
    }

    pub async fn get_transcript(&self, transcript_id: &str) -> ApiResult<Transcript> {
        self.get(&format!("/transcripts/{}", encode(transcript_id)), &[])
            .await
    }

    pub async fn get_analytics(&self, account_id: &str, range: AnalyticsRange) -> ApiResult<AnalyticsSummary> {
        self.get(
            "/analytics",
            &[
                ("account_id", account_id.to_string()),
                ("range", range.as_param().to_string()),
            ],
        )
        .await
    }

    // ------------------------------------------------------------------
    // Account settings
    // ------------------------------------------------------------------

    pub async fn get_account(&self, account_id: &str) -> ApiResult<Account> {
        self.get(&format!("/onboarding/accounts/{}", encode(account_id)), &[])
            .await
    }

    pub async fn update_profile(&self, account_id: &str, update: &ProfileUpdate) -> ApiResult<Account> {
        self.send(
            Method::Put,
            &format!("/onboarding/accounts/{}", encode(account_id)),
            Some(update),
        )
        .await
    }

    pub async fn update_phone_number(
        &self,
        account_id: &str,
        update: &PhoneNumberUpdate,
    ) -> ApiResult<Account> {
        self.send(
            Method::Put,
            &format!("/onboarding/accounts/{}/phone", encode(account_id)),
            Some(update),
        )
        .await
    }

    pub async fn update_operating_hours(
        &self,
        account_id: &str,
        update: &OperatingHoursUpdate,
    ) -> ApiResult<Account> {
        self.send(
            Method::Put,
            &format!("/onboarding/accounts/{}/hours", encode(account_id)),
            Some(update),
        )
        .await
    }

    // ------------------------------------------------------------------
    // Admin & auth
    // ------------------------------------------------------------------

    pub async fn admin_list_accounts(&self) -> ApiResult<Vec<AdminAccount>> {
        self.get("/admin/accounts", &[]).await
    }

    pub async fn admin_platform_stats(&self) -> ApiResult<PlatformStats> {
        self.get("/admin/stats", &[]).await
    }

    /// Fetch the signed-in user and cache it on the session
    pub async fn current_user(&self) -> ApiResult<UserProfile> {
        let user: UserProfile = self.get("/auth/me", &[]).await?;
        self.session.set_user(user.clone());
        Ok(user)
    }

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------

    async fn get<R: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> ApiResult<R> {
        let mut url = format!("{}{}", self.base_url, path);
        if !params.is_empty() {
            let query: Vec<String> = params
                .iter()
                .map(|(k, v)| format!("{}={}", k, encode(v)))
                .collect();
            url.push('?');
            url.push_str(&query.join("&"));
        }
        let response = self.execute(Method::Get, url, None).await?;
        decode(&response)
    }

    async fn send<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<R> {
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let url = format!("{}{}", self.base_url, path);
        let response = self.execute(method, url, body).await?;
        decode(&response)
    }

    async fn send_empty(&self, method: Method, path: &str) -> ApiResult<()> {
        let url = format!("{}{}", self.base_url, path);
        self.execute(method, url, None).await.map(|_| ())
    }

    async fn execute(&self, method: Method, url: String, body: Option<String>) -> ApiResult<HttpResponse> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("X-Request-Id".to_string(), request_id.clone()),
        ];
        if let Some(token) = self.session.token() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        debug!(method = method.as_str(), url = %url, request_id = %request_id, "API request");

        let response = self
            .transport
            .send(HttpRequest {
                method,
                url,
                headers,
                body,
            })
            .await?;

        if response.status == 401 {
            warn!(request_id = %request_id, "API returned 401, clearing session");
            self.session.clear();
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
            return Err(ApiError::Unauthorized);
        }

        if !response.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .ok()
                .and_then(|b| b.error.or(b.message))
                .unwrap_or_default();
            return Err(ApiError::Status {
                status: response.status,
                message,
            });
        }

        Ok(response)
    }
}

fn decode<R: DeserializeOwned>(response: &HttpResponse) -> ApiResult<R> {
    serde_json::from_str::<Envelope<R>>(&response.body)
        .map(|e| e.data)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::testing::MockTransport;
    use super::*;
    use std::cell::Cell;

    const ORDER_JSON: &str = r#"{"data": {
        "id": "o1", "status": "preparing", "payment_status": "paid",
        "items": "[{\"name\":\"Burger\",\"quantity\":2,\"price\":1200}]",
        "total": 2400, "created_at": "2024-03-10T12:00:00Z"
    }}"#;

    fn client(transport: &MockTransport) -> ApiClient<MockTransport> {
        let session = Rc::new(Session::new(Box::new(MemoryTokenStore::with_token("tok"))));
        ApiClient::new("https://api.example.com/", transport.clone(), session)
    }

    #[tokio::test]
    async fn test_attaches_headers() {
        let transport = MockTransport::default();
        transport.respond(200, ORDER_JSON);
        let api = client(&transport);

        let order = api.get_order("o1").await.unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(order.items.total_quantity(), 2);

        let request = transport.last_request();
        assert_eq!(request.url, "https://api.example.com/restaurant/orders/o1");
        assert_eq!(request.header("authorization"), Some("Bearer tok"));
        assert!(request.header("x-request-id").is_some());
        assert!(request.header("content-type").is_none());
    }

    #[tokio::test]
    async fn test_list_orders_query_string() {
        let transport = MockTransport::default();
        transport.respond(200, r#"{"data": []}"#);
        let api = client(&transport);

        let filter = OrderFilter::default()
            .with_status(OrderStatus::Pending)
            .with_search("Ada L");
        let orders = api.list_orders("acc 1", &filter).await.unwrap();
        assert!(orders.is_empty());
        assert_eq!(
            transport.last_request().url,
            "https://api.example.com/restaurant/orders?account_id=acc%201&status=pending&search=Ada%20L"
        );
    }

    #[tokio::test]
    async fn test_status_update_body() {
        let transport = MockTransport::default();
        transport.respond(200, ORDER_JSON);
        let api = client(&transport);

        api.update_payment_status("o1", PaymentStatus::Paid)
            .await
            .unwrap();
        let request = transport.last_request();
        assert_eq!(request.method, Method::Patch);
        assert!(request.url.ends_with("/restaurant/orders/o1/payment"));
        assert_eq!(request.body.as_deref(), Some(r#"{"payment_status":"paid"}"#));
        assert_eq!(request.header("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session() {
        let transport = MockTransport::default();
        transport.respond(401, r#"{"error": "expired"}"#);
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        let api = client(&transport).on_unauthorized(move || counter.set(counter.get() + 1));

        let result = api.get_account("a1").await;
        assert_eq!(result.unwrap_err(), ApiError::Unauthorized);
        assert_eq!(fired.get(), 1);
        assert!(!api.session().is_authenticated());

        // Next request goes out without a token
        transport.respond(200, r#"{"data": []}"#);
        api.admin_list_accounts().await.unwrap();
        assert!(transport.last_request().header("authorization").is_none());
    }

    #[tokio::test]
    async fn test_error_body_message() {
        let transport = MockTransport::default();
        transport.respond(422, r#"{"message": "Invalid phone number"}"#);
        transport.respond(500, "<html>oops</html>");
        let api = client(&transport);

        let update = PhoneNumberUpdate {
            twilio_phone_number: "+15551234567".into(),
        };
        assert_eq!(
            api.update_phone_number("a1", &update).await.unwrap_err(),
            ApiError::Status {
                status: 422,
                message: "Invalid phone number".into()
            }
        );
        assert_eq!(
            api.get_menu("a1").await.unwrap_err(),
            ApiError::Status {
                status: 500,
                message: String::new()
            }
        );
    }

    #[tokio::test]
    async fn test_decode_and_transport_errors() {
        let transport = MockTransport::default();
        transport.respond(200, "not json");
        transport.fail(TransportError::Timeout);
        let api = client(&transport);

        assert!(matches!(
            api.admin_platform_stats().await,
            Err(ApiError::Decode(_))
        ));
        assert_eq!(
            api.admin_platform_stats().await.unwrap_err(),
            ApiError::Transport(TransportError::Timeout)
        );
    }

    #[tokio::test]
    async fn test_delete_ignores_body() {
        let transport = MockTransport::default();
        transport.respond(204, "");
        let api = client(&transport);
        api.delete_menu_item("a1", "i1").await.unwrap();
        assert_eq!(transport.last_request().method, Method::Delete);
    }

    #[tokio::test]
    async fn test_current_user_cached() {
        let transport = MockTransport::default();
        transport.respond(
            200,
            r#"{"data": {"id": "u1", "email": "chef@example.com", "role": "owner", "account_id": "a1"}}"#,
        );
        let api = client(&transport);
        let user = api.current_user().await.unwrap();
        assert_eq!(api.session().user(), Some(user));
    }
}
