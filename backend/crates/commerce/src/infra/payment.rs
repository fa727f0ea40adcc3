//! HTTP client for the payment provider

use std::time::Duration;

use reqwest::Client;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::domain::port::{PaymentGateway, PaymentIntent, PaymentRequest};
use crate::domain::value_object::payment::{EWalletChannel, PaymentMethod, PaymentStatus};
use crate::error::{CommerceError, CommerceResult};

#[derive(Debug, Clone)]
pub struct PaymentGatewayConfig {
    /// Base URL, without trailing slash
    pub api_url: String,
    pub secret_key: String,
    pub timeout_secs: u64,
}

impl Default for PaymentGatewayConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.xendit.co".to_string(),
            secret_key: String::new(),
            timeout_secs: 15,
        }
    }
}

/// Creates payment requests at the provider's REST API
#[derive(Clone)]
pub struct HttpPaymentGateway {
    client: Client,
    base_url: String,
    secret_key: String,
}

impl HttpPaymentGateway {
    pub fn new(config: PaymentGatewayConfig) -> CommerceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CommerceError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            secret_key: config.secret_key,
        })
    }
}

impl PaymentGateway for HttpPaymentGateway {
    async fn create_payment(&self, request: &PaymentRequest) -> CommerceResult<PaymentIntent> {
        let body = WirePaymentRequest::from_request(request)?;
        let url = format!("{}/payment_requests", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CommerceError::PaymentGateway(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(CommerceError::PaymentGateway(format!(
                "Provider returned {status}: {text}"
            )));
        }

        let created: WirePaymentResponse = response
            .json()
            .await
            .map_err(|e| CommerceError::PaymentGateway(format!("Unreadable response: {e}")))?;

        tracing::debug!(
            reference_id = %request.reference_id,
            payment_id = %created.id,
            status = %created.status,
            "Payment request created"
        );

        Ok(created.into_intent())
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Serialize)]
struct WirePaymentRequest<'a> {
    reference_id: &'a str,
    amount: f64,
    currency: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_email: Option<&'a str>,
    payment_method: WirePaymentMethod<'a>,
}

impl<'a> WirePaymentRequest<'a> {
    fn from_request(request: &'a PaymentRequest) -> CommerceResult<Self> {
        let amount = request.amount.to_f64().ok_or_else(|| {
            CommerceError::Internal(format!("Amount out of range: {}", request.amount))
        })?;

        let payment_method = match &request.method {
            PaymentMethod::Card { token_id } => WirePaymentMethod {
                kind: "CARD",
                reusability: "ONE_TIME_USE",
                card: Some(WireCard { token_id }),
                ewallet: None,
            },
            PaymentMethod::EWallet {
                channel,
                mobile_number,
            } => WirePaymentMethod {
                kind: "EWALLET",
                reusability: "ONE_TIME_USE",
                card: None,
                ewallet: Some(WireEWallet {
                    channel_code: *channel,
                    channel_properties: WireChannelProperties {
                        mobile_number: mobile_number.as_deref(),
                    },
                }),
            },
        };

        Ok(Self {
            reference_id: &request.reference_id,
            amount,
            currency: &request.currency,
            description: &request.description,
            customer_email: request.customer_email.as_deref(),
            payment_method,
        })
    }
}

#[derive(Serialize)]
struct WirePaymentMethod<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    reusability: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    card: Option<WireCard<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ewallet: Option<WireEWallet<'a>>,
}

#[derive(Serialize)]
struct WireCard<'a> {
    token_id: &'a str,
}

#[derive(Serialize)]
struct WireEWallet<'a> {
    channel_code: EWalletChannel,
    channel_properties: WireChannelProperties<'a>,
}

#[derive(Serialize)]
struct WireChannelProperties<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    mobile_number: Option<&'a str>,
}

#[derive(Deserialize)]
struct WirePaymentResponse {
    id: String,
    status: PaymentStatus,
    #[serde(default)]
    actions: Vec<WireAction>,
}

#[derive(Deserialize)]
struct WireAction {
    url: Option<String>,
}

impl WirePaymentResponse {
    fn into_intent(self) -> PaymentIntent {
        PaymentIntent {
            reference: self.id,
            status: self.status,
            action_url: self.actions.into_iter().find_map(|a| a.url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn request(method: PaymentMethod) -> PaymentRequest {
        PaymentRequest {
            reference_id: "ORD-20260101-ABC123".to_string(),
            amount: Decimal::new(265000, 0),
            currency: "IDR".to_string(),
            method,
            customer_email: None,
            description: "Order ORD-20260101-ABC123".to_string(),
        }
    }

    #[test]
    fn test_card_wire_body() {
        let req = request(PaymentMethod::Card {
            token_id: "tok_1".to_string(),
        });
        let body = serde_json::to_value(WirePaymentRequest::from_request(&req).unwrap()).unwrap();

        assert_eq!(body["amount"], 265000.0);
        assert_eq!(body["payment_method"]["type"], "CARD");
        assert_eq!(body["payment_method"]["card"]["token_id"], "tok_1");
        assert!(body["payment_method"].get("ewallet").is_none());
        assert!(body.get("customer_email").is_none());
    }

    #[test]
    fn test_ewallet_wire_body() {
        let req = request(PaymentMethod::EWallet {
            channel: EWalletChannel::Ovo,
            mobile_number: Some("+628123456789".to_string()),
        });
        let body = serde_json::to_value(WirePaymentRequest::from_request(&req).unwrap()).unwrap();

        assert_eq!(body["payment_method"]["type"], "EWALLET");
        assert_eq!(body["payment_method"]["ewallet"]["channel_code"], "OVO");
        assert_eq!(
            body["payment_method"]["ewallet"]["channel_properties"]["mobile_number"],
            "+628123456789"
        );
    }

    #[test]
    fn test_response_takes_first_action_url() {
        let response: WirePaymentResponse = serde_json::from_value(serde_json::json!({
            "id": "pr-1",
            "status": "PENDING",
            "actions": [{ "url": null }, { "url": "https://pay.example/approve" }]
        }))
        .unwrap();

        let intent = response.into_intent();
        assert_eq!(intent.reference, "pr-1");
        assert_eq!(intent.status, PaymentStatus::Pending);
        assert_eq!(intent.action_url.as_deref(), Some("https://pay.example/approve"));
    }
}
