//! GoCardless records and request parameters.
//!
//! Records are decoded leniently: apart from `id`, every field may be absent or `null`. Only the
//! fields the tools read are modelled; anything else in the payload is ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type Metadata = Map<String, Value>;

#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub id: String,
    pub email: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub company_name: Option<String>,
    pub created_at: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    pub id: String,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub charge_date: Option<String>,
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub links: PaymentLinks,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentLinks {
    pub mandate: Option<String>,
    pub subscription: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Mandate {
    pub id: String,
    pub status: Option<String>,
    pub scheme: Option<String>,
    pub created_at: Option<String>,
    pub reference: Option<String>,
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub links: MandateLinks,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MandateLinks {
    pub customer: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub interval_unit: Option<String>,
    pub interval: Option<i64>,
    pub created_at: Option<String>,
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub links: SubscriptionLinks,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionLinks {
    pub mandate: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Payout {
    pub id: String,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

// List filters. `None` fields are not sent.

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListCustomersParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListPaymentsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandate: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListMandatesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListSubscriptionsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListPayoutsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// Body of `POST /customers`.
#[derive(Debug, Clone, Serialize)]
pub struct NewCustomer {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// Body of `POST /payments`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPayment {
    /// Minor currency units (1000 = £10.00).
    pub amount: i64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub links: NewPaymentLinks,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPaymentLinks {
    pub mandate: String,
}
