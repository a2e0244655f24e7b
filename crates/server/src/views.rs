//! Flattened, agent-facing shapes of GoCardless records.
//!
//! Field order here is the order agents see in the JSON text.
//! Absent values render as `null`; absent metadata renders as `{}`.

use gocardless_api::models::{Customer, Mandate, Metadata, Payment, Payout, Subscription};
use serde::Serialize;

fn metadata(m: Option<&Metadata>) -> Metadata {
    m.cloned().unwrap_or_default()
}

// Customers

#[derive(Debug, Serialize)]
pub struct CustomerSummary {
    pub id: String,
    pub email: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub company_name: Option<String>,
    pub created_at: Option<String>,
}

impl From<&Customer> for CustomerSummary {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id.clone(),
            email: c.email.clone(),
            given_name: c.given_name.clone(),
            family_name: c.family_name.clone(),
            company_name: c.company_name.clone(),
            created_at: c.created_at.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerDetail {
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
    pub metadata: Metadata,
}

impl From<&Customer> for CustomerDetail {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id.clone(),
            email: c.email.clone(),
            given_name: c.given_name.clone(),
            family_name: c.family_name.clone(),
            company_name: c.company_name.clone(),
            created_at: c.created_at.clone(),
            address_line1: c.address_line1.clone(),
            address_line2: c.address_line2.clone(),
            city: c.city.clone(),
            postal_code: c.postal_code.clone(),
            country_code: c.country_code.clone(),
            metadata: metadata(c.metadata.as_ref()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedCustomer {
    pub id: String,
    pub email: Option<String>,
}

impl From<&Customer> for CreatedCustomer {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id.clone(),
            email: c.email.clone(),
        }
    }
}

// Payments

#[derive(Debug, Serialize)]
pub struct PaymentSummary {
    pub id: String,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
}

impl From<&Payment> for PaymentSummary {
    fn from(p: &Payment) -> Self {
        Self {
            id: p.id.clone(),
            amount: p.amount,
            currency: p.currency.clone(),
            status: p.status.clone(),
            description: p.description.clone(),
            created_at: p.created_at.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentDetail {
    pub id: String,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub charge_date: Option<String>,
    pub metadata: Metadata,
    pub links: PaymentDetailLinks,
}

#[derive(Debug, Serialize)]
pub struct PaymentDetailLinks {
    pub mandate: Option<String>,
    pub subscription: Option<String>,
}

impl From<&Payment> for PaymentDetail {
    fn from(p: &Payment) -> Self {
        Self {
            id: p.id.clone(),
            amount: p.amount,
            currency: p.currency.clone(),
            status: p.status.clone(),
            description: p.description.clone(),
            created_at: p.created_at.clone(),
            charge_date: p.charge_date.clone(),
            metadata: metadata(p.metadata.as_ref()),
            links: PaymentDetailLinks {
                mandate: p.links.mandate.clone(),
                subscription: p.links.subscription.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedPayment {
    pub id: String,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub status: Option<String>,
}

impl From<&Payment> for CreatedPayment {
    fn from(p: &Payment) -> Self {
        Self {
            id: p.id.clone(),
            amount: p.amount,
            currency: p.currency.clone(),
            status: p.status.clone(),
        }
    }
}

// Mandates

#[derive(Debug, Serialize)]
pub struct MandateSummary {
    pub id: String,
    pub status: Option<String>,
    pub scheme: Option<String>,
    pub created_at: Option<String>,
}

impl From<&Mandate> for MandateSummary {
    fn from(m: &Mandate) -> Self {
        Self {
            id: m.id.clone(),
            status: m.status.clone(),
            scheme: m.scheme.clone(),
            created_at: m.created_at.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MandateDetail {
    pub id: String,
    pub status: Option<String>,
    pub scheme: Option<String>,
    pub created_at: Option<String>,
    pub reference: Option<String>,
    pub metadata: Metadata,
    pub links: MandateDetailLinks,
}

#[derive(Debug, Serialize)]
pub struct MandateDetailLinks {
    pub customer: Option<String>,
}

impl From<&Mandate> for MandateDetail {
    fn from(m: &Mandate) -> Self {
        Self {
            id: m.id.clone(),
            status: m.status.clone(),
            scheme: m.scheme.clone(),
            created_at: m.created_at.clone(),
            reference: m.reference.clone(),
            metadata: metadata(m.metadata.as_ref()),
            links: MandateDetailLinks {
                customer: m.links.customer.clone(),
            },
        }
    }
}

// Subscriptions

#[derive(Debug, Serialize)]
pub struct SubscriptionSummary {
    pub id: String,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

impl From<&Subscription> for SubscriptionSummary {
    fn from(s: &Subscription) -> Self {
        Self {
            id: s.id.clone(),
            amount: s.amount,
            currency: s.currency.clone(),
            status: s.status.clone(),
            created_at: s.created_at.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubscriptionDetail {
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
    pub metadata: Metadata,
    pub links: SubscriptionDetailLinks,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionDetailLinks {
    pub mandate: Option<String>,
}

impl From<&Subscription> for SubscriptionDetail {
    fn from(s: &Subscription) -> Self {
        Self {
            id: s.id.clone(),
            amount: s.amount,
            currency: s.currency.clone(),
            status: s.status.clone(),
            interval_unit: s.interval_unit.clone(),
            interval: s.interval,
            created_at: s.created_at.clone(),
            name: s.name.clone(),
            start_date: s.start_date.clone(),
            end_date: s.end_date.clone(),
            metadata: metadata(s.metadata.as_ref()),
            links: SubscriptionDetailLinks {
                mandate: s.links.mandate.clone(),
            },
        }
    }
}

// Subscription details (subscription + mandate + customer)

#[derive(Debug, Serialize)]
pub struct SubscriptionDetails {
    pub subscription: SubscriptionSection,
    pub mandate: MandateSection,
    pub customer: CustomerSection,
}

impl SubscriptionDetails {
    #[must_use]
    pub fn new(subscription: &Subscription, mandate: &Mandate, customer: &Customer) -> Self {
        Self {
            subscription: subscription.into(),
            mandate: mandate.into(),
            customer: customer.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubscriptionSection {
    pub id: String,
    pub name: Option<String>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub interval_unit: Option<String>,
    pub interval: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub created_at: Option<String>,
    pub metadata: Metadata,
}

impl From<&Subscription> for SubscriptionSection {
    fn from(s: &Subscription) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            amount: s.amount,
            currency: s.currency.clone(),
            status: s.status.clone(),
            interval_unit: s.interval_unit.clone(),
            interval: s.interval,
            start_date: s.start_date.clone(),
            end_date: s.end_date.clone(),
            created_at: s.created_at.clone(),
            metadata: metadata(s.metadata.as_ref()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MandateSection {
    pub id: String,
    pub reference: Option<String>,
    pub status: Option<String>,
    pub scheme: Option<String>,
    pub created_at: Option<String>,
    pub metadata: Metadata,
}

impl From<&Mandate> for MandateSection {
    fn from(m: &Mandate) -> Self {
        Self {
            id: m.id.clone(),
            reference: m.reference.clone(),
            status: m.status.clone(),
            scheme: m.scheme.clone(),
            created_at: m.created_at.clone(),
            metadata: metadata(m.metadata.as_ref()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerSection {
    pub id: String,
    pub email: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub company_name: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    pub created_at: Option<String>,
    pub metadata: Metadata,
}

impl From<&Customer> for CustomerSection {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id.clone(),
            email: c.email.clone(),
            given_name: c.given_name.clone(),
            family_name: c.family_name.clone(),
            company_name: c.company_name.clone(),
            address_line1: c.address_line1.clone(),
            address_line2: c.address_line2.clone(),
            city: c.city.clone(),
            postal_code: c.postal_code.clone(),
            country_code: c.country_code.clone(),
            created_at: c.created_at.clone(),
            metadata: metadata(c.metadata.as_ref()),
        }
    }
}

// Payouts

#[derive(Debug, Serialize)]
pub struct PayoutSummary {
    pub id: String,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

impl From<&Payout> for PayoutSummary {
    fn from(p: &Payout) -> Self {
        Self {
            id: p.id.clone(),
            amount: p.amount,
            currency: p.currency.clone(),
            status: p.status.clone(),
            created_at: p.created_at.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn keys(v: &impl Serialize) -> Vec<String> {
        // Key positions in the emitted text give the serialized field order.
        let text = serde_json::to_string(v).expect("serializes");
        let obj: Value = serde_json::from_str(&text).expect("json");
        let mut keys: Vec<(usize, String)> = obj
            .as_object()
            .map(|o| {
                o.keys()
                    .map(|k| (text.find(&format!("\"{k}\":")).unwrap_or(usize::MAX), k.clone()))
                    .collect()
            })
            .unwrap_or_default();
        keys.sort();
        keys.into_iter().map(|(_, k)| k).collect()
    }

    fn customer() -> Customer {
        serde_json::from_value(json!({
            "id": "CU1",
            "email": "ada@example.com",
            "given_name": "Ada",
            "family_name": "Lovelace",
            "company_name": null,
            "created_at": "2024-01-02T03:04:05.000Z",
            "city": "London",
            "metadata": {"xero": "{\"contact\":\"c-1\"}"}
        }))
        .expect("customer")
    }

    #[test]
    fn customer_detail_keeps_field_order_and_metadata() {
        let detail = CustomerDetail::from(&customer());
        assert_eq!(
            keys(&detail),
            vec![
                "id",
                "email",
                "given_name",
                "family_name",
                "company_name",
                "created_at",
                "address_line1",
                "address_line2",
                "city",
                "postal_code",
                "country_code",
                "metadata"
            ]
        );
        let v = serde_json::to_value(&detail).expect("json");
        assert_eq!(v["metadata"]["xero"], "{\"contact\":\"c-1\"}");
        assert_eq!(v["company_name"], Value::Null);
        assert_eq!(v["postal_code"], Value::Null);
    }

    #[test]
    fn customer_section_moves_created_at_after_the_address() {
        let section = CustomerSection::from(&customer());
        let k = keys(&section);
        assert_eq!(k[k.len() - 2], "created_at");
        assert_eq!(k[k.len() - 1], "metadata");
    }

    #[test]
    fn missing_metadata_and_links_render_as_empty_and_null() {
        let payment: Payment = serde_json::from_value(json!({"id": "PM1"})).expect("payment");
        let v = serde_json::to_value(PaymentDetail::from(&payment)).expect("json");
        assert_eq!(v["metadata"], json!({}));
        assert_eq!(v["links"], json!({"mandate": null, "subscription": null}));
    }

    #[test]
    fn subscription_details_nest_the_three_records() {
        let subscription: Subscription = serde_json::from_value(json!({
            "id": "SB1", "name": "Gym", "amount": 2500, "currency": "GBP",
            "interval_unit": "monthly", "interval": 1, "links": {"mandate": "MD1"}
        }))
        .expect("subscription");
        let mandate: Mandate = serde_json::from_value(json!({
            "id": "MD1", "reference": "REF-1", "scheme": "bacs", "links": {"customer": "CU1"}
        }))
        .expect("mandate");

        let details = SubscriptionDetails::new(&subscription, &mandate, &customer());
        assert_eq!(keys(&details), vec!["subscription", "mandate", "customer"]);

        let v = serde_json::to_value(&details).expect("json");
        assert_eq!(v["subscription"]["interval"], 1);
        assert!(v["subscription"].get("links").is_none());
        assert_eq!(v["mandate"]["reference"], "REF-1");
        assert!(v["mandate"].get("links").is_none());
        assert_eq!(v["customer"]["email"], "ada@example.com");
    }
}
