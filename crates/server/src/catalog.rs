//! Static tool catalog.
//!
//! Each tool maps onto a single GoCardless endpoint (except `get_subscription_details`, which
//! chains three reads). The HTTP method of that endpoint drives the MCP tool annotations.

use gocardless_api::Method;
use rmcp::model::{JsonObject, Tool, ToolAnnotations};
use serde_json::{Map, Value, json};
use std::str::FromStr;
use std::sync::Arc;

/// Default page size for list tools.
pub const DEFAULT_LIMIT: i64 = 50;

const PAYMENT_STATUSES: &str = "pending_customer_approval, pending_submission, submitted, \
                                confirmed, paid_out, cancelled, customer_approval_denied, \
                                failed, charged_back";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    ListCustomers,
    GetCustomer,
    CreateCustomer,
    ListPayments,
    GetPayment,
    CreatePayment,
    ListMandates,
    GetMandate,
    ListSubscriptions,
    GetSubscription,
    GetSubscriptionDetails,
    ListPayouts,
}

impl ToolName {
    /// Catalog order.
    pub const ALL: [Self; 12] = [
        Self::ListCustomers,
        Self::GetCustomer,
        Self::CreateCustomer,
        Self::ListPayments,
        Self::GetPayment,
        Self::CreatePayment,
        Self::ListMandates,
        Self::GetMandate,
        Self::ListSubscriptions,
        Self::GetSubscription,
        Self::GetSubscriptionDetails,
        Self::ListPayouts,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListCustomers => "list_customers",
            Self::GetCustomer => "get_customer",
            Self::CreateCustomer => "create_customer",
            Self::ListPayments => "list_payments",
            Self::GetPayment => "get_payment",
            Self::CreatePayment => "create_payment",
            Self::ListMandates => "list_mandates",
            Self::GetMandate => "get_mandate",
            Self::ListSubscriptions => "list_subscriptions",
            Self::GetSubscription => "get_subscription",
            Self::GetSubscriptionDetails => "get_subscription_details",
            Self::ListPayouts => "list_payouts",
        }
    }

    /// HTTP method of the underlying GoCardless endpoint(s).
    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::CreateCustomer | Self::CreatePayment => Method::POST,
            _ => Method::GET,
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::ListCustomers => "List all customers from GoCardless",
            Self::GetCustomer => "Get a specific customer by ID",
            Self::CreateCustomer => "Create a new customer in GoCardless",
            Self::ListPayments => "List payments from GoCardless",
            Self::GetPayment => "Get a specific payment by ID",
            Self::CreatePayment => "Create a new payment in GoCardless",
            Self::ListMandates => "List mandates from GoCardless",
            Self::GetMandate => "Get a specific mandate by ID",
            Self::ListSubscriptions => "List subscriptions from GoCardless",
            Self::GetSubscription => {
                "Get subscription by ID. Returns links.mandate - use get_mandate then get_customer \
                 for full details, or use get_subscription_details instead."
            }
            Self::GetSubscriptionDetails => {
                "Get complete subscription info including mandate and customer in one call"
            }
            Self::ListPayouts => "List payouts from GoCardless",
        }
    }

    fn input_schema(self) -> Value {
        match self {
            Self::ListCustomers => object_schema(&[("limit", limit_prop("customers"))], &[]),
            Self::GetCustomer => object_schema(
                &[(
                    "customer_id",
                    string_prop("The GoCardless customer ID (e.g., CU123)"),
                )],
                &["customer_id"],
            ),
            Self::CreateCustomer => object_schema(
                &[
                    ("email", string_prop("Customer email address")),
                    ("given_name", string_prop("Customer first name")),
                    ("family_name", string_prop("Customer last name")),
                    (
                        "company_name",
                        string_prop("Customer company name (optional)"),
                    ),
                ],
                &["email"],
            ),
            Self::ListPayments => object_schema(
                &[
                    ("limit", limit_prop("payments")),
                    (
                        "status",
                        string_prop(&format!("Filter by payment status ({PAYMENT_STATUSES})")),
                    ),
                    (
                        "subscription",
                        string_prop("Filter by subscription ID (e.g., SB123)"),
                    ),
                    ("mandate", string_prop("Filter by mandate ID (e.g., MD123)")),
                ],
                &[],
            ),
            Self::GetPayment => object_schema(
                &[(
                    "payment_id",
                    string_prop("The GoCardless payment ID (e.g., PM123)"),
                )],
                &["payment_id"],
            ),
            Self::CreatePayment => object_schema(
                &[
                    (
                        "amount",
                        integer_prop("Amount in minor currency unit (e.g., 1000 for £10.00)"),
                    ),
                    (
                        "currency",
                        string_prop("ISO 4217 currency code (e.g., GBP, EUR)"),
                    ),
                    (
                        "mandate_id",
                        string_prop("ID of the mandate to use for this payment"),
                    ),
                    ("description", string_prop("Payment description")),
                ],
                &["amount", "currency", "mandate_id"],
            ),
            Self::ListMandates => object_schema(
                &[
                    ("limit", limit_prop("mandates")),
                    ("customer", string_prop("Filter by customer ID")),
                ],
                &[],
            ),
            Self::GetMandate => object_schema(
                &[(
                    "mandate_id",
                    string_prop("The GoCardless mandate ID (e.g., MD123)"),
                )],
                &["mandate_id"],
            ),
            Self::ListSubscriptions => object_schema(
                &[
                    ("limit", limit_prop("subscriptions")),
                    ("status", string_prop("Filter by subscription status")),
                ],
                &[],
            ),
            Self::GetSubscription | Self::GetSubscriptionDetails => object_schema(
                &[(
                    "subscription_id",
                    string_prop("The GoCardless subscription ID (e.g., SB123)"),
                )],
                &["subscription_id"],
            ),
            Self::ListPayouts => object_schema(&[("limit", limit_prop("payouts"))], &[]),
        }
    }

    /// The MCP tool definition advertised in `tools/list`.
    #[must_use]
    pub fn tool(self) -> Tool {
        let schema: JsonObject = match self.input_schema() {
            Value::Object(obj) => obj,
            _ => JsonObject::new(),
        };
        let mut tool = Tool::new(self.as_str(), self.description(), Arc::new(schema));
        tool.annotations = Some(annotations_for_method(&self.method()));
        tool
    }
}

impl FromStr for ToolName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// The full catalog, in a stable order.
#[must_use]
pub fn tools() -> Vec<Tool> {
    ToolName::ALL.into_iter().map(ToolName::tool).collect()
}

/// Reads are safe to retry and never change provider state; creates do change it (a retried
/// create makes a second record) but never destroy anything. Everything talks to an external
/// system.
fn annotations_for_method(method: &Method) -> ToolAnnotations {
    let read_only = method == Method::GET;
    ToolAnnotations {
        title: None,
        read_only_hint: Some(read_only),
        destructive_hint: Some(false),
        idempotent_hint: Some(read_only),
        open_world_hint: Some(true),
    }
}

fn object_schema(properties: &[(&str, Value)], required: &[&str]) -> Value {
    let props: Map<String, Value> = properties
        .iter()
        .map(|(name, schema)| ((*name).to_string(), schema.clone()))
        .collect();

    let mut schema = json!({
        "type": "object",
        "properties": props,
    });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}

fn string_prop(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn integer_prop(description: &str) -> Value {
    json!({ "type": "integer", "description": description })
}

fn limit_prop(resource: &str) -> Value {
    integer_prop(&format!(
        "Number of {resource} to retrieve (default: {DEFAULT_LIMIT})"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn schema_of(name: &str) -> Value {
        let tool = tools()
            .into_iter()
            .find(|t| t.name == name)
            .expect("tool exists");
        Value::Object(tool.input_schema.as_ref().clone())
    }

    fn required_of(name: &str) -> Vec<String> {
        schema_of(name)
            .get("required")
            .and_then(Value::as_array)
            .map(|r| {
                r.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn catalog_has_twelve_uniquely_named_tools() {
        let tools = tools();
        assert_eq!(tools.len(), 12);
        let names: HashSet<String> = tools.iter().map(|t| t.name.to_string()).collect();
        assert_eq!(names.len(), 12);
    }

    #[test]
    fn every_catalog_name_round_trips_through_from_str() {
        for tool in tools() {
            let parsed: ToolName = tool.name.parse().expect("known tool");
            assert_eq!(parsed.as_str(), tool.name);
        }
        assert!("delete_customer".parse::<ToolName>().is_err());
    }

    #[test]
    fn required_arguments_match_the_provider_calls() {
        assert!(required_of("list_customers").is_empty());
        assert_eq!(required_of("get_customer"), vec!["customer_id"]);
        assert_eq!(required_of("create_customer"), vec!["email"]);
        assert_eq!(
            required_of("create_payment"),
            vec!["amount", "currency", "mandate_id"]
        );
        assert_eq!(
            required_of("get_subscription_details"),
            vec!["subscription_id"]
        );
    }

    #[test]
    fn limit_is_an_integer_documenting_its_default() {
        let schema = schema_of("list_payouts");
        let limit = &schema["properties"]["limit"];
        assert_eq!(limit["type"], "integer");
        assert_eq!(
            limit["description"],
            "Number of payouts to retrieve (default: 50)"
        );
    }

    #[test]
    fn payment_status_filter_lists_the_statuses() {
        let schema = schema_of("list_payments");
        let description = schema["properties"]["status"]["description"]
            .as_str()
            .unwrap_or_default();
        assert!(description.starts_with("Filter by payment status (pending_customer_approval,"));
        assert!(description.ends_with("failed, charged_back)"));
    }

    #[test]
    fn reads_are_read_only_and_creates_are_not() {
        for tool in tools() {
            let annotations = tool.annotations.clone().expect("annotations");
            let is_create = tool.name.starts_with("create_");
            assert_eq!(annotations.read_only_hint, Some(!is_create), "{}", tool.name);
            assert_eq!(annotations.idempotent_hint, Some(!is_create), "{}", tool.name);
            assert_eq!(annotations.destructive_hint, Some(false));
            assert_eq!(annotations.open_world_hint, Some(true));
        }
    }
}
