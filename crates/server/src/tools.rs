//! Tool execution: argument parsing, provider calls, reshaping and text formatting.

use crate::args::Arguments;
use crate::catalog::ToolName;
use crate::config::ProviderSettings;
use crate::error::{Result, ToolError};
use crate::views::{
    CreatedCustomer, CreatedPayment, CustomerDetail, CustomerSummary, MandateDetail,
    MandateSummary, PaymentDetail, PaymentSummary, PayoutSummary, SubscriptionDetail,
    SubscriptionDetails, SubscriptionSummary,
};
use gocardless_api::GoCardlessClient;
use gocardless_api::models::{
    ListCustomersParams, ListMandatesParams, ListPaymentsParams, ListPayoutsParams,
    ListSubscriptionsParams, NewCustomer, NewPayment, NewPaymentLinks,
};
use rmcp::model::{CallToolResult, Content, JsonObject};
use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};

/// Executes tool calls against GoCardless.
#[derive(Debug, Clone)]
pub struct ToolGateway {
    settings: ProviderSettings,
}

impl ToolGateway {
    #[must_use]
    pub fn new(settings: ProviderSettings) -> Self {
        Self { settings }
    }

    /// Run a tool and render the outcome as a single text block.
    ///
    /// Failures never surface as protocol errors: they come back as
    /// `Error executing <name>: <reason>` with `isError` set.
    pub async fn call(&self, name: &str, arguments: &JsonObject) -> CallToolResult {
        let started = Instant::now();
        match self.execute(name, arguments).await {
            Ok(text) => {
                info!(
                    tool = %name,
                    elapsed_ms = started.elapsed().as_millis(),
                    "tool call succeeded"
                );
                CallToolResult::success(vec![Content::text(text)])
            }
            Err(e) => {
                let api = match &e {
                    ToolError::Api(api) => Some(api),
                    _ => None,
                };
                warn!(
                    tool = %name,
                    elapsed_ms = started.elapsed().as_millis(),
                    status = api.and_then(|a| a.status()),
                    request_id = api.and_then(|a| a.request_id()),
                    error = %e,
                    "tool call failed"
                );
                CallToolResult::error(vec![Content::text(format!(
                    "Error executing {name}: {e}"
                ))])
            }
        }
    }

    /// Run a tool and return its text output.
    ///
    /// # Errors
    ///
    /// Returns an error if no access token is configured, the tool is unknown, an argument is
    /// missing or mistyped, or a GoCardless call fails.
    pub async fn execute(&self, name: &str, arguments: &JsonObject) -> Result<String> {
        // A fresh client per call; nothing is reused across invocations.
        let client = GoCardlessClient::new(&self.settings.client_config()?)?;
        let tool: ToolName = name
            .parse()
            .map_err(|_| ToolError::UnknownTool(name.to_string()))?;
        let args = Arguments::new(arguments);

        match tool {
            ToolName::ListCustomers => list_customers(&client, &args).await,
            ToolName::GetCustomer => get_customer(&client, &args).await,
            ToolName::CreateCustomer => create_customer(&client, &args).await,
            ToolName::ListPayments => list_payments(&client, &args).await,
            ToolName::GetPayment => get_payment(&client, &args).await,
            ToolName::CreatePayment => create_payment(&client, &args).await,
            ToolName::ListMandates => list_mandates(&client, &args).await,
            ToolName::GetMandate => get_mandate(&client, &args).await,
            ToolName::ListSubscriptions => list_subscriptions(&client, &args).await,
            ToolName::GetSubscription => get_subscription(&client, &args).await,
            ToolName::GetSubscriptionDetails => get_subscription_details(&client, &args).await,
            ToolName::ListPayouts => list_payouts(&client, &args).await,
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn found<T: Serialize>(resource: &str, items: &[T]) -> Result<String> {
    Ok(format!("Found {} {resource}:\n{}", items.len(), to_json(items)?))
}

async fn list_customers(client: &GoCardlessClient, args: &Arguments<'_>) -> Result<String> {
    let params = ListCustomersParams {
        limit: Some(args.limit()?),
    };
    let customers = client.customers().list(&params).await?;
    let view: Vec<CustomerSummary> = customers.iter().map(Into::into).collect();
    found("customers", &view)
}

async fn get_customer(client: &GoCardlessClient, args: &Arguments<'_>) -> Result<String> {
    let id = args.required_str("customer_id")?;
    let customer = client.customers().get(&id).await?;
    to_json(&CustomerDetail::from(&customer))
}

async fn create_customer(client: &GoCardlessClient, args: &Arguments<'_>) -> Result<String> {
    let new_customer = NewCustomer {
        email: args.required_str("email")?,
        given_name: args.optional_str("given_name")?,
        family_name: args.optional_str("family_name")?,
        company_name: args.optional_str("company_name")?,
    };
    let customer = client.customers().create(&new_customer).await?;
    Ok(format!(
        "Customer created successfully:\n{}",
        to_json(&CreatedCustomer::from(&customer))?
    ))
}

async fn list_payments(client: &GoCardlessClient, args: &Arguments<'_>) -> Result<String> {
    let params = ListPaymentsParams {
        limit: Some(args.limit()?),
        status: args.optional_str("status")?,
        subscription: args.optional_str("subscription")?,
        mandate: args.optional_str("mandate")?,
    };
    let payments = client.payments().list(&params).await?;
    let view: Vec<PaymentSummary> = payments.iter().map(Into::into).collect();
    found("payments", &view)
}

async fn get_payment(client: &GoCardlessClient, args: &Arguments<'_>) -> Result<String> {
    let id = args.required_str("payment_id")?;
    let payment = client.payments().get(&id).await?;
    to_json(&PaymentDetail::from(&payment))
}

async fn create_payment(client: &GoCardlessClient, args: &Arguments<'_>) -> Result<String> {
    let new_payment = NewPayment {
        amount: args.required_i64("amount")?,
        currency: args.required_str("currency")?,
        description: args.optional_str("description")?,
        links: NewPaymentLinks {
            mandate: args.required_str("mandate_id")?,
        },
    };
    let payment = client.payments().create(&new_payment).await?;
    Ok(format!(
        "Payment created successfully:\n{}",
        to_json(&CreatedPayment::from(&payment))?
    ))
}

async fn list_mandates(client: &GoCardlessClient, args: &Arguments<'_>) -> Result<String> {
    let params = ListMandatesParams {
        limit: Some(args.limit()?),
        customer: args.optional_str("customer")?,
    };
    let mandates = client.mandates().list(&params).await?;
    let view: Vec<MandateSummary> = mandates.iter().map(Into::into).collect();
    found("mandates", &view)
}

async fn get_mandate(client: &GoCardlessClient, args: &Arguments<'_>) -> Result<String> {
    let id = args.required_str("mandate_id")?;
    let mandate = client.mandates().get(&id).await?;
    to_json(&MandateDetail::from(&mandate))
}

async fn list_subscriptions(client: &GoCardlessClient, args: &Arguments<'_>) -> Result<String> {
    let params = ListSubscriptionsParams {
        limit: Some(args.limit()?),
        status: args.optional_str("status")?,
    };
    let subscriptions = client.subscriptions().list(&params).await?;
    let view: Vec<SubscriptionSummary> = subscriptions.iter().map(Into::into).collect();
    found("subscriptions", &view)
}

async fn get_subscription(client: &GoCardlessClient, args: &Arguments<'_>) -> Result<String> {
    let id = args.required_str("subscription_id")?;
    let subscription = client.subscriptions().get(&id).await?;
    to_json(&SubscriptionDetail::from(&subscription))
}

/// subscription → mandate → customer, strictly in sequence.
async fn get_subscription_details(
    client: &GoCardlessClient,
    args: &Arguments<'_>,
) -> Result<String> {
    let id = args.required_str("subscription_id")?;
    let subscription = client.subscriptions().get(&id).await?;

    let mandate_id = subscription
        .links
        .mandate
        .as_deref()
        .ok_or_else(|| ToolError::MissingMandateLink(subscription.id.clone()))?;
    let mandate = client.mandates().get(mandate_id).await?;

    let customer_id = mandate
        .links
        .customer
        .as_deref()
        .ok_or_else(|| ToolError::MissingCustomerLink(mandate.id.clone()))?;
    let customer = client.customers().get(customer_id).await?;

    to_json(&SubscriptionDetails::new(&subscription, &mandate, &customer))
}

async fn list_payouts(client: &GoCardlessClient, args: &Arguments<'_>) -> Result<String> {
    let params = ListPayoutsParams {
        limit: Some(args.limit()?),
    };
    let payouts = client.payouts().list(&params).await?;
    let view: Vec<PayoutSummary> = payouts.iter().map(Into::into).collect();
    found("payouts", &view)
}
