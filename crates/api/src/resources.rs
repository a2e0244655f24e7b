//! Per-resource services, mirroring the shape of the official SDKs
//! (`client.customers().list(..)`, `client.payments().get(..)`, ...).

use crate::client::GoCardlessClient;
use crate::error::Result;
use crate::models::{
    Customer, ListCustomersParams, ListMandatesParams, ListPaymentsParams, ListPayoutsParams,
    ListSubscriptionsParams, Mandate, NewCustomer, NewPayment, Payment, Payout, Subscription,
};

macro_rules! service {
    ($name:ident, $resource:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name<'a> {
            client: &'a GoCardlessClient,
        }

        impl<'a> $name<'a> {
            pub(crate) fn new(client: &'a GoCardlessClient) -> Self {
                Self { client }
            }

            /// Envelope key and path segment of this resource.
            pub const RESOURCE: &'static str = $resource;
        }
    };
}

service!(Customers, "customers");
service!(Payments, "payments");
service!(Mandates, "mandates");
service!(Subscriptions, "subscriptions");
service!(Payouts, "payouts");

impl Customers<'_> {
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or an unexpected payload.
    pub async fn list(&self, params: &ListCustomersParams) -> Result<Vec<Customer>> {
        self.client.list(Self::RESOURCE, params).await
    }

    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or an unexpected payload.
    pub async fn get(&self, id: &str) -> Result<Customer> {
        self.client.get(Self::RESOURCE, id).await
    }

    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or an unexpected payload.
    pub async fn create(&self, customer: &NewCustomer) -> Result<Customer> {
        self.client.create(Self::RESOURCE, customer).await
    }
}

impl Payments<'_> {
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or an unexpected payload.
    pub async fn list(&self, params: &ListPaymentsParams) -> Result<Vec<Payment>> {
        self.client.list(Self::RESOURCE, params).await
    }

    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or an unexpected payload.
    pub async fn get(&self, id: &str) -> Result<Payment> {
        self.client.get(Self::RESOURCE, id).await
    }

    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or an unexpected payload.
    pub async fn create(&self, payment: &NewPayment) -> Result<Payment> {
        self.client.create(Self::RESOURCE, payment).await
    }
}

impl Mandates<'_> {
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or an unexpected payload.
    pub async fn list(&self, params: &ListMandatesParams) -> Result<Vec<Mandate>> {
        self.client.list(Self::RESOURCE, params).await
    }

    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or an unexpected payload.
    pub async fn get(&self, id: &str) -> Result<Mandate> {
        self.client.get(Self::RESOURCE, id).await
    }
}

impl Subscriptions<'_> {
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or an unexpected payload.
    pub async fn list(&self, params: &ListSubscriptionsParams) -> Result<Vec<Subscription>> {
        self.client.list(Self::RESOURCE, params).await
    }

    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or an unexpected payload.
    pub async fn get(&self, id: &str) -> Result<Subscription> {
        self.client.get(Self::RESOURCE, id).await
    }
}

impl Payouts<'_> {
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or an unexpected payload.
    pub async fn list(&self, params: &ListPayoutsParams) -> Result<Vec<Payout>> {
        self.client.list(Self::RESOURCE, params).await
    }
}
