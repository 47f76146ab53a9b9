//! Gateway configuration
//!
//! The settings a shop administrator controls: what buyers see at checkout,
//! how invoices are built and delivered, and where Billogram calls back.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::CheckoutSettings;
use crate::domain::gateway::GatewayDescriptor;
use crate::domain::invoice::DeliveryMethod;

use super::error::ValidationError;

/// Gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Offer invoice payment at checkout
    #[serde(default)]
    pub enabled: bool,

    /// Title buyers see at checkout
    #[serde(default = "default_title")]
    pub title: String,

    /// Description buyers see at checkout
    #[serde(default = "default_description")]
    pub description: String,

    /// 0 = Email, 1 = Letter, 2 = Email+Letter
    #[serde(default)]
    pub delivery_method: u8,

    /// Days until an invoice is due
    #[serde(default = "default_due_days")]
    pub due_days: u32,

    /// Fee added to the cart when invoice payment is chosen
    #[serde(default)]
    pub invoice_fee: Decimal,

    /// Send invoices right after creation
    #[serde(default = "default_true")]
    pub send_invoice: bool,

    /// Leave stock and cart untouched after checkout
    #[serde(default)]
    pub debug: bool,

    /// Settlement currency (ISO 4217)
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Country code treated as domestic (ISO 3166-1 alpha-2)
    #[serde(default = "default_home_country")]
    pub home_country: String,

    /// Public URL Billogram posts callbacks to
    #[serde(default)]
    pub callback_url: String,

    /// Base URL of the order-received page
    #[serde(default = "default_receipt_url_base")]
    pub receipt_url_base: String,

    /// Answer 401 instead of 200 to callbacks with a bad signature
    #[serde(default)]
    pub reject_invalid_signatures: bool,
}

impl GatewayConfig {
    pub fn delivery_method(&self) -> DeliveryMethod {
        DeliveryMethod::from_setting(self.delivery_method)
    }

    /// Payment method as the checkout sees it
    pub fn descriptor(&self) -> GatewayDescriptor {
        GatewayDescriptor::new(
            self.enabled,
            self.title.clone(),
            self.description.clone(),
            self.currency.clone(),
            self.invoice_fee,
        )
    }

    /// Settings for the checkout handlers
    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            currency: self.currency.clone(),
            due_days: self.due_days,
            callback_url: self.callback_url.clone(),
            send_invoice: self.send_invoice,
            delivery_method: self.delivery_method(),
            debug: self.debug,
            home_country: self.home_country.clone(),
            receipt_url_base: self.receipt_url_base.clone(),
        }
    }

    /// Validate gateway configuration
    pub fn validate(&self, is_production: bool) -> Result<(), ValidationError> {
        if self.callback_url.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__CALLBACK_URL"));
        }
        if !is_http_url(&self.callback_url) {
            return Err(ValidationError::InvalidUrl("callback_url"));
        }
        if is_production && !self.callback_url.starts_with("https://") {
            return Err(ValidationError::CallbackMustBeHttps);
        }
        if self.receipt_url_base.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__RECEIPT_URL_BASE"));
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCurrency(self.currency.clone()));
        }
        if self.home_country.len() != 2
            || !self.home_country.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(ValidationError::InvalidCountry(self.home_country.clone()));
        }
        if self.due_days == 0 {
            return Err(ValidationError::InvalidDueDays);
        }
        if self.invoice_fee < Decimal::ZERO {
            return Err(ValidationError::NegativeInvoiceFee);
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            title: default_title(),
            description: default_description(),
            delivery_method: 0,
            due_days: default_due_days(),
            invoice_fee: Decimal::ZERO,
            send_invoice: true,
            debug: false,
            currency: default_currency(),
            home_country: default_home_country(),
            callback_url: String::new(),
            receipt_url_base: default_receipt_url_base(),
            reject_invalid_signatures: false,
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

fn default_title() -> String {
    "Invoice - 14 days".to_string()
}

fn default_description() -> String {
    "Pay by invoice within 14 days.".to_string()
}

fn default_due_days() -> u32 {
    14
}

fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    "SEK".to_string()
}

fn default_home_country() -> String {
    "SE".to_string()
}

fn default_receipt_url_base() -> String {
    "/checkout/order-received".to_string()
}
