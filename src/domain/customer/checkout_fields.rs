//! Buyer details posted with the checkout form.

use serde::{Deserialize, Serialize};

/// Checkout form fields as the shop posts them.
///
/// Field names follow the shop's billing/shipping form. Every field is
/// optional on the wire; blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutFields {
    /// Raw personal identity / organisation number.
    pub org_no: Option<String>,

    pub billing_company: Option<String>,
    pub billing_first_name: Option<String>,
    pub billing_last_name: Option<String>,
    pub billing_address_1: Option<String>,
    pub billing_postcode: Option<String>,
    pub billing_city: Option<String>,
    pub billing_country: Option<String>,
    pub billing_email: Option<String>,
    pub billing_phone: Option<String>,

    pub ship_to_different_address: bool,
    pub shipping_company: Option<String>,
    pub shipping_first_name: Option<String>,
    pub shipping_last_name: Option<String>,
    pub shipping_address_1: Option<String>,
    pub shipping_postcode: Option<String>,
    pub shipping_city: Option<String>,
    pub shipping_country: Option<String>,
}

impl CheckoutFields {
    /// Billing company, when one was entered.
    pub fn billing_company(&self) -> Option<&str> {
        non_blank(&self.billing_company)
    }

    /// Shipping company, when one was entered.
    pub fn shipping_company(&self) -> Option<&str> {
        non_blank(&self.shipping_company)
    }

    /// Name to bill: the company when present, otherwise "first last".
    pub fn billing_name(&self) -> String {
        match self.billing_company() {
            Some(company) => company.to_string(),
            None => full_name(&self.billing_first_name, &self.billing_last_name),
        }
    }

    /// Name on the delivery address.
    pub fn shipping_name(&self) -> String {
        match self.shipping_company() {
            Some(company) => company.to_string(),
            None => full_name(&self.shipping_first_name, &self.shipping_last_name),
        }
    }
}

/// Returns the trimmed value, or `None` for missing and blank fields.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Returns the field value or an empty string.
pub(crate) fn text(value: &Option<String>) -> String {
    non_blank(value).unwrap_or_default().to_string()
}

fn full_name(first: &Option<String>, last: &Option<String>) -> String {
    format!("{} {}", text(first), text(last)).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billing_name_prefers_company() {
        let fields = CheckoutFields {
            billing_company: Some("Acme AB".to_string()),
            billing_first_name: Some("Anna".to_string()),
            billing_last_name: Some("Svensson".to_string()),
            ..Default::default()
        };
        assert_eq!(fields.billing_name(), "Acme AB");
    }

    #[test]
    fn blank_company_falls_back_to_person() {
        let fields = CheckoutFields {
            billing_company: Some("   ".to_string()),
            billing_first_name: Some("Anna".to_string()),
            billing_last_name: Some("Svensson".to_string()),
            ..Default::default()
        };
        assert!(fields.billing_company().is_none());
        assert_eq!(fields.billing_name(), "Anna Svensson");
    }

    #[test]
    fn shipping_name_uses_shipping_fields() {
        let fields = CheckoutFields {
            shipping_first_name: Some("Erik".to_string()),
            shipping_last_name: Some("Lund".to_string()),
            ..Default::default()
        };
        assert_eq!(fields.shipping_name(), "Erik Lund");
    }

    #[test]
    fn deserializes_partial_form() {
        let fields: CheckoutFields = serde_json::from_str(
            r#"{"org_no":"800101-1234","billing_country":"SE","ship_to_different_address":true}"#,
        )
        .unwrap();
        assert_eq!(fields.org_no.as_deref(), Some("800101-1234"));
        assert!(fields.ship_to_different_address);
        assert!(fields.billing_email.is_none());
    }
}
