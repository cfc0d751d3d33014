use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::StoreError;
use crate::core::DEFAULT_INVOICE_PREFIX;

/// Company profile printed on invoices, plus the invoice-number prefix.
///
/// Serialized with camelCase keys. Missing keys take the defaults below, so
/// a partial JSON document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanySettings {
    pub company_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub email: String,
    pub phone: String,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub sort_code: String,
    pub invoice_prefix: String,
    /// URL of an uploaded logo image.
    pub logo: Option<String>,
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self {
            company_name: "Pete's Technologies".into(),
            address: "123 Tech Street".into(),
            city: "Lagos".into(),
            state: "Lagos State".into(),
            postal_code: "100001".into(),
            country: "Nigeria".into(),
            email: "info@petestech.com".into(),
            phone: "+234 800 000 0000".into(),
            bank_name: "First Bank of Nigeria".into(),
            account_name: "Pete's Technologies Ltd".into(),
            account_number: "0123456789".into(),
            sort_code: String::new(),
            invoice_prefix: DEFAULT_INVOICE_PREFIX.into(),
            logo: None,
        }
    }
}

impl CompanySettings {
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let settings: Self = serde_json::from_str(json)?;
        debug!(
            company = %settings.company_name,
            prefix = %settings.invoice_prefix,
            "loaded settings"
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Prefix for new invoice numbers; blank falls back to the default.
    pub fn invoice_prefix(&self) -> &str {
        let prefix = self.invoice_prefix.trim();
        if prefix.is_empty() {
            DEFAULT_INVOICE_PREFIX
        } else {
            prefix
        }
    }
}

/// Storage for the single settings record of an account.
pub trait SettingsRepository {
    fn load(&self) -> Result<Option<CompanySettings>, StoreError>;
    fn save(&mut self, settings: &CompanySettings) -> Result<(), StoreError>;

    /// Load the settings, persisting the defaults the first time.
    fn load_or_init(&mut self) -> Result<CompanySettings, StoreError> {
        if let Some(settings) = self.load()? {
            return Ok(settings);
        }
        let settings = CompanySettings::default();
        self.save(&settings)?;
        info!("initialized default company settings");
        Ok(settings)
    }
}

/// Settings held as a serialized JSON document, like a settings row.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    document: Option<String>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing JSON document.
    pub fn from_document(json: impl Into<String>) -> Self {
        Self {
            document: Some(json.into()),
        }
    }
}

impl SettingsRepository for InMemorySettings {
    fn load(&self) -> Result<Option<CompanySettings>, StoreError> {
        self.document
            .as_deref()
            .map(CompanySettings::from_json)
            .transpose()
    }

    fn save(&mut self, settings: &CompanySettings) -> Result<(), StoreError> {
        self.document = Some(settings.to_json()?);
        Ok(())
    }
}
