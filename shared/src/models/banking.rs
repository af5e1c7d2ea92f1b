use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::dto::{Endpoint, FkRef};
use crate::form::{EntityForm, FieldKind, FieldSpec};
use crate::resource::{Lookup, Resource};
use crate::validation::{FormValidation, PatternKind, Rule, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    #[serde(rename = "numeroCuenta")]
    pub number: String,
    #[serde(rename = "titular")]
    pub holder: String,
    #[serde(rename = "saldo")]
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRequest {
    #[serde(rename = "numeroCuenta")]
    pub number: String,
    #[serde(rename = "titular")]
    pub holder: String,
    #[serde(rename = "saldo")]
    pub balance: f64,
}

/// Money moved between two accounts. Transfers are immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: i64,
    #[serde(rename = "cuentaOrigen", default)]
    pub origin: Option<FkRef>,
    #[serde(rename = "cuentaDestino", default)]
    pub target: Option<FkRef>,
    #[serde(rename = "monto")]
    pub amount: f64,
    #[serde(rename = "concepto", default)]
    pub concept: String,
    /// Server-assigned timestamp, shown verbatim
    #[serde(rename = "fecha", default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    #[serde(rename = "cuentaOrigen")]
    pub origin: FkRef,
    #[serde(rename = "cuentaDestino")]
    pub target: FkRef,
    #[serde(rename = "monto")]
    pub amount: f64,
    #[serde(rename = "concepto")]
    pub concept: String,
}

/// Format an amount with two decimals and the configured currency symbol
pub fn format_amount(amount: f64, currency_symbol: &str) -> String {
    if amount < 0.0 {
        format!("-{}{:.2}", currency_symbol, amount.abs())
    } else {
        format!("{}{:.2}", currency_symbol, amount)
    }
}

const ACCOUNT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "number",
        "Account number",
        FieldKind::Text,
        &[Rule::Required, Rule::Pattern(PatternKind::AccountNumber)],
    ),
    FieldSpec::new(
        "holder",
        "Holder",
        FieldKind::Text,
        &[Rule::Required, Rule::MinLength(3), Rule::MaxLength(100)],
    ),
    FieldSpec::new(
        "balance",
        "Balance",
        FieldKind::Number,
        &[Rule::Required, Rule::Min(0.0)],
    ),
];

const TRANSFER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "origin",
        "From account",
        FieldKind::Select(Lookup::Accounts),
        &[Rule::Required],
    ),
    FieldSpec::new(
        "target",
        "To account",
        FieldKind::Select(Lookup::Accounts),
        &[Rule::Required],
    ),
    FieldSpec::new(
        "amount",
        "Amount",
        FieldKind::Number,
        &[Rule::Required, Rule::Range { min: 0.01, max: 1_000_000.0 }],
    ),
    FieldSpec::new(
        "concept",
        "Concept",
        FieldKind::Text,
        &[Rule::Required, Rule::MinLength(3), Rule::MaxLength(140)],
    ),
];

impl Resource for Account {
    type Request = AccountRequest;

    const ENDPOINT: Endpoint = Endpoint::new("Cuentas");
    const TITLE: &'static str = "Accounts";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        format!("{} · {}", self.number, self.holder)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.number.as_str(), self.holder.as_str()]
    }

    fn sort_key(&self) -> String {
        self.holder.clone()
    }

    fn form_specs() -> &'static [FieldSpec] {
        ACCOUNT_FIELDS
    }

    fn to_form(&self) -> EntityForm {
        EntityForm::for_record(self.id)
            .with("number", &self.number)
            .with("holder", &self.holder)
            .with("balance", self.balance)
    }

    fn to_request(form: &EntityForm) -> Result<AccountRequest> {
        Ok(AccountRequest {
            number: form.text("number"),
            holder: form.text("holder"),
            balance: form.parse_f64("balance")?,
        })
    }
}

impl Resource for Transfer {
    type Request = TransferRequest;

    const ENDPOINT: Endpoint = Endpoint::new("Transferencias");
    const TITLE: &'static str = "Transfers";
    const MUTABLE: bool = false;

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        format!(
            "{} → {}",
            FkRef::display(&self.origin),
            FkRef::display(&self.target)
        )
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.concept.as_str()];
        fields.extend(self.origin.as_ref().and_then(|a| a.name.as_deref()));
        fields.extend(self.target.as_ref().and_then(|a| a.name.as_deref()));
        fields
    }

    fn parent_id(&self) -> Option<i64> {
        FkRef::id_of(&self.origin)
    }

    fn parent_lookup() -> Option<Lookup> {
        Some(Lookup::Accounts)
    }

    fn sort_key(&self) -> String {
        self.date.clone().unwrap_or_default()
    }

    fn form_specs() -> &'static [FieldSpec] {
        TRANSFER_FIELDS
    }

    fn to_form(&self) -> EntityForm {
        EntityForm::for_record(self.id)
            .with_opt("origin", FkRef::id_of(&self.origin))
            .with_opt("target", FkRef::id_of(&self.target))
            .with("amount", self.amount)
            .with("concept", &self.concept)
    }

    fn to_request(form: &EntityForm) -> Result<TransferRequest> {
        Ok(TransferRequest {
            origin: FkRef::new(form.parse_i64("origin")?),
            target: FkRef::new(form.parse_i64("target")?),
            amount: form.parse_f64("amount")?,
            concept: form.text("concept"),
        })
    }

    fn cross_validate(form: &EntityForm, validation: &mut FormValidation) {
        if let (Ok(origin), Ok(target)) = (form.parse_i64("origin"), form.parse_i64("target")) {
            if origin == target {
                validation.push(
                    "target",
                    ValidationError::Custom(
                        "Choose an account different from the origin".to_string(),
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer_form() -> EntityForm {
        EntityForm::default()
            .with("origin", "1")
            .with("target", "2")
            .with("amount", "1500.50")
            .with("concept", "Rent March")
    }

    #[test]
    fn test_transfer_to_same_account_is_invalid() {
        assert!(Transfer::validate(&transfer_form()).is_valid());

        let same = transfer_form().with("target", "1");
        let validation = Transfer::validate(&same);
        assert!(validation.has_error("target"));
        assert!(!validation.has_error("origin"));

        let padded = transfer_form().with("target", " 01");
        assert!(Transfer::validate(&padded).has_error("target"));
    }

    #[test]
    fn test_transfer_amount_range() {
        let zero = transfer_form().with("amount", "0");
        assert!(Transfer::validate(&zero).has_error("amount"));
        let huge = transfer_form().with("amount", "2000000");
        assert!(Transfer::validate(&huge).has_error("amount"));
    }

    #[test]
    fn test_transfer_request_shape() {
        let json = serde_json::to_value(Transfer::to_request(&transfer_form()).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "cuentaOrigen": { "id": 1 },
                "cuentaDestino": { "id": 2 },
                "monto": 1500.5,
                "concepto": "Rent March"
            })
        );
    }

    #[test]
    fn test_transfers_are_not_mutable() {
        assert!(!Transfer::MUTABLE);
        assert!(Account::MUTABLE);
    }

    #[test]
    fn test_account_number_pattern() {
        let form = EntityForm::default()
            .with("number", "12-34")
            .with("holder", "Ana Pérez")
            .with("balance", "0");
        assert!(Account::validate(&form).has_error("number"));
        assert!(!Account::validate(&form).has_error("balance"));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1500.5, "$"), "$1500.50");
        assert_eq!(format_amount(-3.0, "$"), "-$3.00");
        assert_eq!(format_amount(0.0, "€"), "€0.00");
    }
}
