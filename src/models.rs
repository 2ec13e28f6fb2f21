use crate::error::{BalanzaError, Result};

/// Account nature from the chart of accounts. Determines which side of the
/// ledger the account normally carries its balance on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountNature {
    Asset,
    Liability,
    Equity,
    Income,
    Expense,
    NegativeResult,
}

/// The two balance-sign conventions. Debit-group accounts grow with debits,
/// credit-group accounts grow with credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceGroup {
    Debit,
    Credit,
}

impl AccountNature {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            "equity" => Ok(Self::Equity),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "negative_result" => Ok(Self::NegativeResult),
            other => Err(BalanzaError::UnknownNature(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Income => "income",
            Self::Expense => "expense",
            Self::NegativeResult => "negative_result",
        }
    }

    /// Exhaustive nature-to-group mapping. A new nature variant must be
    /// assigned a side here before the crate compiles again.
    pub fn balance_group(&self) -> BalanceGroup {
        match self {
            Self::Asset | Self::NegativeResult => BalanceGroup::Debit,
            Self::Liability | Self::Equity | Self::Income | Self::Expense => BalanceGroup::Credit,
        }
    }
}

impl BalanceGroup {
    /// Signed balance for accumulated debit/credit sums under this convention.
    pub fn signed_balance(&self, debit: f64, credit: f64) -> f64 {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub nature: AccountNature,
    pub is_active: bool,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub id: i64,
    pub entry_date: String,
    pub memo: Option<String>,
}

/// One posting within a journal entry. Well-formed lines have exactly one
/// non-zero side; the balance engine tolerates anything non-negative.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct EntryLine {
    pub id: i64,
    pub entry_id: i64,
    pub account_id: i64,
    pub debit: f64,
    pub credit: f64,
}

/// Kind of a manual auxiliary-ledger line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuxKind {
    Income,
    Expense,
}

impl AuxKind {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(BalanzaError::Other(format!(
                "unknown aux line kind: {other} (expected income or expense)"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// Category-specific product fields, resolved once when the row is loaded.
/// Each category has one required naming field; there is no fallback chain
/// at display time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductDetails {
    /// Phones, notebooks, consoles. Named by manufacturer model.
    Device { model: String },
    /// Cables, cases, chargers. Named by a free-form title.
    Accessory { title: String },
    /// Repairs, installations. Named by a service description.
    Service { detail: String },
}

impl ProductDetails {
    /// Build the variant for `category` from the nullable columns, requiring
    /// the one field that category needs.
    pub fn resolve(
        sku: &str,
        category: &str,
        model: Option<String>,
        title: Option<String>,
        detail: Option<String>,
    ) -> Result<Self> {
        let missing =
            |field: &str| BalanzaError::Other(format!("product {sku}: {category} requires {field}"));
        match category {
            "device" => Ok(Self::Device {
                model: model.ok_or_else(|| missing("model"))?,
            }),
            "accessory" => Ok(Self::Accessory {
                title: title.ok_or_else(|| missing("title"))?,
            }),
            "service" => Ok(Self::Service {
                detail: detail.ok_or_else(|| missing("detail"))?,
            }),
            other => Err(BalanzaError::Other(format!(
                "product {sku}: unknown category {other}"
            ))),
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            Self::Device { .. } => "device",
            Self::Accessory { .. } => "accessory",
            Self::Service { .. } => "service",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Device { model } => model,
            Self::Accessory { title } => title,
            Self::Service { detail } => detail,
        }
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub details: ProductDetails,
    /// Landed import cost in USD, when the item was imported.
    pub cost_usd: Option<f64>,
    pub price: f64,
    pub stock: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nature_roundtrip() {
        for s in ["asset", "liability", "equity", "income", "expense", "negative_result"] {
            assert_eq!(AccountNature::parse(s).unwrap().as_str(), s);
        }
        assert!(AccountNature::parse("activo").is_err());
    }

    #[test]
    fn test_balance_groups() {
        assert_eq!(AccountNature::Asset.balance_group(), BalanceGroup::Debit);
        assert_eq!(AccountNature::NegativeResult.balance_group(), BalanceGroup::Debit);
        assert_eq!(AccountNature::Liability.balance_group(), BalanceGroup::Credit);
        assert_eq!(AccountNature::Equity.balance_group(), BalanceGroup::Credit);
        assert_eq!(AccountNature::Income.balance_group(), BalanceGroup::Credit);
        assert_eq!(AccountNature::Expense.balance_group(), BalanceGroup::Credit);
    }

    #[test]
    fn test_signed_balance() {
        assert_eq!(BalanceGroup::Debit.signed_balance(150.0, 50.0), 100.0);
        assert_eq!(BalanceGroup::Credit.signed_balance(150.0, 50.0), -100.0);
    }

    #[test]
    fn test_product_resolution() {
        let p = ProductDetails::resolve("SKU-1", "device", Some("Moto G84".into()), None, None)
            .unwrap();
        assert_eq!(p.display_name(), "Moto G84");
        assert_eq!(p.category(), "device");
    }

    #[test]
    fn test_product_requires_category_field() {
        let err = ProductDetails::resolve("SKU-2", "device", None, Some("ignored".into()), None)
            .unwrap_err();
        assert!(err.to_string().contains("requires model"), "got: {err}");
    }

    #[test]
    fn test_product_unknown_category() {
        assert!(ProductDetails::resolve("SKU-3", "furniture", None, None, None).is_err());
    }
}
