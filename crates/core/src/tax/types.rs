//! Tax scheme data types.

use filmbudget_shared::types::{TaxComponentId, TaxSchemeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::TaxError;

/// How a component relates to the net amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaxKind {
    /// Withheld from the gross; the base is grossed up so net stays intact.
    Internal,
    /// Charged on top of the base.
    External,
}

/// Who receives a tax component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recipient {
    /// Paid out to the contractor, who settles it themselves.
    Contractor,
    /// Remitted by the production company.
    #[default]
    Budget,
}

/// One validated component of a tax scheme.
///
/// Fields are private so that a component with an impossible rate cannot
/// exist; deserialization goes through the same checks as [`TaxComponent::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaxComponentRecord")]
pub struct TaxComponent {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<TaxComponentId>,
    name: String,
    rate: Decimal,
    #[serde(rename = "type")]
    kind: TaxKind,
    recipient: Recipient,
    sort_order: i32,
}

#[derive(Deserialize)]
struct TaxComponentRecord {
    #[serde(default)]
    id: Option<TaxComponentId>,
    name: String,
    rate: Decimal,
    #[serde(rename = "type")]
    kind: TaxKind,
    #[serde(default)]
    recipient: Recipient,
    #[serde(default)]
    sort_order: i32,
}

impl TryFrom<TaxComponentRecord> for TaxComponent {
    type Error = TaxError;

    fn try_from(record: TaxComponentRecord) -> Result<Self, Self::Error> {
        let mut component = Self::new(record.name, record.rate, record.kind, record.recipient)?;
        component.id = record.id;
        component.sort_order = record.sort_order;
        Ok(component)
    }
}

impl TaxComponent {
    /// Creates a component after checking its rate.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::NegativeRate` for a rate below zero.
    /// Returns `TaxError::InternalRateOutOfRange` for an INTERNAL rate of 1 or more.
    /// Returns `TaxError::ExternalRateOutOfRange` for an EXTERNAL rate above 1.
    pub fn new(
        name: impl Into<String>,
        rate: Decimal,
        kind: TaxKind,
        recipient: Recipient,
    ) -> Result<Self, TaxError> {
        if rate < Decimal::ZERO {
            return Err(TaxError::NegativeRate(rate));
        }
        match kind {
            TaxKind::Internal if rate >= Decimal::ONE => {
                return Err(TaxError::InternalRateOutOfRange(rate));
            }
            TaxKind::External if rate > Decimal::ONE => {
                return Err(TaxError::ExternalRateOutOfRange(rate));
            }
            _ => {}
        }

        Ok(Self {
            id: None,
            name: name.into(),
            rate,
            kind,
            recipient,
            sort_order: 0,
        })
    }

    /// Sets the position of this component within its scheme.
    #[must_use]
    pub const fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Backend ID, if the component has been stored.
    #[must_use]
    pub const fn id(&self) -> Option<TaxComponentId> {
        self.id
    }

    /// Display name ("НДФЛ", "НДС", ...).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rate as a fraction of the base.
    #[must_use]
    pub const fn rate(&self) -> Decimal {
        self.rate
    }

    /// INTERNAL or EXTERNAL.
    #[must_use]
    pub const fn kind(&self) -> TaxKind {
        self.kind
    }

    /// Who receives this component.
    #[must_use]
    pub const fn recipient(&self) -> Recipient {
        self.recipient
    }

    /// Position within the scheme.
    #[must_use]
    pub const fn sort_order(&self) -> i32 {
        self.sort_order
    }
}

/// A named, ordered set of tax components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxScheme {
    /// Scheme ID.
    pub id: TaxSchemeId,
    /// Scheme name, unique across the backend.
    pub name: String,
    /// System schemes are seeded by the backend and cannot be deleted.
    #[serde(default)]
    pub is_system: bool,
    /// Components in any order; evaluation sorts them by `sort_order`.
    #[serde(default)]
    pub components: Vec<TaxComponent>,
}

impl TaxScheme {
    /// Components sorted by `sort_order`, ties kept in input order.
    #[must_use]
    pub fn ordered_components(&self) -> Vec<TaxComponent> {
        let mut components = self.components.clone();
        components.sort_by_key(TaxComponent::sort_order);
        components
    }

    /// The tax specification this scheme evaluates to.
    #[must_use]
    pub fn spec(&self) -> TaxSpec {
        TaxSpec::ComponentList {
            components: self.ordered_components(),
        }
    }
}

/// Legacy fixed tax types stored directly on a budget line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixedTaxType {
    /// Self-employed professional income tax, withheld.
    #[serde(rename = "СЗ")]
    SelfEmployed,
    /// Sole trader simplified tax, withheld.
    #[serde(rename = "ИП")]
    SoleTrader,
    /// VAT on top.
    #[serde(rename = "НДС")]
    Vat,
    /// Sole trader tax withheld, then VAT on the tax-inclusive amount.
    #[serde(rename = "ИП+НДС")]
    SoleTraderVat,
    /// Individual: income tax withheld, then insurance contributions on top.
    #[serde(rename = "ФЛ")]
    Individual,
    /// No tax.
    #[serde(rename = "Без налога")]
    NoTax,
}

impl FixedTaxType {
    /// All fixed types in display order.
    pub const ALL: [Self; 6] = [
        Self::SelfEmployed,
        Self::SoleTrader,
        Self::Vat,
        Self::SoleTraderVat,
        Self::Individual,
        Self::NoTax,
    ];

    /// Label used by the backend and in the grid.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SelfEmployed => "СЗ",
            Self::SoleTrader => "ИП",
            Self::Vat => "НДС",
            Self::SoleTraderVat => "ИП+НДС",
            Self::Individual => "ФЛ",
            Self::NoTax => "Без налога",
        }
    }

    /// Expands the type into ordered components.
    ///
    /// `rate_1` and `rate_2` are percentages. Slots the type does not use
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::PercentOutOfRange` when a used slot is negative, an
    /// INTERNAL slot reaches 100, or an EXTERNAL slot exceeds 100.
    pub fn components(
        self,
        rate_1: Decimal,
        rate_2: Decimal,
    ) -> Result<Vec<TaxComponent>, TaxError> {
        let slots: Vec<(&str, Decimal, TaxKind, Recipient)> = match self {
            Self::SelfEmployed => vec![("НПД", rate_1, TaxKind::Internal, Recipient::Contractor)],
            Self::SoleTrader => vec![("УСН", rate_1, TaxKind::Internal, Recipient::Contractor)],
            Self::Vat => vec![("НДС", rate_1, TaxKind::External, Recipient::Contractor)],
            Self::SoleTraderVat => vec![
                ("УСН", rate_1, TaxKind::Internal, Recipient::Contractor),
                ("НДС", rate_2, TaxKind::External, Recipient::Contractor),
            ],
            Self::Individual => vec![
                ("НДФЛ", rate_1, TaxKind::Internal, Recipient::Budget),
                ("Страховые", rate_2, TaxKind::External, Recipient::Budget),
            ],
            Self::NoTax => Vec::new(),
        };

        slots
            .into_iter()
            .zip(0..)
            .map(|((name, percent, kind, recipient), order)| {
                check_percent(percent, kind)?;
                TaxComponent::new(name, percent / Decimal::ONE_HUNDRED, kind, recipient)
                    .map(|c| c.with_sort_order(order))
            })
            .collect()
    }
}

fn check_percent(percent: Decimal, kind: TaxKind) -> Result<(), TaxError> {
    let out_of_range = percent < Decimal::ZERO
        || match kind {
            TaxKind::Internal => percent >= Decimal::ONE_HUNDRED,
            TaxKind::External => percent > Decimal::ONE_HUNDRED,
        };
    if out_of_range {
        Err(TaxError::PercentOutOfRange(percent))
    } else {
        Ok(())
    }
}

impl std::fmt::Display for FixedTaxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FixedTaxType {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().to_uppercase() == wanted)
            .ok_or_else(|| TaxError::UnknownTaxType(s.to_string()))
    }
}

/// The single tax specification every evaluation goes through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum TaxSpec {
    /// No tax; gross equals net.
    #[default]
    None,
    /// A legacy fixed type with percentage rates.
    FixedType {
        /// Fixed tax type.
        tax_type: FixedTaxType,
        /// First rate, in percent.
        #[serde(default)]
        rate_1: Decimal,
        /// Second rate, in percent.
        #[serde(default)]
        rate_2: Decimal,
    },
    /// An ordered list of scheme components.
    ComponentList {
        /// Components applied in `sort_order`.
        components: Vec<TaxComponent>,
    },
}

impl TaxSpec {
    /// Resolves the specification into ordered components.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::PercentOutOfRange` for an invalid fixed-type percentage.
    pub fn components(&self) -> Result<Vec<TaxComponent>, TaxError> {
        match self {
            Self::None => Ok(Vec::new()),
            Self::FixedType {
                tax_type,
                rate_1,
                rate_2,
            } => tax_type.components(*rate_1, *rate_2),
            Self::ComponentList { components } => {
                let mut ordered = components.clone();
                ordered.sort_by_key(TaxComponent::sort_order);
                Ok(ordered)
            }
        }
    }
}
