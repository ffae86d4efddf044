use serde::{Deserialize, Serialize};

/// Cabin classes a block can be sold in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CabinClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

/// Per-passenger-type selling price, in minor currency units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fare {
    pub adult: i64,
    #[serde(default)]
    pub child: i64,
    #[serde(default)]
    pub infant: i64,
}

impl Fare {
    /// Gross fare for a party. Saturates at the `i64` bounds.
    pub fn total_for(&self, adults: u32, children: u32, infants: u32) -> i64 {
        self.adult
            .saturating_mul(i64::from(adults))
            .saturating_add(self.child.saturating_mul(i64::from(children)))
            .saturating_add(self.infant.saturating_mul(i64::from(infants)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Baggage {
    #[serde(default)]
    pub checked_kg: u32,
    #[serde(default)]
    pub checked_pieces: u32,
    #[serde(default)]
    pub cabin_kg: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareRules {
    #[serde(default)]
    pub refundable: bool,
    #[serde(default)]
    pub changeable: bool,
    #[serde(default)]
    pub cancellation_fee: i64,
    #[serde(default)]
    pub change_fee: i64,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommissionKind {
    #[default]
    Percentage,
    Fixed,
}

/// Agency commission. `value` is a percentage for [`CommissionKind::Percentage`]
/// and a per-passenger amount in minor units for [`CommissionKind::Fixed`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commission {
    #[serde(rename = "type")]
    pub kind: CommissionKind,
    pub value: f64,
}

impl Commission {
    /// Commission owed on `gross` for `passengers` seats, rounded to the
    /// nearest minor unit.
    pub fn amount_on(&self, gross: i64, passengers: u32) -> i64 {
        match self.kind {
            CommissionKind::Percentage => (gross as f64 * self.value / 100.0).round() as i64,
            CommissionKind::Fixed => (self.value * f64::from(passengers)).round() as i64,
        }
    }
}

/// Everything sold for one cabin class of a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassConfig {
    pub fare: Fare,
    pub currency: String,
    pub total_seats: u32,
    pub available_seats: u32,
    #[serde(default)]
    pub baggage: Baggage,
    #[serde(default)]
    pub fare_rules: FareRules,
    #[serde(default)]
    pub commission: Commission,
}

impl ClassConfig {
    pub fn validate(&self, class: CabinClass) -> Result<(), PricingError> {
        if self.fare.adult <= 0 {
            return Err(PricingError::MissingAdultFare(class));
        }
        if self.fare.child < 0 || self.fare.infant < 0 {
            return Err(PricingError::NegativeFare(class));
        }
        if self.currency.trim().len() != 3 {
            return Err(PricingError::InvalidCurrency(self.currency.clone()));
        }
        if self.available_seats > self.total_seats {
            return Err(PricingError::SeatsExceedAllotment {
                class,
                available: self.available_seats,
                total: self.total_seats,
            });
        }
        if self.commission.value < 0.0
            || (self.commission.kind == CommissionKind::Percentage && self.commission.value > 100.0)
        {
            return Err(PricingError::InvalidCommission(class));
        }
        Ok(())
    }

    /// Share of the allotment already sold, between 0 and 1.
    pub fn utilization(&self) -> f64 {
        if self.total_seats == 0 {
            0.0
        } else {
            1.0 - (f64::from(self.available_seats) / f64::from(self.total_seats))
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("{0:?}: adult fare is required")]
    MissingAdultFare(CabinClass),

    #[error("{0:?}: fares cannot be negative")]
    NegativeFare(CabinClass),

    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),

    #[error("{class:?}: available seats ({available}) exceed the allotment ({total})")]
    SeatsExceedAllotment {
        class: CabinClass,
        available: u32,
        total: u32,
    },

    #[error("{0:?}: commission must be between 0 and 100 percent")]
    InvalidCommission(CabinClass),
}
