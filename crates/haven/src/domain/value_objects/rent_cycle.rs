//! Rent billing cycle.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How often rent falls due.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RentCycle {
    Monthly,
    Quarterly,
    Yearly,
}

impl RentCycle {
    pub fn months(&self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::Yearly => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "monthly" => Self::Monthly,
            "quarterly" => Self::Quarterly,
            _ => Self::Yearly,
        }
    }

    /// Expiry date for a rent period starting at `start`.
    ///
    /// Calendar-month arithmetic; a start on the 31st clamps to the last
    /// day of shorter months.
    pub fn expiry_from(&self, start: NaiveDate) -> NaiveDate {
        add_months(start, self.months())
    }
}

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    let zero_based = date.month0() + months;
    let year = date.year() + (zero_based / 12) as i32;
    let month = zero_based % 12 + 1;

    let mut day = date.day();
    loop {
        if let Some(d) = NaiveDate::from_ymd_opt(year, month, day) {
            return d;
        }
        day -= 1;
    }
}
