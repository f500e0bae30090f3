use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Currency enum for the supported burn-tracked tokens.
/// NOTE: Use db_type = "Text" for SQLite compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DeriveActiveEnum, EnumIter)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Currency {
    #[sea_orm(string_value = "LUNC")]
    #[serde(rename = "LUNC")]
    Lunc,
    #[sea_orm(string_value = "SHIB")]
    #[serde(rename = "SHIB")]
    Shib,
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Lunc => "LUNC",
            Currency::Shib => "SHIB",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "LUNC" => Some(Currency::Lunc),
            "SHIB" => Some(Currency::Shib),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for currency in [Currency::Lunc, Currency::Shib] {
            assert_eq!(Currency::from_str(currency.as_str()), Some(currency));
        }
        assert_eq!(Currency::from_str("DOGE"), None);
    }
}
