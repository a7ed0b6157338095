use super::money::Money;
use serde::{Deserialize, Serialize};

/// `from` pays `amount` to `to`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Settlement {
    pub from: String,
    pub from_name: String,
    pub to: String,
    pub to_name: String,
    pub amount: Money,
}
