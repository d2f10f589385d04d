use error_stack::Report;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

/// Catalog price, normalized to two fractional digits on construction.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookPrice(Decimal);

impl BookPrice {
    pub fn new(price: impl Into<Decimal>) -> error_stack::Result<Self, KernelError> {
        let mut price = price.into();
        if price < Decimal::ZERO {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("basePrice must not be negative, got {price}")));
        }
        price.rescale(2);
        Ok(Self(price))
    }
}
