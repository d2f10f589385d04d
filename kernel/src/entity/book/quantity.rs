use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookQuantity(i32);

impl BookQuantity {
    pub fn new(quantity: impl Into<i32>) -> error_stack::Result<Self, KernelError> {
        let quantity = quantity.into();
        if quantity < 0 {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("quantity must not be negative, got {quantity}")));
        }
        Ok(Self(quantity))
    }
}
