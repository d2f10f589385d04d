use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookPages(i32);

impl BookPages {
    pub fn new(pages: impl Into<i32>) -> error_stack::Result<Self, KernelError> {
        let pages = pages.into();
        if pages < 0 {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("pages must not be negative, got {pages}")));
        }
        Ok(Self(pages))
    }
}
