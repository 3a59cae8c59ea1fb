#![allow(non_snake_case)]

pub mod catalog;
pub mod failure;
pub mod form;
pub mod page;
pub mod table;
pub mod validation;

pub use catalog::*;
pub use failure::{ApiFailure, FailureKind, FieldErrors};
pub use form::FormState;
pub use page::{ApiEnvelope, ErrorBody, FieldErrorEntry, Page, PageQuery};
pub use table::{LoadOutcome, LoadPhase, LoadTicket, Selection, TableState, PAGE_SIZE_CHOICES};
pub use validation::{
    FormModel, LoginForm, RegisterForm, StockExchangeForm, StockForm, StockPriceForm,
};

/// Name of the session cookie, shared via Leptos context.
#[derive(Clone, Debug)]
pub struct SessionCookieName(pub String);

impl Default for SessionCookieName {
    fn default() -> Self {
        Self("jwt".into())
    }
}
