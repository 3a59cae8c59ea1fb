use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{
    CreateStockRequest, LoginRequest, RegisterRequest, StockExchange, StockExchangeRequest,
    UpdateStockPriceRequest,
};
use crate::failure::FieldErrors;

pub const NAME_MAX_CHARS: usize = 30;
pub const DESCRIPTION_MAX_CHARS: usize = 30;
pub const EXCHANGE_DESCRIPTION_MIN_CHARS: usize = 3;
pub const PASSWORD_MIN_CHARS: usize = 5;

/// A form whose raw text fields validate into a request body.
pub trait FormModel: Clone + Send + Sync + 'static {
    type Submission: Clone;

    fn validate(&self) -> Result<Self::Submission, FieldErrors>;
}

fn check_length(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    value: &str,
    min: usize,
    max: usize,
) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.insert(field.into(), format!("{label} is mandatory"));
        return;
    }
    let len = trimmed.chars().count();
    if len < min || len > max {
        errors.insert(
            field.into(),
            format!("{label} must be between {min} and {max} characters"),
        );
    }
}

fn check_price(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.insert(field.into(), "Price is mandatory".into());
        return None;
    }
    match Decimal::from_str(trimmed) {
        Err(_) => {
            errors.insert(field.into(), "Price must be a valid number".into());
            None
        }
        Ok(price) if price.is_sign_negative() && !price.is_zero() => {
            errors.insert(
                field.into(),
                "Price must be equal to or greater than zero".into(),
            );
            None
        }
        Ok(price) => Some(price),
    }
}

fn check_required(errors: &mut FieldErrors, field: &str, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field.into(), format!("{label} is required"));
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StockForm {
    pub name: String,
    pub description: String,
    pub current_price: String,
}

impl FormModel for StockForm {
    type Submission = CreateStockRequest;

    fn validate(&self) -> Result<CreateStockRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        check_length(&mut errors, "name", "Name", &self.name, 1, NAME_MAX_CHARS);
        check_length(
            &mut errors,
            "description",
            "Description",
            &self.description,
            1,
            DESCRIPTION_MAX_CHARS,
        );
        let price = check_price(&mut errors, "currentPrice", &self.current_price);

        match price {
            Some(currentPrice) if errors.is_empty() => Ok(CreateStockRequest {
                name: self.name.trim().to_string(),
                description: self.description.trim().to_string(),
                current_price: currentPrice,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StockPriceForm {
    pub current_price: String,
}

impl StockPriceForm {
    pub fn from_price(price: Decimal) -> Self {
        Self {
            current_price: price.to_string(),
        }
    }
}

impl FormModel for StockPriceForm {
    type Submission = UpdateStockPriceRequest;

    fn validate(&self) -> Result<UpdateStockPriceRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        match check_price(&mut errors, "currentPrice", &self.current_price) {
            Some(currentPrice) => Ok(UpdateStockPriceRequest {
                current_price: currentPrice,
            }),
            None => Err(errors),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StockExchangeForm {
    pub name: String,
    pub description: String,
}

impl StockExchangeForm {
    pub fn from_exchange(exchange: &StockExchange) -> Self {
        Self {
            name: exchange.name.clone(),
            description: exchange.description.clone(),
        }
    }
}

impl FormModel for StockExchangeForm {
    type Submission = StockExchangeRequest;

    fn validate(&self) -> Result<StockExchangeRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        check_length(&mut errors, "name", "Name", &self.name, 1, NAME_MAX_CHARS);
        check_length(
            &mut errors,
            "description",
            "Description",
            &self.description,
            EXCHANGE_DESCRIPTION_MIN_CHARS,
            DESCRIPTION_MAX_CHARS,
        );

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(StockExchangeRequest {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl FormModel for LoginForm {
    type Submission = LoginRequest;

    fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        check_required(&mut errors, "email", "Email", &self.email);
        check_required(&mut errors, "password", "Password", &self.password);

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl FormModel for RegisterForm {
    type Submission = RegisterRequest;

    fn validate(&self) -> Result<RegisterRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        check_required(&mut errors, "firstName", "First name", &self.first_name);
        check_required(&mut errors, "lastName", "Last name", &self.last_name);
        check_required(&mut errors, "email", "Email", &self.email);
        check_required(&mut errors, "password", "Password", &self.password);

        if !errors.contains_key("password") {
            if self.password != self.confirm_password {
                errors.insert("confirmPassword".into(), "Passwords do not match".into());
            } else if self.password.chars().count() < PASSWORD_MIN_CHARS {
                errors.insert(
                    "password".into(),
                    format!("Password must be at least {PASSWORD_MIN_CHARS} characters long"),
                );
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(RegisterRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn stock(name: &str, description: &str, price: &str) -> StockForm {
        StockForm {
            name: name.into(),
            description: description.into(),
            current_price: price.into(),
        }
    }

    #[test]
    fn valid_stock_form_trims_and_parses() {
        let request = stock("  Apple Inc. ", "Hardware", "187.50").validate().unwrap();
        assert_eq!(request.name, "Apple Inc.");
        assert_eq!(request.current_price, Decimal::new(18750, 2));
    }

    #[rstest]
    #[case("", "Name is mandatory")]
    #[case("   ", "Name is mandatory")]
    #[case(&"x".repeat(31), "Name must be between 1 and 30 characters")]
    fn stock_name_bounds(#[case] name: &str, #[case] expected: &str) {
        let errors = stock(name, "Hardware", "1").validate().unwrap_err();
        assert_eq!(errors["name"], expected);
    }

    #[test]
    fn thirty_character_name_is_accepted() {
        assert!(stock(&"x".repeat(30), "Hardware", "1").validate().is_ok());
    }

    #[rstest]
    #[case("", "Price is mandatory")]
    #[case("abc", "Price must be a valid number")]
    #[case("-0.01", "Price must be equal to or greater than zero")]
    fn stock_price_rules(#[case] price: &str, #[case] expected: &str) {
        let errors = stock("Apple", "Hardware", price).validate().unwrap_err();
        assert_eq!(errors["currentPrice"], expected);
    }

    #[test]
    fn zero_price_is_allowed() {
        assert!(StockPriceForm {
            current_price: "0".into()
        }
        .validate()
        .is_ok());
    }

    #[rstest]
    #[case("ab", "Description must be between 3 and 30 characters")]
    #[case("", "Description is mandatory")]
    fn exchange_description_bounds(#[case] description: &str, #[case] expected: &str) {
        let form = StockExchangeForm {
            name: "NASDAQ".into(),
            description: description.into(),
        };
        assert_eq!(form.validate().unwrap_err()["description"], expected);
    }

    #[test]
    fn register_requires_matching_passwords() {
        let form = RegisterForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret2".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors["confirmPassword"], "Passwords do not match");

        let short = RegisterForm {
            password: "abc".into(),
            confirm_password: "abc".into(),
            ..form
        };
        assert!(short.validate().unwrap_err().contains_key("password"));
    }

    #[test]
    fn login_reports_each_missing_field() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors["email"], "Email is required");
        assert_eq!(errors["password"], "Password is required");
    }
}
