//! Validation framework: accumulated error lists and the form-like inputs
//! that gate every mutating operation.

use std::fmt;

use crate::messages;
use crate::model::{Account, CARD_NUMBER_LENGTH, CardKind};

pub const MIN_LOGIN_LENGTH: usize = 4;
pub const MAX_LOGIN_LENGTH: usize = 20;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 30;
pub const MIN_AGE: i64 = 23;
pub const MAX_AGE: i64 = 90;

/// An ordered, append-only list of human-readable validation messages.
/// Empty means valid. Scoped to a single validation pass, never persisted.
#[derive(Debug, Default)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("\n"))
    }
}

/// An entity that can check itself. `validate` runs every applicable rule
/// unconditionally, appending one message per failure; nothing
/// short-circuits, so simultaneous failures are all reported.
pub trait Validate {
    fn validate(&self, errors: &mut ValidationErrors);

    /// Run validation on a fresh list. `Ok` iff nothing was appended.
    /// Checks re-read current field values, so call this exactly once
    /// before consuming the entity.
    fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.validate(&mut errors);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Account-creation form. Captures the logins already in use at
/// construction so uniqueness is one more independent check.
#[derive(Debug)]
pub struct AccountForm {
    name: String,
    age: i64,
    login: String,
    password: String,
    taken_logins: Vec<String>,
}

impl AccountForm {
    pub fn new(
        name: String,
        age: i64,
        login: String,
        password: String,
        taken_logins: Vec<String>,
    ) -> Self {
        Self {
            name,
            age,
            login,
            password,
            taken_logins,
        }
    }

    /// Consume a checked form into the account it describes.
    pub fn into_account(self) -> Account {
        Account::new(self.name, self.age, self.login, self.password)
    }

    fn validate_name(&self, errors: &mut ValidationErrors) {
        let invalid = match self.name.chars().next() {
            None => true,
            Some(first) => first.is_lowercase(),
        };
        if invalid {
            errors.push(messages::NAME_INVALID);
        }
    }

    fn validate_age(&self, errors: &mut ValidationErrors) {
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            errors.push(messages::age_out_of_range(MIN_AGE, MAX_AGE));
        }
    }

    fn validate_login(&self, errors: &mut ValidationErrors) {
        if self.login.is_empty() {
            errors.push(messages::LOGIN_MISSING);
        }
        if self.login.chars().count() < MIN_LOGIN_LENGTH {
            errors.push(messages::login_too_short(MIN_LOGIN_LENGTH));
        }
        if self.login.chars().count() > MAX_LOGIN_LENGTH {
            errors.push(messages::login_too_long(MAX_LOGIN_LENGTH));
        }
    }

    fn validate_login_unique(&self, errors: &mut ValidationErrors) {
        if self.taken_logins.iter().any(|login| *login == self.login) {
            errors.push(messages::LOGIN_TAKEN);
        }
    }

    fn validate_password(&self, errors: &mut ValidationErrors) {
        if self.password.is_empty() {
            errors.push(messages::PASSWORD_MISSING);
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.push(messages::password_too_short(MIN_PASSWORD_LENGTH));
        }
        if self.password.chars().count() > MAX_PASSWORD_LENGTH {
            errors.push(messages::password_too_long(MAX_PASSWORD_LENGTH));
        }
    }
}

impl Validate for AccountForm {
    fn validate(&self, errors: &mut ValidationErrors) {
        self.validate_name(errors);
        self.validate_age(errors);
        self.validate_login(errors);
        self.validate_login_unique(errors);
        self.validate_password(errors);
    }
}

/// Card-number lookup against a known set of numbers. The length check
/// takes precedence over existence; the two are mutually exclusive.
#[derive(Debug)]
pub struct CardNumberLookup<'a> {
    number: &'a str,
    known_numbers: &'a [&'a str],
}

impl<'a> CardNumberLookup<'a> {
    pub fn new(number: &'a str, known_numbers: &'a [&'a str]) -> Self {
        Self {
            number,
            known_numbers,
        }
    }
}

impl Validate for CardNumberLookup<'_> {
    fn validate(&self, errors: &mut ValidationErrors) {
        if self.number.chars().count() != CARD_NUMBER_LENGTH {
            errors.push(messages::wrong_card_number_length());
        } else if !self.known_numbers.contains(&self.number) {
            errors.push(messages::no_card_with_number(self.number));
        }
    }
}

/// Card-type input: matches the supplied tag against the fixed variant
/// registry, case-insensitively.
#[derive(Debug)]
pub struct CardTypeInput<'a> {
    tag: &'a str,
}

impl<'a> CardTypeInput<'a> {
    pub fn new(tag: &'a str) -> Self {
        Self { tag }
    }

    /// The validated kind, or the validation errors for display.
    pub fn resolve(&self) -> Result<CardKind, ValidationErrors> {
        match CardKind::from_tag(self.tag) {
            Some(kind) => Ok(kind),
            None => {
                let mut errors = ValidationErrors::new();
                self.validate(&mut errors);
                Err(errors)
            }
        }
    }
}

impl Validate for CardTypeInput<'_> {
    fn validate(&self, errors: &mut ValidationErrors) {
        if CardKind::from_tag(self.tag).is_none() {
            errors.push(messages::WRONG_CARD_TYPE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, age: i64, login: &str, password: &str) -> AccountForm {
        AccountForm::new(
            name.to_string(),
            age,
            login.to_string(),
            password.to_string(),
            Vec::new(),
        )
    }

    #[test]
    fn valid_form_passes() {
        assert!(form("Alex", 30, "alex01", "secret1").check().is_ok());
    }

    #[test]
    fn empty_name_fails() {
        let errors = form("", 30, "alex01", "secret1").check().unwrap_err();
        assert_eq!(errors.messages(), [messages::NAME_INVALID]);
    }

    #[test]
    fn lowercase_name_fails() {
        let errors = form("alex", 30, "alex01", "secret1").check().unwrap_err();
        assert_eq!(errors.messages(), [messages::NAME_INVALID]);
    }

    #[test]
    fn age_bounds_are_inclusive() {
        assert!(form("Alex", 23, "alex01", "secret1").check().is_ok());
        assert!(form("Alex", 90, "alex01", "secret1").check().is_ok());
        assert!(form("Alex", 22, "alex01", "secret1").check().is_err());
        assert!(form("Alex", 91, "alex01", "secret1").check().is_err());
    }

    #[test]
    fn login_length_bounds() {
        assert!(form("Alex", 30, "abcd", "secret1").check().is_ok());
        assert!(form("Alex", 30, "a".repeat(20).as_str(), "secret1")
            .check()
            .is_ok());
        assert!(form("Alex", 30, "abc", "secret1").check().is_err());
        assert!(form("Alex", 30, "a".repeat(21).as_str(), "secret1")
            .check()
            .is_err());
    }

    #[test]
    fn empty_login_reports_presence_and_length() {
        let errors = form("Alex", 30, "", "secret1").check().unwrap_err();
        assert_eq!(
            errors.messages(),
            [
                messages::LOGIN_MISSING.to_string(),
                messages::login_too_short(MIN_LOGIN_LENGTH),
            ]
        );
    }

    #[test]
    fn password_length_bounds() {
        assert!(form("Alex", 30, "alex01", "secret").check().is_ok());
        assert!(form("Alex", 30, "alex01", "s".repeat(30).as_str())
            .check()
            .is_ok());
        assert!(form("Alex", 30, "alex01", "short").check().is_err());
        assert!(form("Alex", 30, "alex01", "s".repeat(31).as_str())
            .check()
            .is_err());
    }

    #[test]
    fn taken_login_fails_regardless_of_other_fields() {
        let form = AccountForm::new(
            "Boris".to_string(),
            45,
            "alex01".to_string(),
            "different".to_string(),
            vec!["alex01".to_string()],
        );
        let errors = form.check().unwrap_err();
        assert_eq!(errors.messages(), [messages::LOGIN_TAKEN]);
    }

    #[test]
    fn simultaneous_failures_are_all_reported() {
        let form = AccountForm::new(
            "alex".to_string(),
            10,
            "ab".to_string(),
            "123".to_string(),
            vec!["ab".to_string()],
        );
        let errors = form.check().unwrap_err();
        assert_eq!(
            errors.messages(),
            [
                messages::NAME_INVALID.to_string(),
                messages::age_out_of_range(MIN_AGE, MAX_AGE),
                messages::login_too_short(MIN_LOGIN_LENGTH),
                messages::LOGIN_TAKEN.to_string(),
                messages::password_too_short(MIN_PASSWORD_LENGTH),
            ]
        );
    }

    #[test]
    fn into_account_carries_the_form_fields() {
        let account = form("Alex", 30, "alex01", "secret1").into_account();
        assert_eq!(account.name(), "Alex");
        assert_eq!(account.age(), 30);
        assert_eq!(account.login(), "alex01");
        assert!(account.credentials_match("alex01", "secret1"));
    }

    #[test]
    fn card_number_length_takes_precedence() {
        // a short number that also exists nowhere reports only the length
        let known = ["1234567812345678"];
        let errors = CardNumberLookup::new("123", &known).check().unwrap_err();
        assert_eq!(errors.messages(), [messages::wrong_card_number_length()]);
    }

    #[test]
    fn unknown_card_number_of_right_length_fails() {
        let known = ["1234567812345678"];
        let errors = CardNumberLookup::new("0000000000000000", &known)
            .check()
            .unwrap_err();
        assert_eq!(
            errors.messages(),
            [messages::no_card_with_number("0000000000000000")]
        );
    }

    #[test]
    fn known_card_number_passes() {
        let known = ["1234567812345678"];
        assert!(CardNumberLookup::new("1234567812345678", &known)
            .check()
            .is_ok());
    }

    #[test]
    fn card_type_resolves_case_insensitively() {
        assert_eq!(
            CardTypeInput::new("Usual").resolve().unwrap(),
            CardKind::Usual
        );
        assert_eq!(
            CardTypeInput::new("VIRTUAL").resolve().unwrap(),
            CardKind::Virtual
        );
    }

    #[test]
    fn unknown_card_type_fails() {
        let errors = CardTypeInput::new("golden").resolve().unwrap_err();
        assert_eq!(errors.messages(), [messages::WRONG_CARD_TYPE]);
    }

    #[test]
    fn errors_display_joins_messages_with_newlines() {
        let mut errors = ValidationErrors::new();
        errors.push("first");
        errors.push("second");
        assert_eq!(errors.to_string(), "first\nsecond");
        assert_eq!(errors.len(), 2);
    }
}
