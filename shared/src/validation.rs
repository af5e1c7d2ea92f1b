use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::form::{EntityForm, FieldKind, FieldSpec};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 ]{6,14}$").expect("Invalid phone regex"));
static POSTAL_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4,7}$").expect("Invalid postal code regex"));
static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.]+$").expect("Invalid username regex"));
static ACCOUNT_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{8,20}$").expect("Invalid account number regex"));
static REGION_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]{1,6}$").expect("Invalid region code regex"));

/// Named regular-expression constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Email,
    Phone,
    PostalCode,
    Username,
    AccountNumber,
    RegionCode,
}

impl PatternKind {
    fn regex(&self) -> &'static Regex {
        match self {
            PatternKind::Email => &EMAIL_RE,
            PatternKind::Phone => &PHONE_RE,
            PatternKind::PostalCode => &POSTAL_CODE_RE,
            PatternKind::Username => &USERNAME_RE,
            PatternKind::AccountNumber => &ACCOUNT_NUMBER_RE,
            PatternKind::RegionCode => &REGION_CODE_RE,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PatternKind::Email => "email address",
            PatternKind::Phone => "phone number",
            PatternKind::PostalCode => "postal code (4 to 7 digits)",
            PatternKind::Username => "username (letters, digits, '.' and '_')",
            PatternKind::AccountNumber => "account number (8 to 20 digits)",
            PatternKind::RegionCode => "code (uppercase letters and digits)",
        }
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex().is_match(value)
    }
}

/// Declarative constraint attached to a form field.
///
/// Only `Required` rejects an empty value; every other rule accepts it so that
/// optional fields can still carry format constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Range { min: f64, max: f64 },
    Integer,
    Pattern(PatternKind),
    Date,
}

impl Rule {
    pub fn check(&self, raw: &str) -> Result<(), ValidationError> {
        let value = raw.trim();
        if value.is_empty() {
            return match self {
                Rule::Required => Err(ValidationError::Required),
                _ => Ok(()),
            };
        }

        match *self {
            Rule::Required => Ok(()),
            Rule::MinLength(min) if value.chars().count() < min => {
                Err(ValidationError::TooShort(min))
            }
            Rule::MaxLength(max) if value.chars().count() > max => {
                Err(ValidationError::TooLong(max))
            }
            Rule::MinLength(_) | Rule::MaxLength(_) => Ok(()),
            Rule::Min(min) => {
                let number = parse_number(value)?;
                if number < min {
                    Err(ValidationError::TooSmall(min))
                } else {
                    Ok(())
                }
            }
            Rule::Range { min, max } => {
                let number = parse_number(value)?;
                if number < min || number > max {
                    Err(ValidationError::OutOfRange { min, max })
                } else {
                    Ok(())
                }
            }
            Rule::Integer => {
                if value.parse::<i64>().is_ok() {
                    return Ok(());
                }
                parse_number(value)?;
                Err(ValidationError::NotAnInteger)
            }
            Rule::Pattern(kind) => {
                if kind.is_match(value) {
                    Ok(())
                } else {
                    Err(ValidationError::PatternMismatch(kind.description()))
                }
            }
            Rule::Date => NaiveDate::parse_from_str(value, DATE_FORMAT)
                .map(|_| ())
                .map_err(|_| ValidationError::InvalidDate),
        }
    }
}

fn parse_number(value: &str) -> Result<f64, ValidationError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or(ValidationError::NotANumber)
}

/// Specific validation errors; the display text is shown under the field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,
    #[error("Must be at least {0} characters")]
    TooShort(usize),
    #[error("Must be at most {0} characters")]
    TooLong(usize),
    #[error("Must be a number")]
    NotANumber,
    #[error("Must be a whole number")]
    NotAnInteger,
    #[error("Must be at least {0}")]
    TooSmall(f64),
    #[error("Must be between {min} and {max}")]
    OutOfRange { min: f64, max: f64 },
    #[error("Must be a valid {0}")]
    PatternMismatch(&'static str),
    #[error("Must be a date in YYYY-MM-DD format")]
    InvalidDate,
    #[error("{0}")]
    Custom(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub error: ValidationError,
}

/// Validation result for an entity form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValidation {
    pub errors: Vec<FieldError>,
}

impl FormValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, field: impl Into<String>, error: ValidationError) {
        self.errors.push(FieldError {
            field: field.into(),
            error,
        });
    }

    pub fn errors_for<'a>(
        &'a self,
        field: &'a str,
    ) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| &e.error)
    }

    pub fn first_error_for(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field == field).map(|e| &e.error)
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.first_error_for(field).is_some()
    }
}

/// Run every declared rule of every field against the form values.
///
/// Checkbox fields carry no rules. Rules of one field are evaluated in
/// declaration order and every failure is recorded.
pub fn validate_form(specs: &[FieldSpec], form: &EntityForm) -> FormValidation {
    let mut validation = FormValidation::default();
    for spec in specs {
        if spec.kind == FieldKind::Checkbox {
            continue;
        }
        let value = form.get(spec.name);
        for rule in spec.rules {
            if let Err(error) = rule.check(value) {
                validation.push(spec.name, error);
            }
        }
    }
    validation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_blank() {
        assert_eq!(Rule::Required.check(""), Err(ValidationError::Required));
        assert_eq!(Rule::Required.check("   "), Err(ValidationError::Required));
        assert_eq!(Rule::Required.check("Sur"), Ok(()));
    }

    #[test]
    fn test_non_required_rules_accept_empty() {
        for rule in [
            Rule::MinLength(3),
            Rule::MaxLength(3),
            Rule::Min(1.0),
            Rule::Range { min: 1.0, max: 5.0 },
            Rule::Integer,
            Rule::Pattern(PatternKind::Email),
            Rule::Date,
        ] {
            assert_eq!(rule.check(""), Ok(()), "{:?} should accept empty input", rule);
        }
    }

    #[test]
    fn test_length_counts_trimmed_characters() {
        assert_eq!(Rule::MinLength(3).check("ab"), Err(ValidationError::TooShort(3)));
        assert_eq!(Rule::MinLength(3).check("  ab  "), Err(ValidationError::TooShort(3)));
        assert_eq!(Rule::MinLength(3).check("Ñuñ"), Ok(()));
        assert_eq!(Rule::MaxLength(4).check("Ñuñoa"), Err(ValidationError::TooLong(4)));
        assert_eq!(Rule::MaxLength(5).check("Ñuñoa"), Ok(()));
    }

    #[test]
    fn test_range_and_min() {
        let stars = Rule::Range { min: 1.0, max: 5.0 };
        assert_eq!(stars.check("3"), Ok(()));
        assert_eq!(stars.check("1"), Ok(()));
        assert_eq!(stars.check("5"), Ok(()));
        assert_eq!(stars.check("6"), Err(ValidationError::OutOfRange { min: 1.0, max: 5.0 }));
        assert_eq!(stars.check("abc"), Err(ValidationError::NotANumber));
        assert_eq!(stars.check("NaN"), Err(ValidationError::NotANumber));

        assert_eq!(Rule::Min(0.01).check("0"), Err(ValidationError::TooSmall(0.01)));
        assert_eq!(Rule::Min(0.01).check("19.90"), Ok(()));
    }

    #[test]
    fn test_integer() {
        assert_eq!(Rule::Integer.check("12"), Ok(()));
        assert_eq!(Rule::Integer.check("-3"), Ok(()));
        assert_eq!(Rule::Integer.check("1.5"), Err(ValidationError::NotAnInteger));
        assert_eq!(Rule::Integer.check("abc"), Err(ValidationError::NotANumber));
    }

    #[test]
    fn test_first_error_outlives_field_name() {
        let mut validation = FormValidation::default();
        validation.push("stars", ValidationError::NotAnInteger);
        validation.push("stars", ValidationError::OutOfRange { min: 1.0, max: 5.0 });

        let first = {
            let field = format!("st{}", "ars");
            validation.first_error_for(&field)
        };
        assert_eq!(first, Some(&ValidationError::NotAnInteger));
        assert_eq!(validation.errors_for("stars").count(), 2);
        assert!(!validation.has_error("name"));
    }

    #[test]
    fn test_patterns() {
        let email = Rule::Pattern(PatternKind::Email);
        assert_eq!(email.check("ana@hotel.cl"), Ok(()));
        assert!(email.check("ana@hotel").is_err());
        assert!(email.check("ana hotel.cl").is_err());

        assert!(PatternKind::Phone.is_match("+56 9 1234 5678"));
        assert!(!PatternKind::Phone.is_match("12-34"));
        assert!(PatternKind::PostalCode.is_match("8320000"));
        assert!(!PatternKind::PostalCode.is_match("83A"));
        assert!(PatternKind::Username.is_match("maria.lopez_2"));
        assert!(!PatternKind::Username.is_match("maria lopez"));
        assert!(PatternKind::AccountNumber.is_match("0012345678"));
        assert!(!PatternKind::AccountNumber.is_match("1234"));
        assert!(PatternKind::RegionCode.is_match("XIII"));
        assert!(!PatternKind::RegionCode.is_match("xiii"));
    }

    #[test]
    fn test_date_rule() {
        assert_eq!(Rule::Date.check("2025-02-28"), Ok(()));
        assert_eq!(Rule::Date.check("2025-02-30"), Err(ValidationError::InvalidDate));
        assert_eq!(Rule::Date.check("28/02/2025"), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ValidationError::TooShort(3).to_string(), "Must be at least 3 characters");
        assert_eq!(
            ValidationError::OutOfRange { min: 1.0, max: 5.0 }.to_string(),
            "Must be between 1 and 5"
        );
        assert_eq!(
            ValidationError::PatternMismatch(PatternKind::Email.description()).to_string(),
            "Must be a valid email address"
        );
    }

    #[test]
    fn test_validate_form_collects_errors_per_field() {
        const SPECS: &[FieldSpec] = &[
            FieldSpec::new("name", "Name", FieldKind::Text, &[Rule::Required, Rule::MinLength(3)]),
            FieldSpec::new(
                "stars",
                "Stars",
                FieldKind::Number,
                &[Rule::Required, Rule::Range { min: 1.0, max: 5.0 }],
            ),
            FieldSpec::new("active", "Active", FieldKind::Checkbox, &[Rule::Required]),
        ];

        let form = EntityForm::default().with("name", "ab").with("stars", "9");
        let validation = validate_form(SPECS, &form);
        assert!(!validation.is_valid());
        assert_eq!(validation.first_error_for("name"), Some(&ValidationError::TooShort(3)));
        assert!(validation.has_error("stars"));
        assert!(!validation.has_error("active"));

        let form = EntityForm::default().with("name", "Premium").with("stars", "4");
        assert!(validate_form(SPECS, &form).is_valid());
    }
}
