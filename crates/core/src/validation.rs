//! Contact Form Validation
//!
//! Validation is driven by a [`Schema`]: an ordered mapping from [`Field`] to the rules its
//! value must satisfy. Only fields the schema marks as trimmed are measured without surrounding
//! whitespace; every other value is checked as typed. A form either validates completely into [`ContactDetails`] or
//! yields every [`FieldError`] found.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::contact::{ContactDetails, ContactForm, Field};

static EMAIL_PATTERN: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_'+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
});

/// A single constraint on a field value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Value must not be empty. Failing this skips the field's remaining rules.
    Required(&'static str),

    /// At least this many characters.
    MinChars(usize, &'static str),

    /// At most this many characters.
    MaxChars(usize, &'static str),

    /// Exactly this many characters.
    ExactChars(usize, &'static str),

    /// Value must look like an email address.
    Email(&'static str),
}

impl Rule {
    fn check(self, value: &str) -> Result<(), &'static str> {
        let chars = value.chars().count();

        let passes = match self {
            Rule::Required(_) => !value.is_empty(),
            Rule::MinChars(min, _) => chars >= min,
            Rule::MaxChars(max, _) => chars <= max,
            Rule::ExactChars(len, _) => chars == len,
            Rule::Email(_) => is_email(value),
        };

        if passes { Ok(()) } else { Err(self.message()) }
    }

    /// Message shown when this rule fails.
    pub fn message(self) -> &'static str {
        match self {
            Rule::Required(message)
            | Rule::MinChars(_, message)
            | Rule::MaxChars(_, message)
            | Rule::ExactChars(_, message)
            | Rule::Email(message) => message,
        }
    }
}

/// A violated rule, scoped to the field it belongs to.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Field that failed
    pub field: Field,

    /// Human-readable message
    pub message: &'static str,
}

/// Every rule violation found in a form. Never empty when returned as an error.
#[derive(Clone, Debug, Default, Error, PartialEq, Eq)]
#[error("{} contact field error(s)", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// All errors, in form order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message for a field, as displayed next to its input.
    pub fn first(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    /// Whether a field has any errors.
    pub fn contains(&self, field: Field) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    /// Replace the errors for one field, keeping form order.
    pub fn replace_field(&mut self, field: Field, errors: Vec<FieldError>) {
        self.errors.retain(|error| error.field != field);
        self.errors.extend(errors);
        self.errors.sort_by_key(|error| error.field);
    }
}

/// Rules for one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldRules {
    field: Field,
    trim: bool,
    rules: Vec<Rule>,
}

/// Ordered mapping from field to rule set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldRules>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::contact()
    }
}

impl Schema {
    /// Create a schema from `(field, rules)` pairs.
    pub fn new(fields: impl IntoIterator<Item = (Field, Vec<Rule>)>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(field, rules)| FieldRules {
                    field,
                    trim: false,
                    rules,
                })
                .collect(),
        }
    }

    /// Measure `fields` with surrounding whitespace removed.
    #[must_use]
    pub fn with_trimmed(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        for field in fields {
            if let Some(entry) = self.fields.iter_mut().find(|entry| entry.field == field) {
                entry.trim = true;
            }
        }

        self
    }

    /// Whether `field` is trimmed before its rules run.
    pub fn is_trimmed(&self, field: Field) -> bool {
        self.fields
            .iter()
            .any(|entry| entry.field == field && entry.trim)
    }

    fn prepare<'v>(&self, field: Field, value: &'v str) -> &'v str {
        if self.is_trimmed(field) {
            value.trim()
        } else {
            value
        }
    }

    /// The checkout contact schema.
    pub fn contact() -> Self {
        Self::new([
            (
                Field::Name,
                vec![
                    Rule::Required("Name is required"),
                    Rule::MaxChars(100, "Name must be less than 100 characters"),
                ],
            ),
            (
                Field::Email,
                vec![
                    Rule::Required("Email is required"),
                    Rule::Email("Invalid email address"),
                    Rule::MaxChars(255, "Email must be less than 255 characters"),
                ],
            ),
            (
                Field::Phone,
                vec![
                    Rule::Required("Phone number is required"),
                    Rule::MinChars(10, "Phone number must be at least 10 digits"),
                    Rule::MaxChars(15, "Phone number must be less than 15 digits"),
                ],
            ),
            (
                Field::Address,
                vec![
                    Rule::Required("Address is required"),
                    Rule::MinChars(10, "Please enter a complete address"),
                    Rule::MaxChars(500, "Address must be less than 500 characters"),
                ],
            ),
            (
                Field::City,
                vec![
                    Rule::Required("City is required"),
                    Rule::MaxChars(100, "City must be less than 100 characters"),
                ],
            ),
            (
                Field::Pincode,
                vec![
                    Rule::Required("Pincode is required"),
                    Rule::ExactChars(6, "Pincode must be 6 digits"),
                ],
            ),
            (
                Field::Message,
                vec![Rule::MaxChars(
                    1000,
                    "Message must be less than 1000 characters",
                )],
            ),
        ])
        .with_trimmed([Field::Name, Field::Phone])
    }

    /// Rules for a field; empty if the schema does not mention it.
    pub fn rules(&self, field: Field) -> &[Rule] {
        self.fields
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| entry.rules.as_slice())
            .unwrap_or_default()
    }

    /// Whether the field carries a [`Rule::Required`].
    pub fn is_required(&self, field: Field) -> bool {
        self.rules(field)
            .iter()
            .any(|rule| matches!(rule, Rule::Required(_)))
    }

    /// Check a single field value, trimming it first.
    pub fn validate_field(&self, field: Field, value: &str) -> Vec<FieldError> {
        let value = self.prepare(field, value);
        let mut errors = Vec::new();

        for rule in self.rules(field) {
            if let Err(message) = rule.check(value) {
                errors.push(FieldError { field, message });

                if matches!(rule, Rule::Required(_)) {
                    break;
                }
            }
        }

        errors
    }

    /// Validate every field of the form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] holding each violated rule if any field fails.
    pub fn validate(&self, form: &ContactForm) -> Result<ContactDetails, ValidationErrors> {
        let errors: Vec<FieldError> = Field::ALL
            .into_iter()
            .flat_map(|field| self.validate_field(field, form.value(field)))
            .collect();

        if !errors.is_empty() {
            warn!(
                errors = errors.len(),
                fields = ?errors.iter().map(|error| error.field).collect::<Vec<_>>(),
                "contact form rejected"
            );

            return Err(ValidationErrors { errors });
        }

        debug!("contact form accepted");

        let value = |field| self.prepare(field, form.value(field)).to_string();

        Ok(ContactDetails {
            name: value(Field::Name),
            email: value(Field::Email),
            phone: value(Field::Phone),
            address: value(Field::Address),
            city: value(Field::City),
            pincode: value(Field::Pincode),
            message: (!form.message.trim().is_empty()).then(|| value(Field::Message)),
        })
    }
}

fn is_email(value: &str) -> bool {
    if value.starts_with('.') || value.contains("..") {
        return false;
    }

    EMAIL_PATTERN
        .as_ref()
        .is_ok_and(|pattern| pattern.is_match(value))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            address: "12 Lake Road, Koregaon Park".to_string(),
            city: "Pune".to_string(),
            pincode: "411001".to_string(),
            message: String::new(),
        }
    }

    fn messages(schema: &Schema, field: Field, value: &str) -> Vec<&'static str> {
        schema
            .validate_field(field, value)
            .into_iter()
            .map(|error| error.message)
            .collect()
    }

    #[test]
    fn email_pattern_compiles() {
        assert!(EMAIL_PATTERN.is_ok());
    }

    #[test]
    fn only_name_and_phone_are_trimmed_in_details() -> TestResult {
        let mut form = valid_form();
        form.name = "  Asha Rao  ".to_string();
        form.phone = " 9876543210 ".to_string();
        form.city = " Pune ".to_string();
        form.message = "  Leave at the gate ".to_string();

        let details = Schema::contact().validate(&form)?;

        assert_eq!(details.name(), "Asha Rao");
        assert_eq!(details.phone(), "9876543210");
        assert_eq!(details.city(), " Pune ");
        assert_eq!(details.message(), Some("  Leave at the gate "));

        Ok(())
    }

    #[test]
    fn blank_message_is_absent() -> TestResult {
        let mut form = valid_form();
        form.message = "   ".to_string();

        let details = Schema::contact().validate(&form)?;

        assert_eq!(details.message(), None);

        Ok(())
    }

    #[test]
    fn empty_form_reports_every_required_field() -> TestResult {
        let errors = Schema::contact()
            .validate(&ContactForm::default())
            .err()
            .ok_or("empty form must not validate")?;

        let fields: Vec<Field> = errors.iter().map(|error| error.field).collect();

        assert_eq!(
            fields,
            [
                Field::Name,
                Field::Email,
                Field::Phone,
                Field::Address,
                Field::City,
                Field::Pincode
            ]
        );
        assert_eq!(errors.first(Field::Name), Some("Name is required"));
        assert!(!errors.contains(Field::Message));

        Ok(())
    }

    #[test]
    fn pincode_must_be_exactly_six_characters() {
        let schema = Schema::contact();

        for value in ["1", "12345", "1234567", "12345678901"] {
            assert_eq!(
                messages(&schema, Field::Pincode, value),
                ["Pincode must be 6 digits"],
                "pincode {value:?}"
            );
        }

        for value in [
            "411001", "ABCDEF", "a b cd", "४११००१", " 12345", "      ", "41100 ",
        ] {
            assert!(
                schema.validate_field(Field::Pincode, value).is_empty(),
                "pincode {value:?}"
            );
        }
    }

    #[test]
    fn address_length_bounds() {
        let schema = Schema::contact();

        for len in [1, 5, 9] {
            assert_eq!(
                messages(&schema, Field::Address, &"a".repeat(len)),
                ["Please enter a complete address"],
                "address of {len} chars"
            );
        }

        for len in [10, 11, 250, 500] {
            assert!(
                schema.validate_field(Field::Address, &"a".repeat(len)).is_empty(),
                "address of {len} chars"
            );
        }

        assert_eq!(
            messages(&schema, Field::Address, &"a".repeat(501)),
            ["Address must be less than 500 characters"]
        );
    }

    #[test]
    fn address_is_measured_as_typed() {
        let schema = Schema::contact();

        assert!(schema.validate_field(Field::Address, " 123456789 ").is_empty());
        assert!(schema.validate_field(Field::Address, "   Pune   ").is_empty());
        assert_eq!(
            messages(&schema, Field::Address, "  Pune  "),
            ["Please enter a complete address"]
        );
    }

    #[test]
    fn contact_schema_trims_name_and_phone_only() {
        let schema = Schema::contact();

        for field in Field::ALL {
            assert_eq!(
                schema.is_trimmed(field),
                matches!(field, Field::Name | Field::Phone),
                "{field}"
            );
        }
    }

    #[test]
    fn required_failure_skips_remaining_rules() {
        assert_eq!(
            messages(&Schema::contact(), Field::Name, "   "),
            ["Name is required"]
        );
        assert_eq!(
            messages(&Schema::contact(), Field::Address, ""),
            ["Address is required"]
        );
    }

    #[test]
    fn phone_is_measured_after_trimming() {
        let schema = Schema::contact();

        assert_eq!(
            messages(&schema, Field::Phone, "  98765  "),
            ["Phone number must be at least 10 digits"]
        );
        assert!(schema.validate_field(Field::Phone, "  +919876543210  ").is_empty());
        assert_eq!(
            messages(&schema, Field::Phone, "0012345678901234"),
            ["Phone number must be less than 15 digits"]
        );
    }

    #[test]
    fn name_and_city_upper_bounds() {
        let schema = Schema::contact();

        assert!(schema.validate_field(Field::Name, &"n".repeat(100)).is_empty());
        assert_eq!(
            messages(&schema, Field::Name, &"n".repeat(101)),
            ["Name must be less than 100 characters"]
        );
        assert_eq!(
            messages(&schema, Field::City, &"c".repeat(101)),
            ["City must be less than 100 characters"]
        );
    }

    #[test]
    fn message_is_optional_but_bounded() {
        let schema = Schema::contact();

        assert!(schema.validate_field(Field::Message, "").is_empty());
        assert!(schema.validate_field(Field::Message, &"m".repeat(1000)).is_empty());
        assert_eq!(
            messages(&schema, Field::Message, &"m".repeat(1001)),
            ["Message must be less than 1000 characters"]
        );
        assert!(!schema.is_required(Field::Message));
        assert!(schema.is_required(Field::Pincode));
    }

    #[test]
    fn email_shapes() {
        let schema = Schema::contact();

        for value in [
            "asha@example.com",
            "first.last+tag@mail.example.co.in",
            "o'neil@example.org",
            "o'@example.com",
        ] {
            assert!(schema.validate_field(Field::Email, value).is_empty(), "{value}");
        }

        for value in [
            "asha",
            "asha@",
            "@example.com",
            "asha@example",
            ".asha@example.com",
            "asha..rao@example.com",
            "asha.@example.com",
            "asha@example.c",
            "asha rao@example.com",
        ] {
            assert_eq!(
                messages(&schema, Field::Email, value),
                ["Invalid email address"],
                "{value}"
            );
        }
    }

    #[test]
    fn email_over_limit_reports_length() {
        let value = format!("{}@example.com", "a".repeat(250));

        assert_eq!(
            messages(&Schema::contact(), Field::Email, &value),
            ["Email must be less than 255 characters"]
        );
    }

    #[test]
    fn replace_field_keeps_form_order() {
        let mut errors = ValidationErrors::default();

        errors.replace_field(
            Field::City,
            vec![FieldError {
                field: Field::City,
                message: "City is required",
            }],
        );
        errors.replace_field(
            Field::Name,
            vec![FieldError {
                field: Field::Name,
                message: "Name is required",
            }],
        );
        errors.replace_field(Field::City, Vec::new());

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first(Field::Name), Some("Name is required"));
        assert_eq!(errors.first(Field::City), None);
    }

    #[test]
    fn unknown_field_has_no_rules() {
        let schema = Schema::new([(Field::Name, vec![Rule::Required("needed")])]);

        assert!(schema.rules(Field::Email).is_empty());
        assert!(schema.validate_field(Field::Email, "").is_empty());
    }
}
