//! Contact Details

use std::fmt;

use serde::{Deserialize, Serialize};

/// A field of the contact form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Buyer's full name
    Name,

    /// Email address
    Email,

    /// Phone number
    Phone,

    /// Street address
    Address,

    /// City
    City,

    /// Postal index number
    Pincode,

    /// Optional note for the seller
    Message,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Address,
        Field::City,
        Field::Pincode,
        Field::Message,
    ];

    /// Machine name, used for form element ids.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Address => "address",
            Field::City => "city",
            Field::Pincode => "pincode",
            Field::Message => "message",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Full Name",
            Field::Email => "Email",
            Field::Phone => "Phone Number",
            Field::Address => "Delivery Address",
            Field::City => "City",
            Field::Pincode => "Pincode",
            Field::Message => "Additional Notes",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw, unvalidated contact form input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    /// Buyer's full name
    #[serde(default)]
    pub name: String,

    /// Email address
    #[serde(default)]
    pub email: String,

    /// Phone number
    #[serde(default)]
    pub phone: String,

    /// Street address
    #[serde(default)]
    pub address: String,

    /// City
    #[serde(default)]
    pub city: String,

    /// Postal index number
    #[serde(default)]
    pub pincode: String,

    /// Optional note
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// Current value of a field.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::Pincode => &self.pincode,
            Field::Message => &self.message,
        }
    }

    /// Replace the value of a field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Address => &mut self.address,
            Field::City => &mut self.city,
            Field::Pincode => &mut self.pincode,
            Field::Message => &mut self.message,
        };

        *slot = value.into();
    }
}

/// Contact details that passed validation. Name and phone are trimmed; other values are kept as
/// typed.
///
/// Only [`Schema::validate`](crate::validation::Schema::validate) produces these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactDetails {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) address: String,
    pub(crate) city: String,
    pub(crate) pincode: String,
    pub(crate) message: Option<String>,
}

impl ContactDetails {
    /// Buyer's full name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Phone number
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Street address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// City
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Postal index number
    pub fn pincode(&self) -> &str {
        &self.pincode
    }

    /// Optional note, absent when left blank
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_value_round_trips_every_field() {
        let mut form = ContactForm::default();

        for field in Field::ALL {
            form.set(field, format!("value for {field}"));
        }

        for field in Field::ALL {
            assert_eq!(form.value(field), format!("value for {}", field.key()));
        }
    }

    #[test]
    fn deserializes_without_message() -> Result<(), serde_norway::Error> {
        let form: ContactForm = serde_norway::from_str(
            "name: Asha\nemail: asha@example.com\nphone: '9876543210'\naddress: 12 Lake Road\ncity: Pune\npincode: '411001'\n",
        )?;

        assert_eq!(form.name, "Asha");
        assert_eq!(form.pincode, "411001");
        assert!(form.message.is_empty());

        Ok(())
    }
}
