//! Plain data types used with the generated builders.

use thiserror::Error;

/// A postal address. Built through its setters.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    street: String,
    city: String,
    post_code: String,
    country: String,
}

impl Default for Address {
    fn default() -> Self {
        Self {
            street: String::new(),
            city: String::new(),
            post_code: String::new(),
            country: "GB".to_string(),
        }
    }
}

impl Address {
    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn set_street(&mut self, street: String) {
        self.street = street;
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn set_city(&mut self, city: String) {
        self.city = city;
    }

    pub fn post_code(&self) -> &str {
        &self.post_code
    }

    pub fn set_post_code(&mut self, post_code: String) {
        self.post_code = post_code;
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn set_country(&mut self, country: String) {
        self.country = country;
    }
}

/// A person. Only constructible through [`Person::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    firstname: String,
    surname: String,
}

impl Person {
    pub fn new(firstname: String, surname: String) -> Self {
        Self { firstname, surname }
    }

    pub fn firstname(&self) -> &str {
        &self.firstname
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.surname)
    }
}

/// Contact details with public fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contact {
    pub name: String,
    pub email: Option<String>,
    pub tags: Vec<String>,
    pub address: Option<Address>,
}

/// Rejected account number.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid IBAN '{0}'")]
pub struct InvalidIban(pub String);

/// A bank account whose IBAN setter validates its input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    owner: String,
    iban: String,
}

impl Account {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn set_owner(&mut self, owner: String) {
        self.owner = owner;
    }

    pub fn iban(&self) -> &str {
        &self.iban
    }

    /// Accepts values starting with a two-letter country code.
    pub fn set_iban(&mut self, iban: String) -> Result<(), InvalidIban> {
        let valid = iban.len() > 2 && iban.chars().take(2).all(|c| c.is_ascii_uppercase());
        if !valid {
            return Err(InvalidIban(iban));
        }
        self.iban = iban;
        Ok(())
    }
}

/// Temperature below absolute zero.
#[derive(Debug, Error, PartialEq)]
#[error("{0} °C is below absolute zero")]
pub struct BelowAbsoluteZero(pub f64);

/// A sensor reading, validated on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    sensor: String,
    celsius: f64,
}

impl Reading {
    pub const ABSOLUTE_ZERO: f64 = -273.15;

    pub fn try_new(sensor: String, celsius: f64) -> Result<Self, BelowAbsoluteZero> {
        if celsius < Self::ABSOLUTE_ZERO {
            return Err(BelowAbsoluteZero(celsius));
        }
        Ok(Self { sensor, celsius })
    }

    pub fn sensor(&self) -> &str {
        &self.sensor
    }

    pub fn celsius(&self) -> f64 {
        self.celsius
    }
}
