use core::fmt;

use alloc::string::{String, ToString};

/// A single address-book entry.
///
/// Both fields are trimmed of surrounding whitespace when the contact is built.
/// Nothing else is validated: an empty name or phone is accepted, and callers
/// that want to reject them must do so before inserting.
///
/// # Examples
///
/// ```
/// use contact_index::Contact;
///
/// let contact = Contact::new("  Ana ", "555-0101\n");
/// assert_eq!(contact.name(), "Ana");
/// assert_eq!(contact.phone(), "555-0101");
/// assert_eq!(contact.to_string(), "Ana - 555-0101");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Contact {
    name: String,
    phone: String,
}

impl Contact {
    /// Builds a contact, trimming both fields.
    #[must_use]
    pub fn new(name: impl AsRef<str>, phone: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            phone: phone.as_ref().trim().to_string(),
        }
    }

    /// The name as it was first inserted. Lookups ignore its case.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Splits the contact into `(name, phone)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.name, self.phone)
    }

    pub(crate) fn into_phone(self) -> String {
        self.phone
    }

    pub(crate) fn replace_phone(&mut self, phone: String) -> String {
        core::mem::replace(&mut self.phone, phone)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.phone)
    }
}

impl<N: AsRef<str>, P: AsRef<str>> From<(N, P)> for Contact {
    fn from((name, phone): (N, P)) -> Self {
        Contact::new(name, phone)
    }
}
