use crate::error::FormError;

/// Raw field values as typed into the lead form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LeadForm {
    pub name: String,
    pub phone: String,
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub name: String,
    pub phone: String,
}

impl LeadForm {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }

    pub fn validate(&self) -> Result<Lead, FormError> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        match (name.is_empty(), phone.is_empty()) {
            (true, true) => Err(FormError::MissingNameAndPhone),
            (true, false) => Err(FormError::MissingName),
            (false, true) => Err(FormError::MissingPhone),
            (false, false) => Ok(Lead {
                name: name.to_string(),
                phone: phone.to_string(),
            }),
        }
    }
}
