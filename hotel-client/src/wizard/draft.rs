//! Reservation draft entered on the confirmation step

use shared::error::ErrorCode;
use shared::models::{DEFAULT_DOCUMENT_COUNTRY, DEFAULT_DOCUMENT_TYPE, GuestCreate};

use crate::ValidationError;
use crate::validation::validate_party;

/// Guest contact captured by staff when booking for someone else
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub document_type: String,
    pub document_number: String,
    pub document_country: String,
}

impl Default for GuestContact {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            document_type: DEFAULT_DOCUMENT_TYPE.to_string(),
            document_number: String::new(),
            document_country: DEFAULT_DOCUMENT_COUNTRY.to_string(),
        }
    }
}

impl GuestContact {
    /// Completeness check run before a staff booking is sent
    pub fn validate(&self) -> Result<(), ValidationError> {
        let incomplete = |field: &'static str, message: &str| -> Result<(), ValidationError> {
            Err(ValidationError::new(field, message).with_code(ErrorCode::GuestDetailsIncomplete))
        };
        if !self.email.contains('@') {
            return incomplete("email", "A valid guest email is required");
        }
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return incomplete("first_name", "Guest first and last name are required");
        }
        if self.phone.trim().is_empty() {
            return incomplete("phone", "Guest phone is required");
        }
        if self.document_number.trim().is_empty() {
            return incomplete("document_number", "Guest document number is required");
        }
        Ok(())
    }

    /// Payload for `POST /guests`: fields trimmed, email lowercased
    pub fn to_guest_create(&self) -> GuestCreate {
        GuestCreate {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone: self.phone.trim().to_string(),
            document_type: self.document_type.clone(),
            document_number: self.document_number.trim().to_string(),
            document_country: self.document_country.clone(),
        }
    }
}

/// Party and requests for the selected room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDraft {
    pub adults_count: u32,
    pub children_count: u32,
    pub special_requests: String,
    pub contact: GuestContact,
}

impl Default for ReservationDraft {
    fn default() -> Self {
        Self {
            adults_count: 2,
            children_count: 0,
            special_requests: String::new(),
            contact: GuestContact::default(),
        }
    }
}

impl ReservationDraft {
    pub fn validate_party(&self, capacity: u32) -> Result<(), ValidationError> {
        validate_party(self.adults_count, self.children_count, capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> GuestContact {
        GuestContact {
            first_name: " Ana ".into(),
            last_name: "López".into(),
            email: " Ana@Example.COM ".into(),
            phone: "+502 5555 0101".into(),
            document_number: " P123 ".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_contact_defaults() {
        let c = GuestContact::default();
        assert_eq!(c.document_type, "passport");
        assert_eq!(c.document_country, "GT");
    }

    #[test]
    fn test_contact_validation_order() {
        assert!(complete().validate().is_ok());

        let mut c = complete();
        c.email = "ana.example.com".into();
        assert_eq!(c.validate().unwrap_err().field, "email");

        let mut c = complete();
        c.last_name = "  ".into();
        assert_eq!(c.validate().unwrap_err().field, "first_name");

        let mut c = complete();
        c.phone.clear();
        assert_eq!(c.validate().unwrap_err().field, "phone");

        let mut c = complete();
        c.document_number.clear();
        let err = c.validate().unwrap_err();
        assert_eq!(err.field, "document_number");
        assert_eq!(err.code, ErrorCode::GuestDetailsIncomplete);
    }

    #[test]
    fn test_guest_payload_is_normalised() {
        let payload = complete().to_guest_create();
        assert_eq!(payload.first_name, "Ana");
        assert_eq!(payload.email, "ana@example.com");
        assert_eq!(payload.document_number, "P123");
        assert_eq!(payload.document_type, "passport");
    }
}
