//! Form validation
//!
//! Every check runs before any network call and reports the offending field.

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use shared::client::LoginRequest;
use shared::error::ErrorCode;
use shared::models::{IncidentCreate, RoomInput, SearchCriteria};
use std::sync::LazyLock;

use crate::ValidationError;

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 50;
pub const INCIDENT_TITLE_MIN_LENGTH: usize = 5;
pub const INCIDENT_DESCRIPTION_MIN_LENGTH: usize = 10;
/// Guests a single room may be configured for
pub const ROOM_CAPACITY_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());
static PHONE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s\-()]+$").ok());
static NAME_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ\s]+$").ok());

fn matches(pattern: &LazyLock<Option<Regex>>, value: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(value))
}

type Check = Result<(), ValidationError>;

pub fn validate_email(email: &str) -> Check {
    if email.trim().is_empty() {
        return Err(ValidationError::new("email", "Email is required").with_code(ErrorCode::RequiredField));
    }
    if !matches(&EMAIL_PATTERN, email.trim()) {
        return Err(ValidationError::new("email", "Invalid email").with_code(ErrorCode::InvalidFormat));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Check {
    if phone.trim().is_empty() {
        return Err(ValidationError::new("phone", "Phone is required").with_code(ErrorCode::RequiredField));
    }
    if !matches(&PHONE_PATTERN, phone.trim()) {
        return Err(ValidationError::new("phone", "Invalid phone format").with_code(ErrorCode::InvalidFormat));
    }
    Ok(())
}

/// Names: 2 to 50 letters (accented Spanish letters included) and spaces
pub fn validate_name(name: &str, field: &'static str, label: &str) -> Check {
    if name.is_empty() {
        return Err(ValidationError::new(field, format!("{} is required", label))
            .with_code(ErrorCode::RequiredField));
    }
    let len = name.chars().count();
    if len < NAME_MIN_LENGTH {
        return Err(ValidationError::new(
            field,
            format!("{} must be at least {} characters", label, NAME_MIN_LENGTH),
        ));
    }
    if len > NAME_MAX_LENGTH {
        return Err(ValidationError::new(
            field,
            format!("{} cannot exceed {} characters", label, NAME_MAX_LENGTH),
        ));
    }
    if !matches(&NAME_PATTERN, name) {
        return Err(ValidationError::new(field, format!("{} can only contain letters", label))
            .with_code(ErrorCode::InvalidFormat));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Check {
    let weak = |msg: String| -> Check {
        Err(ValidationError::new("password", msg).with_code(ErrorCode::PasswordTooWeak))
    };
    if password.is_empty() {
        return Err(ValidationError::new("password", "Password is required")
            .with_code(ErrorCode::RequiredField));
    }
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return weak(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN_LENGTH
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return weak("Password must contain a lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return weak("Password must contain an uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return weak("Password must contain a number".to_string());
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    /// 0 to 5
    pub score: u8,
    pub level: StrengthLevel,
}

/// One point each for: length >= 8, length >= 12, mixed case, a digit, a symbol
pub fn password_strength(password: &str) -> PasswordStrength {
    let len = password.chars().count();
    let checks = [
        len >= 8,
        len >= 12,
        password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let score = checks.iter().filter(|ok| **ok).count() as u8;
    let level = match score {
        0..=1 => StrengthLevel::Weak,
        2..=3 => StrengthLevel::Medium,
        _ => StrengthLevel::Strong,
    };
    PasswordStrength { score, level }
}

pub fn validate_login(request: &LoginRequest) -> Check {
    if request.credential.trim().is_empty() {
        return Err(ValidationError::new("credential", "Email or username is required")
            .with_code(ErrorCode::RequiredField));
    }
    if request.password.is_empty() {
        return Err(ValidationError::new("password", "Password is required")
            .with_code(ErrorCode::RequiredField));
    }
    Ok(())
}

/// Stay dates and party size of an availability search
pub fn validate_search(criteria: &SearchCriteria, today: NaiveDate) -> Check {
    if criteria.check_in_date < today {
        return Err(ValidationError::new(
            "check_in_date",
            "Check-in date cannot be earlier than today",
        )
        .with_code(ErrorCode::InvalidDateRange));
    }
    if criteria.check_out_date <= criteria.check_in_date {
        return Err(ValidationError::new(
            "check_out_date",
            "Check-out date must be after the check-in date",
        )
        .with_code(ErrorCode::InvalidDateRange));
    }
    if !SearchCriteria::CAPACITY_RANGE.contains(&criteria.capacity) {
        return Err(ValidationError::new(
            "capacity",
            format!(
                "Capacity must be between {} and {} guests",
                SearchCriteria::CAPACITY_RANGE.start(),
                SearchCriteria::CAPACITY_RANGE.end()
            ),
        )
        .with_code(ErrorCode::ValueOutOfRange));
    }
    Ok(())
}

/// Party composition against a room's capacity
pub fn validate_party(adults: u32, children: u32, capacity: u32) -> Check {
    let total = adults + children;
    if total > capacity {
        return Err(ValidationError::new(
            "children_count",
            format!(
                "Total guests ({}) exceeds room capacity ({}) by {}",
                total,
                capacity,
                total - capacity
            ),
        )
        .with_code(ErrorCode::CapacityExceeded));
    }
    if children > 0 && adults == 0 {
        return Err(ValidationError::new(
            "adults_count",
            "At least one adult is required to include children",
        )
        .with_code(ErrorCode::ChildrenWithoutAdult));
    }
    if adults == 0 {
        return Err(ValidationError::new("adults_count", "At least one adult is required")
            .with_code(ErrorCode::ValueOutOfRange));
    }
    Ok(())
}

/// Report range: the end may equal the start but not precede it
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Check {
    if end < start {
        return Err(ValidationError::new("end_date", "End date cannot be before start date")
            .with_code(ErrorCode::ReportRangeInvalid));
    }
    Ok(())
}

pub fn validate_incident(incident: &IncidentCreate) -> Check {
    if incident.title.trim().chars().count() < INCIDENT_TITLE_MIN_LENGTH {
        return Err(ValidationError::new(
            "title",
            format!("Title must be at least {} characters", INCIDENT_TITLE_MIN_LENGTH),
        )
        .with_code(ErrorCode::IncidentInvalid));
    }
    if incident.description.trim().chars().count() < INCIDENT_DESCRIPTION_MIN_LENGTH {
        return Err(ValidationError::new(
            "description",
            format!(
                "Description must be at least {} characters",
                INCIDENT_DESCRIPTION_MIN_LENGTH
            ),
        )
        .with_code(ErrorCode::IncidentInvalid));
    }
    if incident.estimated_cost.is_some_and(|c| c < Decimal::ZERO) {
        return Err(ValidationError::new(
            "estimated_cost",
            "Estimated cost must be a positive number",
        )
        .with_code(ErrorCode::IncidentInvalid));
    }
    Ok(())
}

/// Room create/update form
pub fn validate_room_input(input: &RoomInput) -> Check {
    if input.room_number.trim().is_empty() {
        return Err(ValidationError::new("room_number", "Room number is required")
            .with_code(ErrorCode::RequiredField));
    }
    if input.floor < 1 {
        return Err(ValidationError::new("floor", "Floor must be 1 or higher")
            .with_code(ErrorCode::ValueOutOfRange));
    }
    if !ROOM_CAPACITY_RANGE.contains(&input.capacity) {
        return Err(ValidationError::new(
            "capacity",
            format!(
                "Capacity must be between {} and {} guests",
                ROOM_CAPACITY_RANGE.start(),
                ROOM_CAPACITY_RANGE.end()
            ),
        )
        .with_code(ErrorCode::ValueOutOfRange));
    }
    if input.beds_count < 1 {
        return Err(ValidationError::new("beds_count", "A room needs at least one bed")
            .with_code(ErrorCode::ValueOutOfRange));
    }
    if input.base_price < Decimal::ZERO {
        return Err(ValidationError::new("base_price", "Price must be a positive number")
            .with_code(ErrorCode::ValueOutOfRange));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_email_and_phone() {
        assert!(validate_email("ana@marazul.gt").is_ok());
        assert_eq!(validate_email("ana@").unwrap_err().field, "email");
        assert_eq!(validate_email("").unwrap_err().code, ErrorCode::RequiredField);
        assert!(validate_phone("+502 (555) 123-4567").is_ok());
        assert!(validate_phone("call me").is_err());
    }

    #[test]
    fn test_names_accept_accents() {
        assert!(validate_name("José Ñúñez", "first_name", "First name").is_ok());
        assert!(validate_name("J", "first_name", "First name").is_err());
        assert!(validate_name("R2D2", "last_name", "Last name").is_err());
        assert!(validate_name(&"a".repeat(51), "last_name", "Last name").is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("Admin123!").is_ok());
        assert!(validate_password("short1A").is_err());
        assert!(validate_password("alllowercase1").is_err());
        assert!(validate_password("ALLUPPERCASE1").is_err());
        assert!(validate_password("NoDigitsHere").is_err());
    }

    #[test]
    fn test_password_strength_buckets() {
        assert_eq!(password_strength("abc").level, StrengthLevel::Weak);
        assert_eq!(password_strength("abcdefgh").score, 1);
        assert_eq!(password_strength("Abcdefg1").level, StrengthLevel::Medium);
        let strong = password_strength("Abcdefghij1!");
        assert_eq!(strong.score, 5);
        assert_eq!(strong.level, StrengthLevel::Strong);
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert_eq!(
            validate_login(&LoginRequest::new("", "x")).unwrap_err().field,
            "credential"
        );
        assert_eq!(
            validate_login(&LoginRequest::new("admin", "")).unwrap_err().field,
            "password"
        );
        assert!(validate_login(&LoginRequest::new("admin", "Admin123!")).is_ok());
    }

    #[test]
    fn test_search_rejects_checkout_not_after_checkin() {
        let today = date(2024, 1, 1);
        let same_day = SearchCriteria {
            check_in_date: date(2024, 1, 10),
            check_out_date: date(2024, 1, 10),
            capacity: 2,
        };
        let err = validate_search(&same_day, today).unwrap_err();
        assert_eq!(err.field, "check_out_date");

        let past = SearchCriteria {
            check_in_date: date(2023, 12, 31),
            check_out_date: date(2024, 1, 2),
            capacity: 2,
        };
        assert_eq!(validate_search(&past, today).unwrap_err().field, "check_in_date");
    }

    #[test]
    fn test_search_capacity_bounds() {
        let today = date(2024, 1, 1);
        let mut c = SearchCriteria {
            check_in_date: date(2024, 1, 10),
            check_out_date: date(2024, 1, 12),
            capacity: 0,
        };
        assert_eq!(validate_search(&c, today).unwrap_err().field, "capacity");
        c.capacity = 11;
        assert!(validate_search(&c, today).is_err());
        c.capacity = 10;
        assert!(validate_search(&c, today).is_ok());
    }

    #[test]
    fn test_party_rules() {
        let err = validate_party(2, 1, 2).unwrap_err();
        assert_eq!(err.code, ErrorCode::CapacityExceeded);
        assert!(err.message.contains("(3)"));
        assert!(err.message.contains("(2)"));
        assert!(err.message.ends_with("by 1"));

        let err = validate_party(0, 1, 4).unwrap_err();
        assert_eq!(err.code, ErrorCode::ChildrenWithoutAdult);

        assert!(validate_party(0, 0, 4).is_err());
        assert!(validate_party(1, 1, 2).is_ok());
    }

    #[test]
    fn test_report_range() {
        assert!(validate_date_range(date(2024, 1, 1), date(2024, 1, 1)).is_ok());
        assert!(validate_date_range(date(2024, 1, 2), date(2024, 1, 1)).is_err());
    }

    #[test]
    fn test_room_input_rules() {
        let mut input = RoomInput {
            room_number: "305".into(),
            base_price: Decimal::from(450),
            ..Default::default()
        };
        assert!(validate_room_input(&input).is_ok());

        input.capacity = 11;
        assert_eq!(validate_room_input(&input).unwrap_err().field, "capacity");
        input.capacity = 4;
        input.base_price = Decimal::from(-1);
        assert_eq!(validate_room_input(&input).unwrap_err().field, "base_price");
        input.base_price = Decimal::ZERO;
        input.room_number = "  ".into();
        assert_eq!(
            validate_room_input(&input).unwrap_err().code,
            ErrorCode::RequiredField
        );
    }

    #[test]
    fn test_incident_rules() {
        let mut incident = IncidentCreate {
            title: "Leak".into(),
            description: "Water under the sink".into(),
            ..Default::default()
        };
        assert_eq!(validate_incident(&incident).unwrap_err().field, "title");
        incident.title = "Water leak".into();
        assert!(validate_incident(&incident).is_ok());
        incident.estimated_cost = Some(Decimal::from(-5));
        assert_eq!(
            validate_incident(&incident).unwrap_err().field,
            "estimated_cost"
        );
    }
}
