//! Small helpers shared by the client and the portal

/// Today's date in local time
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Trim a string and turn blanks into `None`
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
