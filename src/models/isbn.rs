//! ISBN-10 / ISBN-13 normalization and check-digit validation.

use thiserror::Error;
use validator::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsbnError {
    #[error("ISBN must have 10 or 13 characters after removing separators")]
    InvalidLength,
    #[error("ISBN contains invalid characters")]
    InvalidFormat,
    #[error("ISBN-13 must start with 978 or 979")]
    InvalidPrefix,
    #[error("ISBN check digit does not match")]
    InvalidChecksum,
}

/// Strip hyphens and spaces, upper-case a trailing `x`.
pub fn compact(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| *c != '-' && *c != ' ')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Validate an ISBN and return its compact form.
pub fn normalize(raw: &str) -> Result<String, IsbnError> {
    let isbn = compact(raw);
    match isbn.len() {
        10 => check_isbn10(&isbn)?,
        13 => check_isbn13(&isbn)?,
        _ => return Err(IsbnError::InvalidLength),
    }
    Ok(isbn)
}

fn check_isbn10(isbn: &str) -> Result<(), IsbnError> {
    let mut sum = 0u32;
    for (i, c) in isbn.chars().enumerate() {
        let value = match c {
            'X' if i == 9 => 10,
            _ => c.to_digit(10).ok_or(IsbnError::InvalidFormat)?,
        };
        sum += value * (10 - i as u32);
    }
    if sum % 11 != 0 {
        return Err(IsbnError::InvalidChecksum);
    }
    Ok(())
}

fn check_isbn13(isbn: &str) -> Result<(), IsbnError> {
    let digits = isbn
        .chars()
        .map(|c| c.to_digit(10).ok_or(IsbnError::InvalidFormat))
        .collect::<Result<Vec<_>, _>>()?;
    if !(isbn.starts_with("978") || isbn.starts_with("979")) {
        return Err(IsbnError::InvalidPrefix);
    }
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
        .sum();
    if sum % 10 != 0 {
        return Err(IsbnError::InvalidChecksum);
    }
    Ok(())
}

/// Compute the ISBN-13 check digit for a 12 digit prefix.
pub fn isbn13_check_digit(first_twelve: &[u32; 12]) -> u32 {
    let sum: u32 = first_twelve
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
        .sum();
    (10 - sum % 10) % 10
}

/// `validator` hook for request fields.
pub fn validate_isbn(value: &str) -> Result<(), ValidationError> {
    normalize(value).map(|_| ()).map_err(|e| {
        let mut error = ValidationError::new("isbn");
        error.message = Some(e.to_string().into());
        error
    })
}
