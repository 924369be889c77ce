//! Общие проверки полей форм

pub const MIN_STARS: u8 = 1;
pub const MAX_STARS: u8 = 5;

pub fn require_non_empty(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} must not be empty", field));
    }
    Ok(())
}

/// Грубая проверка адреса: непустые части до и после `@`, точка в домене
pub fn require_email(value: &str) -> Result<(), String> {
    let value = value.trim();
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(format!("Invalid email: {}", value));
    }
    Ok(())
}

/// Оценка в звёздах, допустимы значения 1..=5
pub fn require_stars(value: i64) -> Result<u8, String> {
    if value < MIN_STARS as i64 || value > MAX_STARS as i64 {
        return Err(format!(
            "Rating must be between {} and {}, got {}",
            MIN_STARS, MAX_STARS, value
        ));
    }
    Ok(value as u8)
}
