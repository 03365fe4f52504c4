//! Form Validation
//!
//! Client-side checks run before anything is sent to the backend.

use crate::models::PredictionType;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const USERNAME_LEN: std::ops::RangeInclusive<usize> = 3..=30;
pub const CHART_SIZE: i32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

/// First message for `field`, if any
pub fn message_for(errors: &[FieldError], field: &str) -> Option<String> {
    errors.iter().find(|e| e.field == field).map(|e| e.message.clone())
}

pub fn validate_username(username: &str) -> Result<(), String> {
    let username = username.trim();
    if username.is_empty() {
        return Err("Username is required".into());
    }
    if !USERNAME_LEN.contains(&username.chars().count()) {
        return Err(format!(
            "Username must be {}-{} characters",
            USERNAME_LEN.start(),
            USERNAME_LEN.end()
        ));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("Username may only contain letters, numbers and underscores".into());
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required".into());
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err("Enter a valid email address".into());
    };
    let domain_ok = domain.contains('.') && domain.split('.').all(|label| !label.is_empty());
    if local.is_empty() || !domain_ok || email.chars().any(char::is_whitespace) {
        return Err("Enter a valid email address".into());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".into());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!("Password must be at least {} characters", MIN_PASSWORD_LEN));
    }
    Ok(())
}

pub fn validate_login(username: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if username.trim().is_empty() {
        errors.push(FieldError::new("username", "Username is required"));
    }
    if password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }
    errors
}

pub fn validate_registration(username: &str, email: &str, password: &str, confirm: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if let Err(msg) = validate_username(username) {
        errors.push(FieldError::new("username", msg));
    }
    if let Err(msg) = validate_email(email) {
        errors.push(FieldError::new("email", msg));
    }
    if let Err(msg) = validate_password(password) {
        errors.push(FieldError::new("password", msg));
    } else if password != confirm {
        errors.push(FieldError::new("confirm", "Passwords do not match"));
    }
    errors
}

/// Raw prediction form input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionInput {
    pub prediction_type: Option<PredictionType>,
    pub target_name: String,
    pub artist: String,
    pub position: String,
}

/// Validated prediction: trimmed names and a parsed position where the type needs one
#[derive(Debug, Clone, PartialEq)]
pub struct ValidPrediction {
    pub prediction_type: PredictionType,
    pub target_name: String,
    pub artist: String,
    pub position: Option<i32>,
}

pub fn validate_prediction(input: &PredictionInput) -> Result<ValidPrediction, Vec<FieldError>> {
    let mut errors = Vec::new();

    let target_name = input.target_name.trim().to_string();
    let artist = input.artist.trim().to_string();
    if target_name.is_empty() {
        errors.push(FieldError::new("target_name", "Song name is required"));
    }
    if artist.is_empty() {
        errors.push(FieldError::new("artist", "Artist is required"));
    }

    let Some(prediction_type) = input.prediction_type else {
        errors.push(FieldError::new("prediction_type", "Choose a prediction type"));
        return Err(errors);
    };

    let raw = input.position.trim();
    let position = match prediction_type {
        PredictionType::Exit => None,
        PredictionType::Entry => match raw.parse::<i32>() {
            Ok(p) if (1..=CHART_SIZE).contains(&p) => Some(p),
            _ => {
                errors.push(FieldError::new("position", format!("Position must be between 1 and {}", CHART_SIZE)));
                None
            }
        },
        PredictionType::PositionChange => match raw.trim_start_matches('+').parse::<i32>() {
            Ok(0) => {
                errors.push(FieldError::new("position", "A change of 0 is not a prediction"));
                None
            }
            Ok(c) if c.abs() < CHART_SIZE => Some(c),
            _ => {
                errors.push(FieldError::new(
                    "position",
                    format!("Change must be between -{} and +{}", CHART_SIZE - 1, CHART_SIZE - 1),
                ));
                None
            }
        },
    };

    if errors.is_empty() {
        Ok(ValidPrediction { prediction_type, target_name, artist, position })
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("mia_22").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"x".repeat(31)).is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("mia@example.com").is_ok());
        assert!(validate_email("  mia@example.co.uk ").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("mia.example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("mia@example").is_err());
        assert!(validate_email("mia@@example.com").is_err());
        assert!(validate_email("mia@example..com").is_err());
        assert!(validate_email("mi a@example.com").is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("longenough").is_ok());
        assert_eq!(validate_password("short").unwrap_err(), "Password must be at least 8 characters");
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_login_rejects_empty() {
        let errors = validate_login("  ", "");
        assert_eq!(errors.len(), 2);
        assert_eq!(message_for(&errors, "username").as_deref(), Some("Username is required"));
        assert!(validate_login("mia", "x").is_empty());
    }

    #[test]
    fn test_registration_confirm_mismatch() {
        let errors = validate_registration("mia", "mia@example.com", "password1", "password2");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "confirm");
        assert!(validate_registration("mia", "mia@example.com", "password1", "password1").is_empty());
    }

    #[test]
    fn test_prediction_entry_position_range() {
        let mut input = PredictionInput {
            prediction_type: Some(PredictionType::Entry),
            target_name: " Espresso ".into(),
            artist: "Sabrina Carpenter".into(),
            position: "12".into(),
        };
        let valid = validate_prediction(&input).unwrap();
        assert_eq!(valid.target_name, "Espresso");
        assert_eq!(valid.position, Some(12));

        input.position = "101".into();
        let errors = validate_prediction(&input).unwrap_err();
        assert_eq!(errors[0].field, "position");

        input.position = "abc".into();
        assert!(validate_prediction(&input).is_err());
    }

    #[test]
    fn test_prediction_change_and_exit() {
        let mut input = PredictionInput {
            prediction_type: Some(PredictionType::PositionChange),
            target_name: "Greedy".into(),
            artist: "Tate McRae".into(),
            position: "+5".into(),
        };
        assert_eq!(validate_prediction(&input).unwrap().position, Some(5));
        input.position = "-12".into();
        assert_eq!(validate_prediction(&input).unwrap().position, Some(-12));
        input.position = "0".into();
        assert!(validate_prediction(&input).is_err());

        input.prediction_type = Some(PredictionType::Exit);
        input.position = String::new();
        assert_eq!(validate_prediction(&input).unwrap().position, None);
    }

    #[test]
    fn test_prediction_requires_type_and_names() {
        let errors = validate_prediction(&PredictionInput::default()).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["target_name", "artist", "prediction_type"]);
    }
}
