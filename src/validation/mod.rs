use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

use crate::routes::tasks::model::{TaskPriority, TaskStatus};

// Per-field error accumulation: every rule runs, nothing fails fast,
// so a form can show all violations at once.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    fn collect<T>(&mut self, field: &'static str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.0.insert(field, message);
                None
            }
        }
    }
}

impl IntoResponse for ValidationErrors {
    fn into_response(self) -> Response {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "errors": self.0 })),
        )
            .into_response()
    }
}

// RAW PAYLOADS
//
// Missing keys become empty/None here so they surface as field errors
// below instead of a deserialization rejection.

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "fullName")]
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskPayload {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_priority")]
    pub priority: String,
    pub due_date: Option<NaiveDate>,
}

fn default_status() -> String {
    "pending".to_string()
}

fn default_priority() -> String {
    "medium".to_string()
}

#[derive(Debug, Deserialize)]
pub struct TaskUpdatePayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct ProfilePayload {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

// NORMALIZED SHAPES

#[derive(Debug, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct TaskUpdateInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ProfileInput {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

// FIELD RULES
//
// Each rule is independent and reusable; trimming always happens before
// the length and emptiness checks, so whitespace-only input reads as empty.

pub fn validate_email(raw: &str) -> Result<String, String> {
    let email = raw.trim();
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    if !is_valid_email(email) {
        return Err("Please enter a valid email address".to_string());
    }
    if email.chars().count() > 255 {
        return Err("Email must be less than 255 characters".to_string());
    }
    Ok(email.to_string())
}

// Syntax-only check in the spirit of RFC 5322: one local part, one domain
// with at least one dot, no whitespace anywhere. Deliverability is the
// mail server's problem.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }
    true
}

pub fn validate_password(raw: &str) -> Result<String, String> {
    // Passwords are taken verbatim, leading/trailing whitespace included.
    let len = raw.chars().count();
    if len < 6 {
        return Err("Password must be at least 6 characters".to_string());
    }
    if len > 72 {
        return Err("Password must be less than 72 characters".to_string());
    }
    Ok(raw.to_string())
}

pub fn validate_full_name(raw: &str) -> Result<String, String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("Full name is required".to_string());
    }
    if name.chars().count() > 100 {
        return Err("Full name must be less than 100 characters".to_string());
    }
    Ok(name.to_string())
}

pub fn validate_title(raw: &str) -> Result<String, String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err("Title is required".to_string());
    }
    if title.chars().count() > 200 {
        return Err("Title must be less than 200 characters".to_string());
    }
    Ok(title.to_string())
}

pub fn validate_description(raw: &str) -> Result<Option<String>, String> {
    let description = raw.trim();
    if description.chars().count() > 2000 {
        return Err("Description must be less than 2000 characters".to_string());
    }
    if description.is_empty() {
        return Ok(None);
    }
    Ok(Some(description.to_string()))
}

pub fn validate_status(raw: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse(raw)
        .ok_or_else(|| "Status must be one of: pending, in_progress, completed".to_string())
}

pub fn validate_priority(raw: &str) -> Result<TaskPriority, String> {
    TaskPriority::parse(raw).ok_or_else(|| "Priority must be one of: low, medium, high".to_string())
}

pub fn validate_avatar_url(raw: &str) -> Result<Option<String>, String> {
    // Empty string is explicitly the same as absent.
    if raw.is_empty() {
        return Ok(None);
    }
    match Url::parse(raw) {
        Ok(_) => Ok(Some(raw.to_string())),
        Err(_) => Err("Please enter a valid URL".to_string()),
    }
}

// SHAPE VALIDATORS

pub fn validate_login(raw: &LoginPayload) -> Result<LoginInput, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let email = errors.collect("email", validate_email(&raw.email));
    let password = errors.collect("password", validate_password(&raw.password));

    match (email, password) {
        (Some(email), Some(password)) => Ok(LoginInput { email, password }),
        _ => Err(errors),
    }
}

pub fn validate_registration(raw: &RegisterPayload) -> Result<RegisterInput, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let email = errors.collect("email", validate_email(&raw.email));
    let password = errors.collect("password", validate_password(&raw.password));
    let full_name = errors.collect("fullName", validate_full_name(&raw.full_name));

    match (email, password, full_name) {
        (Some(email), Some(password), Some(full_name)) => Ok(RegisterInput {
            email,
            password,
            full_name,
        }),
        _ => Err(errors),
    }
}

pub fn validate_task(raw: &TaskPayload) -> Result<TaskInput, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let title = errors.collect("title", validate_title(&raw.title));
    let description = match raw.description.as_deref() {
        Some(d) => errors.collect("description", validate_description(d)).flatten(),
        None => None,
    };
    let status = errors.collect("status", validate_status(&raw.status));
    let priority = errors.collect("priority", validate_priority(&raw.priority));

    match (title, status, priority) {
        (Some(title), Some(status), Some(priority)) if errors.is_empty() => Ok(TaskInput {
            title,
            description,
            status,
            priority,
            due_date: raw.due_date,
        }),
        _ => Err(errors),
    }
}

pub fn validate_task_update(raw: &TaskUpdatePayload) -> Result<TaskUpdateInput, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let title = match raw.title.as_deref() {
        Some(t) => errors.collect("title", validate_title(t)),
        None => None,
    };
    let description = match raw.description.as_deref() {
        Some(d) => errors.collect("description", validate_description(d)).flatten(),
        None => None,
    };
    let status = match raw.status.as_deref() {
        Some(s) => errors.collect("status", validate_status(s)),
        None => None,
    };
    let priority = match raw.priority.as_deref() {
        Some(p) => errors.collect("priority", validate_priority(p)),
        None => None,
    };

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(TaskUpdateInput {
        title,
        description,
        status,
        priority,
        due_date: raw.due_date,
    })
}

pub fn validate_profile(raw: &ProfilePayload) -> Result<ProfileInput, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let full_name = match raw.full_name.as_deref() {
        Some(n) => errors.collect("full_name", validate_full_name(n)),
        None => None,
    };
    let avatar_url = match raw.avatar_url.as_deref() {
        Some(u) => errors.collect("avatar_url", validate_avatar_url(u)).flatten(),
        None => None,
    };

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(ProfileInput {
        full_name,
        avatar_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(email: &str, password: &str) -> LoginPayload {
        LoginPayload {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn task(title: &str, status: &str, priority: &str) -> TaskPayload {
        TaskPayload {
            title: title.to_string(),
            description: None,
            status: status.to_string(),
            priority: priority.to_string(),
            due_date: None,
        }
    }

    #[test]
    fn whitespace_only_email_is_treated_as_empty() {
        for blank in ["", " ", "   ", "\t", "\n \t"] {
            let err = validate_login(&login(blank, "abc123")).unwrap_err();
            assert_eq!(err.field("email"), Some("Email is required"), "input {blank:?}");
        }
    }

    #[test]
    fn valid_login_returns_trimmed_email_unchanged_in_content() {
        let input = validate_login(&login("  ana@example.com ", "hunter2")).unwrap();
        assert_eq!(input.email, "ana@example.com");
        assert_eq!(input.password, "hunter2");
    }

    #[test]
    fn password_bounds_are_enforced_without_trimming() {
        // 6 chars of whitespace is a legal password.
        assert!(validate_password("      ").is_ok());
        assert!(validate_password("12345").is_err());
        assert!(validate_password(&"x".repeat(72)).is_ok());
        assert!(validate_password(&"x".repeat(73)).is_err());
    }

    #[test]
    fn email_syntax_rejects_malformed_addresses() {
        for bad in ["plain", "@nope.com", "a@", "a@b", "a b@c.com", "a@b@c.com", "a@.com", "a@com."] {
            assert!(validate_email(bad).is_err(), "accepted {bad:?}");
        }
        assert!(validate_email("first.last@sub.domain.org").is_ok());
    }

    #[test]
    fn overlong_email_is_rejected() {
        let email = format!("{}@example.com", "a".repeat(250));
        let err = validate_login(&login(&email, "abc123")).unwrap_err();
        assert_eq!(err.field("email"), Some("Email must be less than 255 characters"));
    }

    #[test]
    fn login_accumulates_errors_on_every_field() {
        let err = validate_login(&login("", "abc")).unwrap_err();
        assert!(err.field("email").is_some());
        assert!(err.field("password").is_some());
    }

    #[test]
    fn registration_requires_full_name() {
        let err = validate_registration(&RegisterPayload {
            email: "ana@example.com".to_string(),
            password: "hunter2".to_string(),
            full_name: "   ".to_string(),
        })
        .unwrap_err();
        assert_eq!(err.field("fullName"), Some("Full name is required"));
    }

    #[test]
    fn task_rejects_any_status_outside_the_closed_set() {
        for bad in ["done", "PENDING", "in-progress", "", "Completed", "archived"] {
            let err = validate_task(&task("Buy milk", bad, "low")).unwrap_err();
            assert!(err.field("status").is_some(), "accepted status {bad:?}");
        }
    }

    #[test]
    fn task_rejects_any_priority_outside_the_closed_set() {
        for bad in ["urgent", "LOW", "", "critical"] {
            let err = validate_task(&task("Buy milk", "pending", bad)).unwrap_err();
            assert!(err.field("priority").is_some(), "accepted priority {bad:?}");
        }
    }

    #[test]
    fn minimal_task_succeeds_with_description_and_due_date_absent() {
        let input = validate_task(&task("Buy milk", "pending", "low")).unwrap();
        assert_eq!(
            input,
            TaskInput {
                title: "Buy milk".to_string(),
                description: None,
                status: TaskStatus::Pending,
                priority: TaskPriority::Low,
                due_date: None,
            }
        );
    }

    #[test]
    fn task_defaults_status_and_priority_when_absent_from_the_payload() {
        let payload: TaskPayload = serde_json::from_str(r#"{"title": "Buy milk"}"#).unwrap();
        let input = validate_task(&payload).unwrap();
        assert_eq!(input.status, TaskStatus::Pending);
        assert_eq!(input.priority, TaskPriority::Medium);
    }

    #[test]
    fn task_title_is_trimmed_and_bounded() {
        let input = validate_task(&task("  Buy milk  ", "pending", "low")).unwrap();
        assert_eq!(input.title, "Buy milk");

        let err = validate_task(&task(&"t".repeat(201), "pending", "low")).unwrap_err();
        assert_eq!(err.field("title"), Some("Title must be less than 200 characters"));
    }

    #[test]
    fn empty_description_normalizes_to_absent() {
        let payload = TaskPayload {
            description: Some("   ".to_string()),
            ..task("Buy milk", "pending", "low")
        };
        assert_eq!(validate_task(&payload).unwrap().description, None);
    }

    #[test]
    fn overlong_description_is_rejected() {
        let payload = TaskPayload {
            description: Some("d".repeat(2001)),
            ..task("Buy milk", "pending", "low")
        };
        let err = validate_task(&payload).unwrap_err();
        assert!(err.field("description").is_some());
    }

    #[test]
    fn task_update_accepts_an_empty_patch() {
        let patch = validate_task_update(&TaskUpdatePayload {
            title: None,
            description: None,
            status: None,
            priority: None,
            due_date: None,
        })
        .unwrap();
        assert_eq!(patch.title, None);
        assert_eq!(patch.status, None);
    }

    #[test]
    fn task_update_validates_present_fields_with_the_creation_rules() {
        let err = validate_task_update(&TaskUpdatePayload {
            title: Some("   ".to_string()),
            description: None,
            status: Some("done".to_string()),
            priority: None,
            due_date: None,
        })
        .unwrap_err();
        assert_eq!(err.field("title"), Some("Title is required"));
        assert!(err.field("status").is_some());
    }

    #[test]
    fn profile_accepts_empty_avatar_url_as_absent() {
        let input = validate_profile(&ProfilePayload {
            full_name: Some("Ana Lima".to_string()),
            avatar_url: Some("".to_string()),
        })
        .unwrap();
        assert_eq!(input.full_name.as_deref(), Some("Ana Lima"));
        assert_eq!(input.avatar_url, None);
    }

    #[test]
    fn profile_rejects_malformed_avatar_url() {
        let err = validate_profile(&ProfilePayload {
            full_name: None,
            avatar_url: Some("not a url".to_string()),
        })
        .unwrap_err();
        assert_eq!(err.field("avatar_url"), Some("Please enter a valid URL"));
    }

    #[test]
    fn profile_with_everything_absent_is_valid() {
        let input = validate_profile(&ProfilePayload {
            full_name: None,
            avatar_url: None,
        })
        .unwrap();
        assert_eq!(input, ProfileInput { full_name: None, avatar_url: None });
    }
}
