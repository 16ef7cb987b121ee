use kanban_actions::{describe_field_errors, ActionState, FieldErrors};
use serde::Serialize;

#[derive(Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    pub api_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
}

#[derive(Serialize)]
pub struct ListResponse<T: Serialize> {
    pub items: Vec<T>,
    pub count: usize,
}

fn to_json<T: Serialize>(response: &CliResponse<T>) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"api_version":"{}","error":"{}"}}"#,
            env!("CARGO_PKG_VERSION"),
            e
        )
    })
}

pub fn output_success<T: Serialize>(data: T) {
    let response = CliResponse {
        success: true,
        api_version: env!("CARGO_PKG_VERSION"),
        data: Some(data),
        error: None,
        field_errors: None,
    };
    println!("{}", to_json(&response));
}

pub fn output_list<T: Serialize>(items: Vec<T>) {
    let count = items.len();
    let list = ListResponse { items, count };
    output_success(list);
}

/// Prints the error to stderr and exits with code 1.
pub fn output_error(message: &str) -> ! {
    output_failure(message.to_string(), None)
}

fn output_failure(error: String, field_errors: Option<FieldErrors>) -> ! {
    let response: CliResponse<()> = CliResponse {
        success: false,
        api_version: env!("CARGO_PKG_VERSION"),
        data: None,
        error: Some(error),
        field_errors,
    };
    eprintln!("{}", to_json(&response));
    std::process::exit(1);
}

/// Like `output_error`, but keeps the data that was computed before the
/// failure.
pub fn output_error_with<T: Serialize>(message: &str, data: T) -> ! {
    let response = CliResponse {
        success: false,
        api_version: env!("CARGO_PKG_VERSION"),
        data: Some(data),
        error: Some(message.to_string()),
        field_errors: None,
    };
    eprintln!("{}", to_json(&response));
    std::process::exit(1);
}

/// Prints an action's data, or its error and exits.
pub fn output_action<T: Serialize>(state: ActionState<T>) {
    match state {
        ActionState {
            data: Some(data), ..
        } => output_success(data),
        ActionState {
            error: Some(error), ..
        } => output_failure(error, None),
        ActionState {
            field_errors: Some(fields),
            ..
        } => output_failure(describe_field_errors(&fields), Some(fields)),
        _ => output_error("Action returned no result"),
    }
}
