//! Error type shared by all Jet crates

use axum::{Json, http::StatusCode, response::IntoResponse};

use crate::types::ErrorResponse;

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	/// Missing authentication, staff flag or permission. Never carries detail.
	PermissionDenied,
	/// Missing or invalid credentials
	Unauthorized,
	DbError,
	Parse,
	/// Malformed input or an unresolvable model
	ValidationError(String),
	/// A model or registry definition is inconsistent. Indicates a programming error.
	ConfigError(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::Unauthorized => write!(f, "unauthorized"),
			Error::DbError => write!(f, "database error"),
			Error::Parse => write!(f, "parse error"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "I/O error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let (status, code, message) = match self {
			Error::NotFound => (StatusCode::NOT_FOUND, "E-CORE-NOTFOUND", "Not found".to_string()),
			Error::PermissionDenied => {
				(StatusCode::FORBIDDEN, "E-AUTH-NOPERM", "Permission denied".to_string())
			}
			Error::Unauthorized => {
				(StatusCode::UNAUTHORIZED, "E-AUTH-UNAUTH", "Unauthorized".to_string())
			}
			Error::ValidationError(msg) => (StatusCode::BAD_REQUEST, "E-VALIDATION", msg),
			Error::Parse => (StatusCode::BAD_REQUEST, "E-CORE-PARSE", "Parse error".to_string()),
			Error::ConfigError(msg) => {
				tracing::error!("Configuration error: {}", msg);
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					"E-CORE-CONFIG",
					"Server misconfiguration".to_string(),
				)
			}
			Error::DbError | Error::Internal(_) | Error::Io(_) => (
				StatusCode::INTERNAL_SERVER_ERROR,
				"E-CORE-INTERNAL",
				"Internal server error".to_string(),
			),
		};
		(status, Json(ErrorResponse::new(code.to_string(), message))).into_response()
	}
}


// vim: ts=4
