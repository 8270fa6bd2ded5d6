//! Authentication handlers

use crate::error::ApiResult;
use crate::AppState;
use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::IntoResponse,
    Json,
};
use cardswap_core::{CardswapError, Credentials, MessageResponse};
use tracing::info;

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> ApiResult<impl IntoResponse> {
    info!("Login attempt for: {}", req.user_name);

    let outcome = state.accounts.login(&req.user_name, &req.password).await?;
    let user = outcome.user().ok_or(CardswapError::Unauthorized)?;

    info!("Login successful for: {} (id {})", user.name, user.id);
    let cookie = session_cookie(&req.user_name)?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::new(format!(
            "Logged in as {}",
            req.user_name
        ))),
    ))
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> ApiResult<Json<MessageResponse>> {
    info!("Registration attempt for: {}", req.user_name);

    state
        .accounts
        .register(&req.user_name, &req.password)
        .await?;

    Ok(Json(MessageResponse::new("User registered successfully")))
}

/// Plain marker cookie carrying the user name. Not signed, no expiry.
fn session_cookie(user_name: &str) -> Result<HeaderValue, CardswapError> {
    let value = format!("user_name={}; Path=/; SameSite=Lax", cookie_value(user_name));
    HeaderValue::from_str(&value)
        .map_err(|e| CardswapError::InvalidInput(format!("Bad cookie value: {}", e)))
}

/// Sends the name as-is when every byte is a cookie-octet. Anything else
/// goes out as a quoted string with `"` and `\` backslash-escaped and bytes
/// outside printable ASCII written as `\ooo` octal, the form Python's
/// `http.cookies` produces and parses.
fn cookie_value(raw: &str) -> String {
    if !raw.is_empty() && raw.bytes().all(is_cookie_octet) {
        return raw.to_string();
    }

    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push('"');
    for b in raw.bytes() {
        match b {
            b'"' | b'\\' => {
                quoted.push('\\');
                quoted.push(b as char);
            }
            0x20..=0x7E => quoted.push(b as char),
            _ => quoted.push_str(&format!("\\{:03o}", b)),
        }
    }
    quoted.push('"');
    quoted
}

// RFC 6265 cookie-octet
fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}
