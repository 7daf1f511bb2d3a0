//! The fixed list of test cases run against the target
//!
//! Each case prints nothing but its own assertions; the heading is written by
//! the harness before the case starts.

pub mod account;
pub mod login;
pub mod me;
pub mod signup;

use std::io;

use serde_json::{Map, Value};

use crate::client::{ApiClient, ApiResponse, Method, RequestOptions};
use crate::report::Reporter;

pub const SIGNUP: &str = "/auth/signup";
pub const LOGIN: &str = "/auth/login";
pub const ME: &str = "/auth/me";
pub const LOGOUT: &str = "/auth/logout";
pub const REFRESH: &str = "/auth/refresh";
pub const FORGOT_PASSWORD: &str = "/auth/forgot-password";
pub const RESET_PASSWORD: &str = "/auth/reset-password";

/// Account that login and password-reset cases use
pub const TEST_EMAIL: &str = "test@example.com";
pub const TEST_PASSWORD: &str = "password123";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    SignupSuccess,
    SignupInvalidEmail,
    SignupShortPassword,
    SignupMissingFields,
    LoginSuccess,
    LoginInvalidCredentials,
    LoginValidationErrors,
    MeWithToken,
    MeWithoutToken,
    MeInvalidToken,
    Logout,
    RefreshToken,
    ForgotPassword,
    ResetPassword,
}

impl Case {
    /// Run order: signup, login, authenticated endpoints, then session and misc
    pub const ALL: [Case; 14] = [
        Case::SignupSuccess,
        Case::SignupInvalidEmail,
        Case::SignupShortPassword,
        Case::SignupMissingFields,
        Case::LoginSuccess,
        Case::LoginInvalidCredentials,
        Case::LoginValidationErrors,
        Case::MeWithToken,
        Case::MeWithoutToken,
        Case::MeInvalidToken,
        Case::Logout,
        Case::RefreshToken,
        Case::ForgotPassword,
        Case::ResetPassword,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Case::SignupSuccess => "TEST: Signup - Success",
            Case::SignupInvalidEmail => "TEST: Signup - Invalid Email",
            Case::SignupShortPassword => "TEST: Signup - Short Password",
            Case::SignupMissingFields => "TEST: Signup - Missing Fields",
            Case::LoginSuccess => "TEST: Login - Success",
            Case::LoginInvalidCredentials => "TEST: Login - Invalid Credentials",
            Case::LoginValidationErrors => "TEST: Login - Validation Errors",
            Case::MeWithToken => "TEST: Get Me - With Valid Token",
            Case::MeWithoutToken => "TEST: Get Me - Without Token",
            Case::MeInvalidToken => "TEST: Get Me - Invalid Token",
            Case::Logout => "TEST: Logout",
            Case::RefreshToken => "TEST: Refresh Token",
            Case::ForgotPassword => "TEST: Forgot Password",
            Case::ResetPassword => "TEST: Reset Password",
        }
    }

    /// Whether the case consumes the token produced by [`Case::LoginSuccess`]
    pub fn needs_token(&self) -> bool {
        matches!(self, Case::MeWithToken)
    }
}

/// Echo a JSON body when the response has one; never counted
pub(crate) fn echo_body(report: &mut Reporter, response: &ApiResponse) -> io::Result<()> {
    if let Some(value) = response.json() {
        report.json(value)?;
    }
    Ok(())
}

/// Echo the body and hand back its JSON object.
///
/// A body that is not a JSON object is one failure; the caller then skips
/// its field assertions.
pub(crate) fn body_object<'a>(
    report: &mut Reporter,
    response: &'a ApiResponse,
) -> io::Result<Option<&'a Map<String, Value>>> {
    match response.object() {
        Some(object) => {
            echo_body(report, response)?;
            Ok(Some(object))
        }
        None => {
            report.fail("Response body is not a JSON object")?;
            report.info(format!("Response: {}", response.text()))?;
            Ok(None)
        }
    }
}

/// Request whose only check is the status code
pub(crate) async fn expect_status(
    client: &ApiClient,
    report: &mut Reporter,
    method: Method,
    path: &str,
    options: RequestOptions,
    expected: u16,
) -> io::Result<()> {
    let Some(response) = client.make_request(report, method, path, options).await? else {
        return Ok(());
    };

    report.assert_status(&response, expected)?;
    echo_body(report, &response)
}

/// Request checked for a status code and the presence of top-level fields
pub(crate) async fn expect_fields(
    client: &ApiClient,
    report: &mut Reporter,
    method: Method,
    path: &str,
    options: RequestOptions,
    expected: u16,
    fields: &[&str],
) -> io::Result<()> {
    let Some(response) = client.make_request(report, method, path, options).await? else {
        return Ok(());
    };

    report.assert_status(&response, expected)?;

    let Some(data) = body_object(report, &response)? else {
        return Ok(());
    };

    for field in fields {
        report.assert_has_field(data, field)?;
    }
    Ok(())
}
