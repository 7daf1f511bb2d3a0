//! Session and password endpoints

use std::io;

use serde_json::json;

use super::{FORGOT_PASSWORD, LOGOUT, REFRESH, RESET_PASSWORD, TEST_EMAIL, expect_fields};
use crate::client::{ApiClient, Method, RequestOptions};
use crate::report::Reporter;

pub async fn logout(client: &ApiClient, report: &mut Reporter) -> io::Result<()> {
    let options = RequestOptions::new().json(json!({}));

    expect_fields(client, report, Method::POST, LOGOUT, options, 200, &["message"]).await
}

pub async fn refresh_token(client: &ApiClient, report: &mut Reporter) -> io::Result<()> {
    let options = RequestOptions::new().json(json!({ "refreshToken": "sample-refresh-token" }));

    expect_fields(
        client,
        report,
        Method::POST,
        REFRESH,
        options,
        200,
        &["accessToken", "refreshToken"],
    )
    .await
}

pub async fn forgot_password(client: &ApiClient, report: &mut Reporter) -> io::Result<()> {
    let options = RequestOptions::new().json(json!({ "email": TEST_EMAIL }));

    expect_fields(client, report, Method::POST, FORGOT_PASSWORD, options, 200, &["message"]).await
}

pub async fn reset_password(client: &ApiClient, report: &mut Reporter) -> io::Result<()> {
    let options = RequestOptions::new().json(json!({
        "token": "reset-token-123",
        "newPassword": "newpassword123",
    }));

    expect_fields(client, report, Method::POST, RESET_PASSWORD, options, 200, &["message"]).await
}
