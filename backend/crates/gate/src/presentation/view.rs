//! Login page markup

/// Notice shown after the gate bounced a page request
pub const SESSION_EXPIRED_NOTICE: &str = "Your session has expired. Please sign in again.";
/// Notice shown after a rejected login
pub const INVALID_LOGIN_NOTICE: &str = "Invalid user id or password.";

/// Render the login page
///
/// `action` is the form target; `notice` is a fixed server-side message.
pub fn login_page(action: &str, notice: Option<&str>) -> String {
    let notice = notice
        .map(|n| format!(r#"<p class="notice">{n}</p>"#))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Sign in</title></head>
<body>
{notice}
<form method="post" action="{action}">
<label>User ID <input name="user_id" autocomplete="username"></label>
<label>Password <input name="password" type="password" autocomplete="current-password"></label>
<button type="submit">Sign in</button>
</form>
</body>
</html>
"#
    )
}
