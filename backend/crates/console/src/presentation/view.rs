//! Page shells
//!
//! Templates are rendered client-side; the server only names the view.

pub const INDEX: &str = "index";
pub const CAMERA_LIST: &str = "camera/list";
pub const TRADE_RECORD: &str = "bill/tradeRecord";

pub fn render(view: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{view}</title></head>
<body data-view="{view}"></body>
</html>
"#
    )
}
