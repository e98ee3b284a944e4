//! Server-side HTML rendering
//!
//! Every page shares one layout; dynamic values always pass through
//! [`escape_html`] before they reach the markup.

mod home;
mod students;

pub use home::home_page;
pub use students::{detail_page, form_page, list_page, FormMode};

use hyper::StatusCode;

const STYLE: &str = r"
        * { box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif;
            line-height: 1.6;
            margin: 0;
            background: #f4f5fb;
            color: #222;
        }
        header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); padding: 16px 32px; }
        header a { color: white; text-decoration: none; font-weight: 700; margin-right: 24px; }
        main { max-width: 760px; margin: 32px auto; background: white; padding: 32px; border-radius: 12px; }
        table { width: 100%; border-collapse: collapse; }
        th, td { text-align: left; padding: 8px; border-bottom: 1px solid #e3e3ef; }
        label { display: block; margin-top: 12px; font-weight: 600; }
        input, select { width: 100%; padding: 8px; margin-top: 4px; }
        button, .button { margin-top: 16px; padding: 8px 16px; background: #667eea; color: white; border: none; border-radius: 6px; text-decoration: none; display: inline-block; }
        .errors { background: #fdecea; color: #8a1c1c; padding: 12px 16px; border-radius: 6px; }
        .muted { color: #777; }
";

/// Escape text for safe inclusion in HTML content and attribute values
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap page content in the shared document layout
fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} - Study List</title>
    <style>{STYLE}</style>
</head>
<body>
    <header>
        <a href="/">Study List</a>
        <a href="/students">Students</a>
        <a href="/students/add">Add student</a>
    </header>
    <main>
{content}
    </main>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

/// Generic error page for 4xx/5xx responses
pub fn error_page(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let content = format!(
        r#"        <h1>{code} {reason}</h1>
        <p>{message}</p>
        <a class="button" href="/students">Back to students</a>"#,
        code = status.as_u16(),
        message = escape_html(message),
    );
    layout(reason, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_error_page() {
        let html = error_page(StatusCode::NOT_FOUND, "Student <x> does not exist.");
        assert!(html.contains("<h1>404 Not Found</h1>"));
        assert!(html.contains("Student &lt;x&gt; does not exist."));
    }
}
