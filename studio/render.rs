/// Page renderer for the studio.
///
/// The whole UI is one HTML template (`studio/assets/studio.html`) with
/// `{{TOKEN}}` placeholders. The template is embedded at compile time;
/// `render_page` resolves the global tokens and lets the caller fill the rest.
/// Tokens nobody filled are blanked so raw `{{TOKEN}}` never reaches the browser.

const TEMPLATE: &str = include_str!("assets/studio.html");

/// Seconds between automatic reloads while a prediction is in flight.
const REFRESH_SECS: u32 = 1;

pub fn render_page<F>(predicting: bool, fill: F) -> String
where
    F: FnOnce(String) -> String,
{
    let mut html = TEMPLATE.to_owned();

    let refresh = if predicting {
        format!(r#"<meta http-equiv="refresh" content="{}">"#, REFRESH_SECS)
    } else {
        String::new()
    };
    html = html.replace("{{HEAD_REFRESH}}", &refresh);

    html = fill(html);

    blank_remaining(html)
}

fn blank_remaining(mut html: String) -> String {
    while let Some(start) = html.find("{{") {
        if let Some(end) = html[start..].find("}}") {
            let abs_end = start + end + 2;
            html.replace_range(start..abs_end, "");
        } else {
            break;
        }
    }
    html
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
}
