//! Server-rendered call page.

use std::fmt::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::core::session::{AlertKind, Role, SessionSnapshot};
use crate::core::speech::AudioData;

const USER_COLOR: &str = "#66ccff";
const ASSISTANT_COLOR: &str = "#ff66ff";

const STYLE: &str = r#"
    body { margin: 0; min-height: 100vh; font-family: sans-serif; color: #f0e6ff;
           background: linear-gradient(135deg, #1a0033 0%, #330033 100%); }
    .container { max-width: 760px; margin: 0 auto; padding: 24px; }
    .main-title { text-align: center; color: #ff66ff; font-size: 3em; text-shadow: 2px 2px 4px rgba(0,0,0,0.5); margin-bottom: 10px; }
    .subtitle { text-align: center; color: #cc99ff; font-style: italic; margin-bottom: 30px; }
    .call-status { text-align: center; font-size: 1.5em; color: #ff66ff; margin: 20px 0; animation: pulse 2s infinite; }
    @keyframes pulse { 0%, 100% { opacity: 1; } 50% { opacity: 0.6; } }
    .message-box { background-color: rgba(51, 0, 51, 0.5); border-radius: 15px; padding: 20px; margin: 10px 0; border-left: 4px solid #ff66ff; white-space: pre-wrap; }
    .controls { display: flex; gap: 8px; justify-content: center; margin-bottom: 20px; }
    .controls form { margin: 0; }
    button { background: #330033; color: #ff66ff; border: 1px solid #ff66ff; border-radius: 8px; padding: 8px 16px; cursor: pointer; }
    .info { background: rgba(102, 204, 255, 0.15); border-radius: 8px; padding: 12px; }
    .alert { background: rgba(255, 80, 80, 0.2); border: 1px solid #ff5050; border-radius: 8px; padding: 12px; margin: 10px 0; }
    .chat-input { display: flex; gap: 8px; margin-top: 20px; }
    .chat-input input { flex: 1; padding: 10px; border-radius: 8px; border: 1px solid #cc99ff; background: #1a0033; color: #f0e6ff; }
"#;

/// Escape text for inclusion in HTML content or attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

fn role_label(role: Role, persona_name: &str) -> String {
    match role {
        Role::User => "🧑 You".to_string(),
        Role::Assistant => format!("💀 {persona_name}"),
    }
}

fn role_color(role: Role) -> &'static str {
    match role {
        Role::User => USER_COLOR,
        Role::Assistant => ASSISTANT_COLOR,
    }
}

/// `<audio autoplay>` element carrying the clip inline as a data URI.
pub fn audio_element(audio: &AudioData) -> String {
    let encoded = STANDARD.encode(&audio.data);
    format!(
        r#"<audio autoplay="true"><source src="data:{mime};base64,{encoded}" type="{mime}"></audio>"#,
        mime = escape_html(&audio.content_type),
    )
}

/// Render the full call page for `snapshot`.
///
/// `audio` is the clip consumed for this render, if any; `alert` has
/// already been taken from the session by the caller.
pub fn render_call_page(
    snapshot: &SessionSnapshot,
    persona_name: &str,
    audio: Option<&AudioData>,
) -> String {
    let name = escape_html(persona_name);
    let base = format!("/call/{}", snapshot.session_id);
    let mut html = String::with_capacity(4096);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{name} AI - Voice Call</title>
<style>{STYLE}</style>
</head>
<body>
<div class="container">
<h1 class="main-title">📞 {name} AI Voice Call</h1>
<p class="subtitle">Text to {name}, she replies with her voice...</p>
<div class="controls">
"#
    );

    if snapshot.call_active {
        let _ = write!(
            html,
            r#"<form method="post" action="{base}/end"><button type="submit">📴 End Call</button></form>"#
        );
    } else {
        let _ = write!(
            html,
            r#"<form method="post" action="{base}/start"><button type="submit">📞 Start Call</button></form>"#
        );
    }
    let _ = write!(
        html,
        r#"<form method="post" action="{base}/clear"><button type="submit">🗑️ Clear History</button></form>
</div>
"#
    );

    if let Some(alert) = &snapshot.alert {
        let title = match alert.kind {
            AlertKind::Completion => "Reply failed",
            AlertKind::Speech => "Voice unavailable",
            AlertKind::Configuration => "Configuration error",
            AlertKind::Rejected => "Not sent",
        };
        let _ = writeln!(
            html,
            r#"<div class="alert"><strong>{title}:</strong> {}</div>"#,
            escape_html(&alert.message)
        );
    }

    if snapshot.call_active {
        let _ = writeln!(
            html,
            r#"<p class="call-status">🔴 Call Active - {name} is listening...</p>"#
        );
    } else {
        let _ = writeln!(
            html,
            r#"<p class="info">📞 Click 'Start Call' to begin talking with {name}</p>"#
        );
    }

    for turn in &snapshot.turns {
        let _ = writeln!(
            html,
            r#"<div class="message-box" style="border-left-color: {};"><strong>{}:</strong><br>{}</div>"#,
            role_color(turn.role),
            escape_html(&role_label(turn.role, persona_name)),
            escape_html(&turn.content)
        );
    }

    if let Some(audio) = audio {
        html.push_str(&audio_element(audio));
        html.push('\n');
    }

    if snapshot.call_active {
        let _ = write!(
            html,
            r#"<form class="chat-input" method="post" action="{base}/message">
<input type="text" name="text" placeholder="Type your message to {name}..." autocomplete="off" autofocus required>
<button type="submit">Send</button>
</form>
"#
        );
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}
