//! Invitation content. Subject and body are fixed; only the event link is
//! configurable.

use std::fmt::Write as _;

pub const INVITE_SUBJECT: &str = "Your Invite: Stanford Alumni Event";

/// Render the HTML body: a confirmation line, a button-styled link, and a
/// plain copy of the link for clients that strip styled anchors.
pub fn render_invite_html(event_link: &str) -> String {
    let link = escape_html(event_link);
    let mut html = String::new();

    writeln!(
        html,
        r#"<div style="font-family: sans-serif; padding: 20px; color: #111;">"#
    )
    .expect("write container");
    writeln!(html, r#"<h2 style="margin-bottom: 24px;">You're on the list!</h2>"#)
        .expect("write heading");
    writeln!(
        html,
        "<p>We verified your Stanford status. Here is the link to the event:</p>"
    )
    .expect("write confirmation");
    writeln!(
        html,
        r#"<p style="margin: 24px 0;"><a href="{link}" style="background-color: #000; color: #fff; padding: 14px 28px; text-decoration: none; border-radius: 8px; display: inline-block; font-weight: bold;">RSVP on Partiful</a></p>"#
    )
    .expect("write button");
    writeln!(
        html,
        r#"<p style="color: #666; font-size: 14px; margin-top: 24px;">Link not working? Copy this:<br><a href="{link}" style="color: #666;">{link}</a></p>"#
    )
    .expect("write fallback");
    html.push_str("</div>");

    html
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
