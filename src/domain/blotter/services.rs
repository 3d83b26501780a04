use super::value_objects::SecurityIds;

/// Markup for the security-identifiers block, one row per identifier.
pub fn render_identifier_rows(ids: &SecurityIds) -> String {
    ids.iter()
        .map(|id| {
            format!(
                r#"<div class="blotter-id-row"><label>{}</label><span>{}</span></div>"#,
                escape_html(&id.scheme),
                escape_html(&id.value)
            )
        })
        .collect()
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
