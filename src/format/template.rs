use indexmap::IndexMap;

/// Named values substituted into a label template.
pub type TemplateFields = IndexMap<String, String>;

/// Replaces `{{ name }}` placeholders with values from `fields`.
///
/// Whitespace inside the braces is ignored. Placeholders whose name is not in
/// `fields` (or whose name contains whitespace) are left untouched.
#[must_use]
pub fn format_template(template: &str, fields: &TemplateFields) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };
        let whole = &rest[open..open + 2 + close + 2];
        match placeholder_name(&after_open[..close]).and_then(|name| fields.get(name)) {
            Some(value) => out.push_str(value),
            None => out.push_str(whole),
        }
        rest = &after_open[close + 2..];
    }
    out.push_str(rest);
    out
}

/// Returns true when `template` contains a `{{ name }}` placeholder.
#[must_use]
pub fn has_placeholder(template: &str, name: &str) -> bool {
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            return false;
        };
        if placeholder_name(&after_open[..close]) == Some(name) {
            return true;
        }
        rest = &after_open[close + 2..];
    }
    false
}

fn placeholder_name(inner: &str) -> Option<&str> {
    let name = inner.trim();
    (!name.is_empty() && !name.contains(char::is_whitespace)).then_some(name)
}
