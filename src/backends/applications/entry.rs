use std::collections::HashMap;

use crate::model::Value;

/// One parsed desktop file: normalized keys mapped to typed values.
///
/// Only keys inside the `[Desktop Entry]` section are kept. A localized key
/// like `Comment[fr]` lands under `comment_i18n` when its tag matches the
/// configured language, and is dropped otherwise. Later lines overwrite
/// earlier ones for the same key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesktopEntry {
    attrs: HashMap<String, Value>,
}

impl DesktopEntry {
    /// Parse one desktop file. `language` is the active language tag;
    /// `None` disables every localized key. A file without a
    /// `[Desktop Entry]` section yields an empty record.
    pub fn parse(text: &str, language: Option<&str>) -> Self {
        let mut attrs = HashMap::new();
        let mut in_desktop_entry = false;

        for line in text.lines() {
            if let Some(section) = section_name(line) {
                in_desktop_entry = section == "Desktop Entry";
                continue;
            }
            if !in_desktop_entry {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if key.starts_with("X-") {
                continue;
            }
            if let Some((base, tag)) = split_locale_key(key) {
                if language.is_some_and(|lang| locale_matches(lang, tag)) {
                    attrs.insert(format!("{}_i18n", normalize_key(base)), cast_value(value));
                }
            } else {
                attrs.insert(normalize_key(key), cast_value(value));
            }
        }

        DesktopEntry { attrs }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    /// Display name, when present as a plain string.
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    /// Entries flagged `NoDisplay=true` never reach any result set.
    pub fn is_hidden(&self) -> bool {
        matches!(self.get("no_display"), Some(Value::Bool(true)))
    }
}

fn section_name(line: &str) -> Option<&str> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    (!inner.is_empty()).then_some(inner)
}

/// Split `Name[fr]` into (`Name`, `fr`). The bracket pair must close the key.
fn split_locale_key(key: &str) -> Option<(&str, &str)> {
    let body = key.strip_suffix(']')?;
    let (base, tag) = body.rsplit_once('[')?;
    (!base.is_empty() && !tag.is_empty()).then_some((base, tag))
}

/// Whether values tagged `tag` apply under `language`: the tag itself or any
/// of its region variants, so `fr` written as `LANGUAGE=fr_FR` still counts.
fn locale_matches(language: &str, tag: &str) -> bool {
    match language.strip_prefix(tag) {
        Some("") => true,
        Some(rest) => rest.starts_with('_') && rest.len() > 1,
        None => false,
    }
}

/// `CapitalizedWords` to `capitalized_words`. An acronym run breaks before a
/// trailing capitalized word (`StartupWMClass` to `startup_wm_class`); `-`
/// and space both become `_`.
fn normalize_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == ' ' {
            out.push('_');
            continue;
        }
        if !c.is_ascii_uppercase() {
            out.push(c);
            continue;
        }
        let boundary = match (i.checked_sub(1).map(|j| chars[j]), chars.get(i + 1)) {
            (Some(prev), _) if prev.is_ascii_lowercase() || prev.is_ascii_digit() => true,
            (Some(prev), Some(next)) if prev.is_ascii_uppercase() && next.is_ascii_lowercase() => {
                true
            }
            _ => false,
        };
        if boundary {
            out.push('_');
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// Coerce a raw value: booleans first, then numeric literals, then
/// `;`-terminated lists, else the string unchanged.
fn cast_value(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if let Some(number) = parse_number(raw) {
        return Value::Number(number);
    }
    if let Some(items) = split_list(raw) {
        return Value::List(items);
    }
    Value::String(raw.to_string())
}

/// Digits with at most one `.` or `,` separator. A `,` keeps only the digits
/// before it, matching how the source format's loose float parsing behaved.
fn parse_number(raw: &str) -> Option<f64> {
    let (digits, rest) = match raw.find(['.', ',']) {
        Some(pos) => raw.split_at(pos),
        None => (raw, ""),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let mut rest_chars = rest.chars();
    let separator = rest_chars.next();
    if !rest_chars.as_str().chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match separator {
        Some('.') => raw.parse().ok(),
        _ => digits.parse().ok(),
    }
}

/// One or more non-empty `;`-terminated segments, trailing separator dropped.
fn split_list(raw: &str) -> Option<Vec<String>> {
    let body = raw.strip_suffix(';')?;
    let items: Vec<String> = body.split(';').map(str::to_string).collect();
    if items.iter().any(|item| item.is_empty()) {
        return None;
    }
    Some(items)
}
