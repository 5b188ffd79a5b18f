use super::matcher::MatchSpans;

/// Rebuild `name` with `<u>…</u>` around the first character of every span
/// after the prefix. The prefix span is never emphasized, and any text past
/// the last span is reattached verbatim, so stripping the markers always
/// gives back `name` exactly.
pub fn highlight(name: &str, spans: &MatchSpans) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut rest = chars.as_slice();
    let mut out = String::with_capacity(name.len() + spans.lengths().len() * 7);

    for (i, &len) in spans.lengths().iter().enumerate() {
        let (chunk, tail) = rest.split_at(len.min(rest.len()));
        rest = tail;
        if i == 0 {
            out.extend(chunk);
        } else if let Some((&matched, unmatched)) = chunk.split_first() {
            out.push_str("<u>");
            out.push(matched);
            out.push_str("</u>");
            out.extend(unmatched);
        }
    }
    out.extend(rest);
    out
}
