//! Lexical helpers shared by every statement parser: trimming, case-insensitive
//! keyword matching, quote stripping, and top-level comma splitting.
//!
//! There is no tokenizer here — the grammar (§4) is simple enough that each
//! statement parser works directly on `&str` slices, trimming as it goes.

/// Case-insensitively checks whether `input` starts with `keyword`, returning
/// the remainder of `input` (trimmed) if so.
pub fn strip_prefix_ci<'a>(input: &'a str, keyword: &str) -> Option<&'a str> {
    let input_trimmed = input.trim_start();
    if input_trimmed.len() < keyword.len() {
        return None;
    }
    let (head, tail) = input_trimmed.split_at(keyword.len());
    head.eq_ignore_ascii_case(keyword).then(|| tail.trim_start())
}

/// Case-insensitive substring search, used for detecting `PRIMARY KEY` /
/// `NOT NULL` modifiers anywhere in a column fragment (§4.4).
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let haystack = haystack.to_ascii_uppercase();
    let needle = needle.to_ascii_uppercase();
    haystack.contains(&needle)
}

/// Strips one layer of matching single or double quotes, if both ends carry
/// the same quote character. Otherwise returns the input unchanged.
#[must_use]
pub fn strip_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'\'' || first == b'"') && first == last {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Splits `s` on top-level commas: commas inside a matching pair of single or
/// double quotes do not split. Used for value lists (`VALUES (...)`) and
/// column lists.
#[must_use]
pub fn split_top_level_commas(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in s.chars() {
        match quote {
            Some(q) if ch == q => {
                quote = None;
                current.push(ch);
            }
            Some(_) => current.push(ch),
            None if ch == '\'' || ch == '"' => {
                quote = Some(ch);
                current.push(ch);
            }
            None if ch == ',' => {
                parts.push(current.trim().to_string());
                current = String::new();
            }
            None => current.push(ch),
        }
    }
    parts.push(current.trim().to_string());
    parts
}

/// Extracts the contents between the first top-level `(` and its matching
/// `)`, returning `(inside, rest_after_close_paren)`. Quotes are respected so
/// a parenthesis inside a string literal does not confuse matching.
#[must_use]
pub fn extract_parens(s: &str) -> Option<(&str, &str)> {
    let bytes = s.as_bytes();
    let open = s.find('(')?;
    let mut depth = 0i32;
    let mut quote: Option<u8> = None;
    let mut idx = open;
    while idx < bytes.len() {
        let b = bytes[idx];
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'\'' || b == b'"' => quote = Some(b),
            None if b == b'(' => depth += 1,
            None if b == b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&s[open + 1..idx], &s[idx + 1..]));
                }
            }
            None => {}
        }
        idx += 1;
    }
    None
}

/// Finds `keyword` as a whole, case-insensitive word in `s` (not as a
/// substring of some longer identifier), returning the text before it and
/// the text after it. Used to split a clause like `<table> WHERE <pred>`
/// where the keyword isn't necessarily at the very start of `s`.
#[must_use]
pub fn split_on_keyword<'a>(s: &'a str, keyword: &str) -> Option<(&'a str, &'a str)> {
    let upper = s.to_ascii_uppercase();
    let keyword_upper = keyword.to_ascii_uppercase();
    let mut search_from = 0;
    loop {
        let rel = upper[search_from..].find(&keyword_upper)?;
        let pos = search_from + rel;
        let end = pos + keyword.len();
        let before_ok = pos == 0 || !is_word_byte(upper.as_bytes()[pos - 1]);
        let after_ok = upper.as_bytes().get(end).is_none_or(|&b| !is_word_byte(b));
        if before_ok && after_ok {
            return Some((&s[..pos], &s[end..]));
        }
        search_from = pos + keyword.len();
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Splits `s` on the first run of ASCII whitespace, returning the first
/// whitespace-delimited token and the (trimmed) remainder.
#[must_use]
pub fn split_first_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(idx) => (&s[..idx], s[idx..].trim_start()),
        None => (s, ""),
    }
}
