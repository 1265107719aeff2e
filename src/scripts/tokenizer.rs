//! Call scanner for script lines.
//!
//! Finds every `path.to.function(arg, arg)` call on a line and returns the
//! callee path with its raw, top-level arguments. String literals are skipped
//! while scanning and `//` ends the line. Argument lists are scanned as well,
//! so a call nested inside another call's arguments is also reported.

/// A call found on a script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call<'a> {
    /// Dotted callee path, e.g. `pm.environment.set`
    pub callee: &'a str,
    /// Trimmed argument source text, split at top-level commas
    pub args: Vec<&'a str>,
}

/// Scans a line for call expressions.
///
/// Calls reached through a member chain (`f().set(...)`) are not reported
/// because their callee is not a plain path.
pub fn scan_calls(line: &str) -> Vec<Call<'_>> {
    let bytes = line.as_bytes();
    let mut calls = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if is_quote(b) {
            i = skip_string(bytes, i);
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            break;
        } else if is_ident_start(b) {
            let start = i;
            let chained = preceded_by_dot(bytes, start);
            i = read_path(bytes, i);

            let open = skip_whitespace(bytes, i);
            if bytes.get(open) == Some(&b'(') {
                if let Some(close) = find_closing(bytes, open) {
                    if !chained {
                        calls.push(Call {
                            callee: &line[start..i],
                            args: split_args(&line[open + 1..close]),
                        });
                    }
                }
                i = open + 1;
            }
        } else {
            i += 1;
        }
    }

    calls
}

/// Splits an argument list at top-level commas
pub fn split_args(inner: &str) -> Vec<&str> {
    if inner.trim().is_empty() {
        return Vec::new();
    }

    let bytes = inner.as_bytes();
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b if is_quote(b) => {
                i = skip_string(bytes, i);
                continue;
            }
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                args.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    args.push(inner[start..].trim());

    args
}

/// Strips one pair of matching quotes and resolves backslash escapes.
///
/// Bare tokens are returned as written.
pub fn unquote(arg: &str) -> String {
    let bytes = arg.as_bytes();
    if bytes.len() < 2 || !is_quote(bytes[0]) || bytes[bytes.len() - 1] != bytes[0] {
        return arg.to_string();
    }

    let mut out = String::with_capacity(arg.len() - 2);
    let mut chars = arg[1..arg.len() - 1].chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn is_quote(b: u8) -> bool {
    matches!(b, b'"' | b'\'' | b'`')
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Returns the index just past the string literal opening at `start`
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn preceded_by_dot(bytes: &[u8], start: usize) -> bool {
    bytes[..start]
        .iter()
        .rev()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|&b| b == b'.')
}

/// Reads `ident(.ident)*` and returns the index past it
fn read_path(bytes: &[u8], mut i: usize) -> usize {
    loop {
        while i < bytes.len() && is_ident_continue(bytes[i]) {
            i += 1;
        }
        let continues = bytes.get(i) == Some(&b'.')
            && bytes.get(i + 1).is_some_and(|&b| is_ident_start(b));
        if !continues {
            return i;
        }
        i += 1;
    }
}

/// Finds the `)` matching the `(` at `open`
fn find_closing(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b if is_quote(b) => {
                i = skip_string(bytes, i);
                continue;
            }
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}
