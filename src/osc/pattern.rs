//! OSC 1.0 address pattern matching.
//!
//! Grammar: `?` matches any single character except `/`; `*` matches a run
//! of zero or more non-`/` characters; `[...]` matches one character from a
//! set, with `a-z` ranges, a leading `!` inverting the set, and `-` literal
//! at either extreme; `{a,b}` matches one alternative substring; `//`
//! matches zero or more whole path segments (descendant-or-self), with
//! three or more consecutive slashes collapsing to the same operator and a
//! trailing `//` never matching. Everything else matches itself.
//!
//! `osc_match_pattern` returns true iff the pattern consumes the entire
//! address. Malformed sets and alternations (no closing bracket) fail the
//! match rather than erroring.

/// Match an OSC address pattern against a fixed address.
pub fn osc_match_pattern(pattern: &str, address: &str) -> bool {
    match_bytes(pattern.as_bytes(), address.as_bytes())
}

fn match_bytes(pattern: &[u8], address: &[u8]) -> bool {
    match pattern.first() {
        None => address.is_empty(),

        Some(b'*') => {
            let mut p = pattern;
            while p.first() == Some(&b'*') {
                p = &p[1..];
            }
            // Consume greedily up to the next '/' or the character that
            // resumes the pattern. No backtracking.
            let resume = p.first().copied();
            let mut a = address;
            while let Some(&c) = a.first() {
                if c == b'/' || Some(c) == resume {
                    break;
                }
                a = &a[1..];
            }
            match_bytes(p, a)
        }

        Some(b'[') => match_set(&pattern[1..], address),

        Some(b'{') => match_alternatives(&pattern[1..], address),

        Some(b'/') if pattern.get(1) == Some(&b'/') => {
            // Descendant-or-self: try the remainder (which still starts
            // with '/') at every segment boundary of the address.
            let p = &pattern[1..];
            let mut a = address;
            loop {
                if match_bytes(p, a) {
                    return true;
                }
                loop {
                    match a.split_first() {
                        Some((_, rest)) => {
                            a = rest;
                            if a.first() == Some(&b'/') {
                                break;
                            }
                        }
                        None => return false,
                    }
                }
            }
        }

        Some(&c) => {
            let Some((&head, rest)) = address.split_first() else {
                return false;
            };
            if c == b'?' {
                head != b'/' && match_bytes(&pattern[1..], rest)
            } else {
                c == head && match_bytes(&pattern[1..], rest)
            }
        }
    }
}

/// `pattern` starts just past the `[`. A leading `!` inverts the set but is
/// also considered a member, matching the behaviour OSC implementations
/// have converged on.
fn match_set(pattern: &[u8], address: &[u8]) -> bool {
    let Some((&head, rest)) = address.split_first() else {
        return false;
    };
    let negate = pattern.first() == Some(&b'!');

    let mut p = pattern;
    let mut matched = false;
    while !matched {
        match p.first() {
            None => return false,
            Some(b']') => break,
            _ => {}
        }
        if p.len() >= 3 && p[1] == b'-' && p[2] != b']' {
            let (start, end) = (p[0], p[2]);
            p = &p[3..];
            matched = if start < end {
                start <= head && head <= end
            } else {
                end <= head && head <= start
            };
        } else {
            if p[0] == head {
                matched = true;
            }
            p = &p[1..];
        }
    }

    while let Some(&c) = p.first() {
        if c == b']' {
            break;
        }
        p = &p[1..];
    }
    if p.is_empty() {
        return false;
    }
    if negate {
        matched = !matched;
    }
    if matched { match_bytes(&p[1..], rest) } else { false }
}

/// `pattern` starts just past the `{`. Alternatives are comma-separated and
/// tried left to right against the same starting position.
fn match_alternatives(pattern: &[u8], address: &[u8]) -> bool {
    let mut p = pattern;
    let mut a = address;
    let mut matched = false;
    while !matched {
        match p.first() {
            None => return false,
            Some(b'}') => break,
            _ => {}
        }
        let pc = p[0];
        p = &p[1..];
        if a.first() == Some(&pc) {
            a = &a[1..];
            if matches!(p.first(), Some(b',') | Some(b'}')) {
                matched = true;
            }
        } else {
            // This alternative failed; rewind the address and skip to the
            // next one.
            a = address;
            while let Some(&c) = p.first() {
                if c == b',' || c == b'}' {
                    break;
                }
                p = &p[1..];
            }
            if p.first() == Some(&b',') {
                p = &p[1..];
            }
        }
    }

    while let Some(&c) = p.first() {
        if c == b'}' {
            break;
        }
        p = &p[1..];
    }
    if p.is_empty() {
        return false;
    }
    if matched { match_bytes(&p[1..], a) } else { false }
}
