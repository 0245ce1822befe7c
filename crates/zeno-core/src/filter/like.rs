///
/// SQL LIKE pattern matching
///
/// `%` matches any run of characters, `_` matches exactly one, and a
/// backslash escapes the next pattern character. Matching is anchored:
/// the pattern must cover the whole value.
///

#[must_use]
pub fn like_match(value: &str, pattern: &str) -> bool {
    like_step(&mut value.chars().peekable(), &mut pattern.chars().peekable())
}

type Chars<'a> = std::iter::Peekable<std::str::Chars<'a>>;

fn like_step(value: &mut Chars, pattern: &mut Chars) -> bool {
    loop {
        match (pattern.peek().copied(), value.peek().copied()) {
            (None, None) => return true,
            (None, Some(_)) => return false,

            (Some('%'), _) => {
                pattern.next();
                // Trailing % matches the rest of the value.
                if pattern.peek().is_none() {
                    return true;
                }
                // Try the remainder against 0, 1, 2, ... consumed characters.
                loop {
                    if like_step(&mut value.clone(), &mut pattern.clone()) {
                        return true;
                    }
                    if value.next().is_none() {
                        return false;
                    }
                }
            }

            (Some('_'), Some(_)) => {
                pattern.next();
                value.next();
            }
            (Some('_'), None) => return false,

            (Some('\\'), _) => {
                pattern.next();
                match (pattern.next(), value.next()) {
                    (Some(p), Some(c)) if p == c => {}
                    _ => return false,
                }
            }

            (Some(p), Some(c)) => {
                if p == c {
                    pattern.next();
                    value.next();
                } else {
                    return false;
                }
            }
            (Some(_), None) => return false,
        }
    }
}
