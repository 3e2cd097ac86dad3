//! Pure, stateless predicates over candidate lexeme strings.
//!
//! Everything here operates on a plain `&str`; none of it touches position
//! or tree state. The [`lexer`](crate::lexer) calls [`is_valid`] to decide
//! when to stop extending its growing buffer, and the
//! [`tokenizer`](crate::tokenizer) calls the category predicates to run the
//! classification cascade from spec §4.3.

/// Keywords are a closed set; anything matching one of these is never a
/// name, even though it also matches the identifier pattern.
pub const KEYWORDS: &[&str] = &[
    "if", "else", "repeat", "while", "function", "for", "in", "next", "break",
];

/// Unary-capable operators: these may appear as either a unary or binary
/// operator depending on context (tokenizer cascade steps 11/12).
pub const UNARY_CAPABLE: &[&str] = &["+", "-", "!", "~", "?", "??", "!!", "!!!"];

/// The closed set of reserved (built-in) operators, including the
/// already-named `%...%` forms (`%%`, `%/%`, `%*%`, `%o%`, `%x%`, `%in%`).
pub const RESERVED_OPERATORS: &[&str] = &[
    "::", ":::", "$", "@", "^", ":", "%%", "%/%", "%*%", "%o%", "%x%", "%in%", "/", "*", "+", "-",
    "<", ">", "<=", ">=", "==", "!=", "!", "&", "&&", "|", "||", "|>", "~", "->", "->>", "<-",
    "<<-", "=", "?", "??", "!!", "!!!", ":=",
];

/// All complete, fixed-text forms the lexer may need to prefix-match against:
/// reserved operators, brackets, and single-character punctuation.
const FIXED_FORMS: &[&str] = &[
    "::", ":::", "$", "@", "^", ":", "%%", "%/%", "%*%", "%o%", "%x%", "%in%", "/", "*", "+", "-",
    "<", ">", "<=", ">=", "==", "!=", "!", "&", "&&", "|", "||", "|>", "~", "->", "->>", "<-",
    "<<-", "=", "?", "??", "!!", "!!!", ":=", "(", ")", "{", "}", "[", "[[", "]", "]]", ",", ";",
];

#[must_use]
pub fn is_bracket(s: &str) -> bool {
    matches!(s, "(" | ")" | "{" | "}")
}

#[must_use]
pub fn is_bracket_operator(s: &str) -> bool {
    matches!(s, "[" | "]" | "[[" | "]]")
}

#[must_use]
pub fn is_open_bracket(s: &str) -> bool {
    matches!(s, "(" | "{" | "[" | "[[")
}

#[must_use]
pub fn is_comment(s: &str) -> bool {
    s.starts_with('#')
}

#[must_use]
pub fn is_string_literal(s: &str) -> bool {
    s.starts_with('"') || s.starts_with('\'') || s.starts_with('`')
}

#[must_use]
pub fn is_newline(s: &str) -> bool {
    matches!(s, "\r" | "\n" | "\r\n")
}

#[must_use]
pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

#[must_use]
pub fn is_unary_capable(s: &str) -> bool {
    UNARY_CAPABLE.contains(&s)
}

#[must_use]
pub fn is_reserved_operator(s: &str) -> bool {
    RESERVED_OPERATORS.contains(&s)
}

/// `%...%`, complete: starts and ends with `%`, no `%` strictly between.
#[must_use]
pub fn is_user_defined_operator_complete(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 2
        && bytes[0] == b'%'
        && bytes[bytes.len() - 1] == b'%'
        && !s[1..s.len() - 1].contains('%')
}

/// `%...%`, still open (will keep growing in the lexer).
#[must_use]
pub fn is_user_defined_operator_partial(s: &str) -> bool {
    s.starts_with('%') && !is_user_defined_operator_complete(s)
}

/// Pure whitespace made only of the space character, or a single tab.
#[must_use]
pub fn is_spaces(s: &str) -> bool {
    s == "\t" || (!s.is_empty() && s.chars().all(|c| c == ' '))
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '.'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '_'
}

fn is_bare_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_identifier_start(c) => {}
        _ => return false,
    }
    chars.all(is_identifier_continue)
}

/// Whether `s` looks like a (possibly still-growing) numeric literal.
///
/// R's own grammar does not give numbers their own token kind in this
/// model: the tokenizer cascade classifies them as
/// [`crate::token::TokenKind::SyntacticName`] alongside identifiers, the
/// same way both serve as operands in the precedence pass. This extends
/// `is_syntactic_name` to numeric text so that cascade step 2 accepts them;
/// see `DESIGN.md` for this Open-Question resolution.
#[must_use]
pub fn is_numeric_literal(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    let body = s
        .strip_suffix('L')
        .or_else(|| s.strip_suffix('i'))
        .unwrap_or(s);
    if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;
    let mut chars = body.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot && !seen_exp => seen_dot = true,
            'e' | 'E' if seen_digit && !seen_exp => {
                seen_exp = true;
                if let Some(&(_, sign)) = chars.peek() {
                    if sign == '+' || sign == '-' {
                        chars.next();
                    }
                }
            }
            _ => {
                let _ = i;
                return false;
            }
        }
    }
    seen_digit
}

fn is_numeric_literal_prefix(s: &str) -> bool {
    if s.is_empty() {
        return true;
    }
    // A numeric literal's prefix is itself always one of: a run of digits,
    // optionally with one `.`, optionally an exponent, optionally a
    // trailing `L`/`i`. We just re-check with the suffix allowed to be
    // missing digits after `e`/`.`.
    if is_numeric_literal(s) {
        return true;
    }
    let trimmed = s.strip_suffix(['L', 'i']).unwrap_or(s);
    if trimmed.is_empty() {
        return true;
    }
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    if trimmed == "0" {
        return true;
    }
    let mut seen_dot = false;
    let mut seen_exp = false;
    for (i, c) in trimmed.char_indices() {
        match c {
            '0'..='9' => {}
            '.' if !seen_dot && !seen_exp => seen_dot = true,
            'e' | 'E' if i > 0 && !seen_exp => seen_exp = true,
            '+' | '-' if i > 0 => {
                let prev = trimmed.as_bytes()[i - 1];
                if prev != b'e' && prev != b'E' {
                    return false;
                }
            }
            _ => return false,
        }
    }
    true
}

/// Matches the identifier pattern, starts with a backtick, or looks like a
/// (possibly partial) numeric literal.
#[must_use]
pub fn is_syntactic_name(s: &str) -> bool {
    s.starts_with('`') || is_bare_identifier(s) || is_numeric_literal(s)
}

/// Whether a lexeme's text, taken alone, is shaped like something a binary
/// operator could legally sit to the right of: a name, a closed string, or
/// a close bracket. Used by the tokenizer cascade (spec §4.3 steps 11-12).
#[must_use]
pub fn is_valid_binary_left_operand(s: &str) -> bool {
    matches!(s, ")" | "}" | "]" | "]]") || is_syntactic_name(s) || is_closed_string_literal(s)
}

/// Whether a lexeme's text is shaped like something that can start an
/// operand to the right of a binary operator: a name, a closed string, an
/// open bracket, a unary-capable operator, or a keyword that begins an
/// expression.
#[must_use]
pub fn is_valid_binary_right_operand(s: &str) -> bool {
    is_syntactic_name(s)
        || is_closed_string_literal(s)
        || matches!(s, "(" | "{" | "[" | "[[")
        || is_unary_capable(s)
        || is_keyword(s)
}

/// A complete string literal is "closed": an unescaped matching quote has
/// been found, and the buffer stops exactly there (no trailing characters).
#[must_use]
pub fn is_closed_string_literal(s: &str) -> bool {
    let Some(quote) = s.chars().next() else {
        return false;
    };
    if !matches!(quote, '"' | '\'' | '`') {
        return false;
    }
    let rest = &s[quote.len_utf8()..];
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }
        if c == quote {
            // Closed at byte offset (quote.len_utf8() + i + c.len_utf8());
            // valid only if nothing trails that point.
            return quote.len_utf8() + i + c.len_utf8() == s.len();
        }
    }
    false
}

/// A string literal is valid while growing as long as it has not been
/// closed-and-then-extended (spec §4.1).
fn is_string_literal_prefix_valid(s: &str) -> bool {
    let Some(quote) = s.chars().next() else {
        return true;
    };
    if !matches!(quote, '"' | '\'' | '`') {
        return false;
    }
    let rest = &s[quote.len_utf8()..];
    let mut escaped = false;
    for c in rest.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }
        if c == quote {
            // Closed; any further content after this point (checked by
            // the lexer re-calling is_valid on the longer buffer) is
            // invalid. A buffer ending exactly here is still valid.
            return false_if_trailing(s, quote);
        }
    }
    true
}

fn false_if_trailing(s: &str, quote: char) -> bool {
    // Called only once we know the literal closed somewhere in `s`; if the
    // close is not at the very end, the buffer already has trailing junk.
    is_closed_string_literal(s) || {
        // Closed earlier but with escaped-closing-quote lookalikes still
        // to scan is handled above; reaching here with `quote` unused in a
        // degenerate way means no valid close at the end, so invalid.
        let _ = quote;
        false
    }
}

/// Whether `s` is either a complete lexeme or a legitimate prefix of one
/// (spec §4.1). The lexer calls this on its growing buffer to decide
/// whether to keep extending.
#[must_use]
pub fn is_valid(s: &str) -> bool {
    if s.is_empty() {
        return true;
    }

    if is_string_literal(s) {
        return is_string_literal_prefix_valid(s);
    }

    if is_newline(s) {
        return true;
    }
    if s.len() > 1 && s.chars().all(|c| c == '\r' || c == '\n') {
        // "A newline-terminated string longer than one character is not a
        // valid lexeme unless ... exactly \r\n."
        return s == "\r\n";
    }

    if s.starts_with('%') {
        return is_user_defined_operator_partial(s) || is_user_defined_operator_complete(s);
    }

    if s == "<<" {
        return true;
    }

    if is_spaces(s) {
        return true;
    }

    if is_comment(s) {
        return !s.contains(['\n', '\r']);
    }

    if is_syntactic_name(s) || is_numeric_literal_prefix(s) {
        return true;
    }

    FIXED_FORMS.iter().any(|f| f.starts_with(s)) || FIXED_FORMS.contains(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_brackets() {
        assert!(is_bracket("("));
        assert!(is_bracket("}"));
        assert!(!is_bracket("["));
        assert!(is_bracket_operator("["));
        assert!(is_bracket_operator("[["));
        assert!(!is_bracket_operator("("));
    }

    #[test]
    fn classifies_keywords() {
        assert!(is_keyword("if"));
        assert!(is_keyword("function"));
        assert!(!is_keyword("iff"));
    }

    #[test]
    fn string_literal_validity() {
        assert!(is_valid("\""));
        assert!(is_valid("\"abc"));
        assert!(is_valid("\"abc\""));
        assert!(!is_valid("\"abc\"x"));
        assert!(is_valid("\"a\\\""));
        assert!(is_valid("\"a\\\"b\""));
        assert!(is_closed_string_literal("\"abc\""));
        assert!(!is_closed_string_literal("\"abc"));
    }

    #[test]
    fn user_defined_operator_validity() {
        assert!(is_valid("%"));
        assert!(is_valid("%foo"));
        assert!(is_valid("%foo%"));
        assert!(!is_valid("%foo%x"));
        assert!(is_user_defined_operator_complete("%in%"));
        assert!(is_user_defined_operator_complete("%%"));
    }

    #[test]
    fn left_shift_assign_prefix() {
        assert!(is_valid("<"));
        assert!(is_valid("<<"));
        assert!(is_valid("<<-"));
        assert!(!is_valid("<<x"));
    }

    #[test]
    fn newline_terminated_strings() {
        assert!(is_valid("\n"));
        assert!(is_valid("\r\n"));
        assert!(!is_valid("a\n"));
    }

    #[test]
    fn spaces_and_tabs() {
        assert!(is_spaces("   "));
        assert!(is_spaces("\t"));
        assert!(!is_spaces("\t\t"));
        assert!(!is_spaces(" \t"));
    }

    #[test]
    fn binary_operand_shape() {
        assert!(is_valid_binary_left_operand("x"));
        assert!(is_valid_binary_left_operand(")"));
        assert!(is_valid_binary_left_operand("\"a\""));
        assert!(!is_valid_binary_left_operand("+"));
        assert!(is_valid_binary_right_operand("x"));
        assert!(is_valid_binary_right_operand("("));
        assert!(is_valid_binary_right_operand("-"));
        assert!(is_valid_binary_right_operand("if"));
        assert!(!is_valid_binary_right_operand(")"));
    }

    #[test]
    fn numeric_literals() {
        assert!(is_numeric_literal("1"));
        assert!(is_numeric_literal("1.5"));
        assert!(is_numeric_literal("1e10"));
        assert!(is_numeric_literal("1e-10"));
        assert!(is_numeric_literal("0x1F"));
        assert!(is_numeric_literal("1L"));
        assert!(!is_numeric_literal("abc"));
        assert!(is_syntactic_name("1"));
        assert!(is_syntactic_name("x1"));
        assert!(is_syntactic_name("`a b`"));
    }
}
