//! Token-level parsers. Each one takes the remaining input slice, skips
//! leading blanks, and on success returns the rest of the line after the
//! consumed token. On failure the cursor is lost; callers must abandon the
//! line rather than continue from an undefined position.

use arch::reg::{find_register, Reg};

use crate::error::Error;

// ----------------------------------------------------------------------------
// Character classes

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Letters for symbol purposes include `.` and `_`.
fn is_symbol_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '.' || c == '_'
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '_'
}

fn is_digit_start(c: char) -> bool {
    c.is_ascii_digit() || c == '-' || c == '+'
}

pub fn skip_blank(s: &str) -> &str {
    s.trim_start_matches(is_blank)
}

// ----------------------------------------------------------------------------
// Token parsers

/// Register token, e.g. `%rax`. Prefix match against the register table.
pub fn parse_reg(s: &str) -> Result<(&str, Reg), Error> {
    let s = skip_blank(s);
    if !s.starts_with('%') {
        return Err(Error::InvalidOperand { expected: "register" });
    }
    match find_register(s) {
        Some(entry) => Ok((&s[entry.name.len()..], entry.reg)),
        None => Err(Error::InvalidOperand { expected: "register" }),
    }
}

/// Exact delimiter, e.g. the comma between operands.
pub fn parse_delim(s: &str, delim: char) -> Result<&str, Error> {
    let s = skip_blank(s);
    s.strip_prefix(delim)
        .ok_or(Error::InvalidOperand { expected: "delimiter" })
}

/// Numeric literal: `42`, `0x1f`, `017`, `-3`. Base rules follow
/// `strtoull(.., 0)`; negative values wrap into the unsigned 64-bit range.
pub fn parse_digit(s: &str) -> Result<(&str, u64), Error> {
    let s = skip_blank(s);
    let (neg, t) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if !t.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(Error::InvalidOperand { expected: "immediate" });
    }
    let (radix, digits) = if t.starts_with("0x") || t.starts_with("0X") {
        (16, &t[2..])
    } else if t.len() > 1 && t.starts_with('0') {
        (8, &t[1..])
    } else {
        (10, t)
    };
    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    let value = u64::from_str_radix(&digits[..end], radix)
        .map_err(|_| Error::InvalidOperand { expected: "immediate" })?;
    Ok((&digits[end..], if neg { value.wrapping_neg() } else { value }))
}

/// Symbol token. The first character must be a letter (`.` and `_` count as
/// letters); digit-first tokens are never symbols.
pub fn parse_symbol(s: &str) -> Result<(&str, String), Error> {
    let s = skip_blank(s);
    let end = s.find(|c| !is_symbol_char(c)).unwrap_or(s.len());
    match s.chars().next() {
        Some(c) if end > 0 && is_symbol_start(c) => Ok((&s[end..], s[..end].to_string())),
        _ => Err(Error::InvalidOperand { expected: "symbol" }),
    }
}

/// Immediate-or-symbol operand: `$123` or a label name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imm {
    Literal(u64),
    Symbol(String),
}

pub fn parse_imm(s: &str) -> Result<(&str, Imm), Error> {
    let s = skip_blank(s);
    if let Some(rest) = s.strip_prefix('$') {
        let (rest, value) = parse_digit(rest)?;
        return Ok((rest, Imm::Literal(value)));
    }
    if s.starts_with(is_symbol_start) {
        let (rest, name) = parse_symbol(s)?;
        return Ok((rest, Imm::Symbol(name)));
    }
    Err(Error::InvalidOperand { expected: "immediate or symbol" })
}

/// Data directive operand: a bare literal or a label name, no `$` sigil.
pub fn parse_data(s: &str) -> Result<(&str, Imm), Error> {
    let s = skip_blank(s);
    if s.starts_with(is_digit_start) {
        let (rest, value) = parse_digit(s)?;
        return Ok((rest, Imm::Literal(value)));
    }
    if s.starts_with(is_symbol_start) {
        let (rest, name) = parse_symbol(s)?;
        return Ok((rest, Imm::Symbol(name)));
    }
    Err(Error::InvalidOperand { expected: "immediate or symbol" })
}

/// Memory operand `D(%reg)`; the displacement defaults to 0 when omitted.
pub fn parse_mem(s: &str) -> Result<(&str, (u64, Reg)), Error> {
    let s = skip_blank(s);
    let (s, disp) = if s.starts_with('(') {
        (s, 0)
    } else if s.starts_with(is_digit_start) {
        let (rest, value) = parse_digit(s)?;
        (skip_blank(rest), value)
    } else {
        return Err(Error::InvalidOperand { expected: "memory operand" });
    };
    let s = s
        .strip_prefix('(')
        .ok_or(Error::InvalidOperand { expected: "memory operand" })?;
    let (s, reg) = parse_reg(s)?;
    let s = s
        .strip_prefix(')')
        .ok_or(Error::InvalidOperand { expected: "memory operand" })?;
    Ok((s, (disp, reg)))
}

/// Optional leading label `name:`. Returns `None` (no error, caller keeps
/// its cursor) when the line does not start with one.
pub fn parse_label(s: &str) -> Option<(&str, String)> {
    let t = skip_blank(s);
    let end = t.find(|c| !is_symbol_char(c)).unwrap_or(t.len());
    if end == 0 || t.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let rest = t[end..].strip_prefix(':')?;
    Some((rest, t[..end].to_string()))
}

/// After the operands, the line must be blank or a `#` comment.
pub fn check_tail(s: &str) -> Result<(), Error> {
    let s = skip_blank(s);
    if s.is_empty() || s.starts_with('#') {
        Ok(())
    } else {
        Err(Error::TrailingGarbage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits() {
        assert_eq!(parse_digit("42").unwrap(), ("", 42));
        assert_eq!(parse_digit("  0x1f,").unwrap(), (",", 0x1f));
        assert_eq!(parse_digit("017").unwrap(), ("", 15));
        assert_eq!(parse_digit("-1").unwrap(), ("", u64::MAX));
        assert_eq!(parse_digit("+8(%rbp)").unwrap(), ("(%rbp)", 8));
        assert!(parse_digit("x10").is_err());
        assert!(parse_digit("$10").is_err());
    }

    #[test]
    fn registers() {
        assert_eq!(parse_reg(" %rsp").unwrap(), ("", Reg::RSP));
        assert_eq!(parse_reg("%r10, %rax").unwrap(), (", %rax", Reg::R10));
        assert!(parse_reg("rax").is_err());
        assert!(parse_reg("%bogus").is_err());
    }

    #[test]
    fn symbols() {
        assert_eq!(parse_symbol("Main:").unwrap(), (":", "Main".to_string()));
        assert_eq!(parse_symbol(".Lloop x").unwrap(), (" x", ".Lloop".to_string()));
        assert_eq!(parse_symbol("_tmp").unwrap(), ("", "_tmp".to_string()));
        assert!(parse_symbol("9lives").is_err());
        assert!(parse_symbol(",").is_err());
    }

    #[test]
    fn immediates() {
        assert_eq!(parse_imm("$10, %rax").unwrap(), (", %rax", Imm::Literal(10)));
        assert_eq!(
            parse_imm("Stack, %rsp").unwrap(),
            (", %rsp", Imm::Symbol("Stack".to_string()))
        );
        assert!(parse_imm("10").is_err());
    }

    #[test]
    fn data_tokens() {
        assert_eq!(parse_data(" 0x40").unwrap(), ("", Imm::Literal(0x40)));
        assert_eq!(parse_data("-2").unwrap(), ("", Imm::Literal(2u64.wrapping_neg())));
        assert_eq!(parse_data("array").unwrap(), ("", Imm::Symbol("array".to_string())));
        assert!(parse_data("$1").is_err());
    }

    #[test]
    fn memory_operands() {
        assert_eq!(parse_mem("8(%rbp)").unwrap(), ("", (8, Reg::RBP)));
        assert_eq!(parse_mem("(%rax)").unwrap(), ("", (0, Reg::RAX)));
        assert_eq!(parse_mem("-4(%rsp), %rax").unwrap(), (", %rax", (4u64.wrapping_neg(), Reg::RSP)));
        assert!(parse_mem("%rax").is_err());
        assert!(parse_mem("8(%rbp").is_err());
    }

    #[test]
    fn labels() {
        assert_eq!(parse_label("Main: ret"), Some((" ret", "Main".to_string())));
        assert_eq!(parse_label("  .Ldone:"), Some(("", ".Ldone".to_string())));
        assert_eq!(parse_label("ret"), None);
        assert_eq!(parse_label("8bad:"), None);
        assert_eq!(parse_label("Main : ret"), None);
    }

    #[test]
    fn tails() {
        assert!(check_tail("").is_ok());
        assert!(check_tail("   # comment").is_ok());
        assert!(check_tail(" junk").is_err());
    }
}
