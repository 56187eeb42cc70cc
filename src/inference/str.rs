use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Clone, Debug, Default)]
pub struct StrC {
    /// Distinct observed strings; cleared once the cap is exceeded.
    pub lits: BTreeSet<String>,
    /// Set once `lits` overflowed: the literal set is no longer complete.
    pub overflowed: bool,
}

// letters/digits/space/dash/underscore, bounded length
static HUMANISH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^[A-Za-z0-9 _-]{{1,{}}}$", super::STRING_ENUM_MAX_LEN))
        .expect("static regex")
});

impl StrC {
    pub fn observe(s: &str) -> Self {
        let mut out = Self::default();
        out.lits.insert(s.to_owned());
        out
    }

    pub(super) fn join(a: &Self, b: &Self) -> Self {
        let mut out = Self { overflowed: a.overflowed || b.overflowed, ..Self::default() };
        if !out.overflowed {
            out.lits = &a.lits | &b.lits;
            if out.lits.len() > super::MAX_STR_LITS {
                out.lits.clear(); // cap: treat as arbitrary strings
                out.overflowed = true;
            }
        }
        out
    }
}

pub fn looks_humanish(s: &str) -> bool {
    HUMANISH.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanish_strings() {
        assert!(looks_humanish("on"));
        assert!(looks_humanish("in-progress"));
        assert!(!looks_humanish(""));
        assert!(!looks_humanish("https://example.com"));
        assert!(!looks_humanish("a-very-long-status-name"));
    }

    #[test]
    fn literal_cap_overflows_for_good() {
        let mut acc = StrC::default();
        for i in 0..=super::super::MAX_STR_LITS {
            acc = StrC::join(&acc, &StrC::observe(&format!("s{i}")));
        }
        assert!(acc.overflowed);
        assert!(acc.lits.is_empty());
        let after = StrC::join(&acc, &StrC::observe("x"));
        assert!(after.overflowed && after.lits.is_empty());
    }
}
