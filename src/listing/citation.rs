//! Citation extraction from the first documentation line.
//!
//! Documentation is expected to cite its source as `[<author><year>]`
//! where the year is the last four characters before `]`. Lines that do
//! not follow this layout still yield substrings (possibly empty or
//! meaningless) instead of failing: the missing bracket positions behave
//! as index -1 and slices use end-relative wrapping with clamping.

/// Author and year tokens sliced from a documentation line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub author: String,
    pub year: String,
}

impl Citation {
    /// `"<Author>, <Year>"` as shown in plain listings.
    pub fn short(&self) -> String {
        format!("{}, {}", capitalize(&self.author), self.year)
    }

    /// `"<Author> et al., <Year>"` as shown in github listings.
    pub fn et_al(&self) -> String {
        format!("{} et al., {}", capitalize(&self.author), self.year)
    }
}

/// Positions of the first `[` and the first `]` after it, -1 when absent.
fn bracket_positions(chars: &[char]) -> (isize, isize) {
    let open = chars.iter().position(|&c| c == '[');
    let from = open.unwrap_or(0);
    let close = chars[from..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| from + offset);

    let to_signed = |pos: Option<usize>| pos.map_or(-1, |p| p as isize);
    (to_signed(open), to_signed(close))
}

/// Slice `chars[start..end]` where negative bounds count from the end.
///
/// Out-of-range bounds are clamped and an inverted range is empty.
fn wrapped_slice(chars: &[char], start: isize, end: isize) -> String {
    let len = chars.len() as isize;
    let clamp = |i: isize| {
        let i = if i < 0 { i + len } else { i };
        i.clamp(0, len) as usize
    };

    let (start, end) = (clamp(start), clamp(end));
    if start >= end {
        return String::new();
    }
    chars[start..end].iter().collect()
}

/// Split the bracketed citation of `line` into author and year.
pub fn parse_citation(line: &str) -> Citation {
    let chars: Vec<char> = line.chars().collect();
    let (open, close) = bracket_positions(&chars);
    Citation {
        author: wrapped_slice(&chars, open + 1, close - 4),
        year: wrapped_slice(&chars, close - 4, close),
    }
}

/// The bracketed citation plus the character following `]`.
///
/// In rst documentation this is the citation reference itself, e.g.
/// `[bordes2013]_`.
pub fn citation_reference(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let (open, close) = bracket_positions(&chars);
    wrapped_slice(&chars, open, close + 2)
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_citation() {
        let citation = parse_citation("An implementation of TransE [bordes2013]_.");
        assert_eq!(citation.author, "bordes");
        assert_eq!(citation.year, "2013");
        assert_eq!(citation.short(), "Bordes, 2013");
        assert_eq!(citation.et_al(), "Bordes et al., 2013");
    }

    #[test]
    fn test_parse_citation_lowercase_author() {
        let citation = parse_citation("Smith2020 et al. [smith2020]");
        assert_eq!(citation.author, "smith");
        assert_eq!(citation.year, "2020");
        assert_eq!(citation.short(), "Smith, 2020");
    }

    #[test]
    fn test_citation_reference() {
        assert_eq!(
            citation_reference("An implementation of TransE [bordes2013]_."),
            "[bordes2013]_"
        );
        assert_eq!(citation_reference("Cited at the end [doe2001]"), "[doe2001]");
    }

    #[test]
    fn test_missing_brackets_degrade() {
        let line = "A model with no citation";
        let citation = parse_citation(line);
        assert_eq!(citation.author, "A model with no cit");
        assert_eq!(citation.year, "atio");
        assert_eq!(citation_reference(line), "");
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        for line in ["", "[", "]", "[]", "x]", "[ab", "ünïcödé [mü1999]", "[2020]"] {
            let citation = parse_citation(line);
            let _ = citation.short();
            let _ = citation.et_al();
            let _ = citation_reference(line);
        }
        assert_eq!(parse_citation("ünïcödé [mü1999]").author, "mü");
        assert_eq!(parse_citation("[2020]").author, "");
        assert_eq!(parse_citation("[2020]").year, "2020");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("bordes"), "Bordes");
        assert_eq!(capitalize("vAN"), "Van");
        assert_eq!(capitalize(""), "");
    }
}
