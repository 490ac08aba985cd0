//! Reading advertisement lines.
//!
//! Each non-comment line holds the parameters of one `RPL_ISUPPORT` reply
//! after the target nickname, e.g.
//! `CHANTYPES=# EXCEPTS INVEX CHANMODES=eIbq,k,flj,imnpst :are supported`.

use std::io::{self, BufRead};

/// One line of parameters and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvertLine {
    /// 1-based line number in the source.
    pub number: usize,
    /// The raw line.
    pub text: String,
}

impl AdvertLine {
    /// Whitespace-separated 005 parameters.
    pub fn params(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }
}

/// Read every advertisement line, skipping blanks and `#` comments.
///
/// No ISUPPORT key starts with `#`, so the comment marker is unambiguous.
pub fn read_lines<R: BufRead>(reader: R) -> io::Result<Vec<AdvertLine>> {
    let mut lines = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        lines.push(AdvertLine {
            number: idx + 1,
            text: trimmed.to_string(),
        });
    }
    Ok(lines)
}
