use std::collections::HashMap;
use std::io::{BufRead, Write};

use log::{debug, trace, warn};

use crate::config::UnmatchedPolicy;
use crate::error::{CodecError, Result};
use crate::freq::FreqTable;
use crate::huffman::{Node, build_code_table};

/// Line separating the codebook from the encoded message.
pub const DELIMITER: &str = "---";
/// Separates a character from its code, and terminates every message token.
pub const FIELD_SEPARATOR: char = '\t';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodebookEntry {
    pub ch: char,
    pub code: String,
}

/// Character to binary-code mapping, kept in the order it was derived or read.
///
/// Lookups in either direction resolve to the first entry holding the key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Codebook {
    entries: Vec<CodebookEntry>,
    by_char: HashMap<char, usize>,
    by_code: HashMap<String, usize>,
}

impl Codebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives one entry per character of the root label, in label order.
    pub fn from_tree(root: &Node) -> Result<Self> {
        let mut table = HashMap::new();
        build_code_table(root, String::new(), &mut table)?;

        let mut codebook = Self::new();
        for ch in root.label().chars() {
            let code = table.remove(&ch).ok_or(CodecError::BrokenTree { ch })?;
            trace!("Assigning code to {:?} : '{}'", ch, code);
            codebook.push(CodebookEntry { ch, code });
        }
        Ok(codebook)
    }

    pub fn push(&mut self, entry: CodebookEntry) {
        let slot = self.entries.len();
        self.by_char.entry(entry.ch).or_insert(slot);
        self.by_code.entry(entry.code.clone()).or_insert(slot);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[CodebookEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn code_for(&self, ch: char) -> Option<&str> {
        self.by_char
            .get(&ch)
            .map(|&i| self.entries[i].code.as_str())
    }

    pub fn char_for(&self, code: &str) -> Option<char> {
        self.by_code.get(code).map(|&i| self.entries[i].ch)
    }

    /// Total number of code digits needed to express the counted characters.
    pub fn encoded_bits(&self, frequencies: &FreqTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(ch, count)| self.code_for(ch).map(|code| code.len() as u64 * count))
            .sum()
    }

    /// Writes one `<char><TAB><code>` line per entry, without the delimiter.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for entry in &self.entries {
            writeln!(writer, "{}{}{}", entry.ch, FIELD_SEPARATOR, entry.code)?;
        }
        Ok(())
    }

    /// Parses a single codebook line. `line_no` is 1-based and only used
    /// for error reporting.
    pub fn parse_line(line_no: usize, line: &str) -> Result<CodebookEntry> {
        let malformed = || CodecError::MalformedCodebook {
            line: line_no,
            content: line.to_string(),
        };

        let mut chars = line.chars();
        let ch = chars.next().ok_or_else(malformed)?;
        if chars.next() != Some(FIELD_SEPARATOR) {
            return Err(malformed());
        }
        let code = chars.as_str();
        if !code.chars().all(|c| c == '0' || c == '1') {
            return Err(malformed());
        }

        Ok(CodebookEntry {
            ch,
            code: code.to_string(),
        })
    }

    /// Reads codebook lines up to and including the delimiter line, leaving
    /// the reader positioned at the encoded message.
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self> {
        let mut codebook = Self::new();
        let mut line = String::new();
        let mut line_no = 0;

        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Err(CodecError::MissingDelimiter);
            }
            line_no += 1;

            let content = strip_line_ending(&line);
            if content == DELIMITER {
                break;
            }
            codebook.push(Self::parse_line(line_no, content)?);
        }

        debug!("Read codebook with {} entries", codebook.len());
        Ok(codebook)
    }

    /// Maps code tokens back to characters.
    ///
    /// Tokens without an entry are dropped or rejected according to `policy`.
    pub fn decode_tokens<'a, I>(&self, tokens: I, policy: UnmatchedPolicy) -> Result<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut text = String::new();
        for (position, token) in tokens.into_iter().enumerate() {
            match self.char_for(token) {
                Some(ch) => text.push(ch),
                None => match policy {
                    UnmatchedPolicy::Drop => {
                        warn!("Dropping unmatched code token {:?} at {}", token, position);
                    }
                    UnmatchedPolicy::Fail => {
                        return Err(CodecError::UnmatchedToken {
                            position,
                            token: token.to_string(),
                        });
                    }
                },
            }
        }
        Ok(text)
    }
}

pub(crate) fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::huffman::build_huffman_tree;

    fn codebook_for(line: &str) -> Codebook {
        let root = build_huffman_tree(&FreqTable::from_line(line)).unwrap();
        Codebook::from_tree(&root).unwrap()
    }

    #[test]
    fn entries_follow_root_label_order() {
        let codebook = codebook_for("aaabbc");
        let entries: Vec<(char, &str)> = codebook
            .entries()
            .iter()
            .map(|e| (e.ch, e.code.as_str()))
            .collect();
        assert_eq!(entries, vec![('c', "00"), ('b', "01"), ('a', "1")]);
    }

    #[test]
    fn writes_tab_separated_lines() {
        let codebook = codebook_for("aabb");
        let mut out = Vec::new();
        codebook.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "b\t0\na\t1\n");
    }

    #[test]
    fn parses_whitespace_characters() {
        let space = Codebook::parse_line(1, " \t010").unwrap();
        assert_eq!(space.ch, ' ');
        assert_eq!(space.code, "010");

        let tab = Codebook::parse_line(2, "\t\t11").unwrap();
        assert_eq!(tab.ch, '\t');
        assert_eq!(tab.code, "11");
    }

    #[test]
    fn parses_empty_code() {
        let entry = Codebook::parse_line(1, "z\t").unwrap();
        assert_eq!(entry.ch, 'z');
        assert_eq!(entry.code, "");
    }

    #[test]
    fn missing_code_field_is_malformed() {
        let err = Codebook::parse_line(3, "a").unwrap_err();
        assert!(matches!(
            err,
            CodecError::MalformedCodebook { line: 3, ref content } if content == "a"
        ));
        assert!(Codebook::parse_line(1, "").is_err());
        assert!(Codebook::parse_line(1, "ab01").is_err());
        assert!(Codebook::parse_line(1, "a\t012").is_err());
    }

    #[test]
    fn read_stops_at_delimiter() {
        let mut reader = Cursor::new("x\t0\ny\t1\r\n---\n0\t1\t");
        let codebook = Codebook::read_from(&mut reader).unwrap();
        assert_eq!(codebook.len(), 2);
        assert_eq!(codebook.char_for("1"), Some('y'));

        let mut rest = String::new();
        reader.read_line(&mut rest).unwrap();
        assert_eq!(rest, "0\t1\t");
    }

    #[test]
    fn read_without_delimiter_fails() {
        let mut reader = Cursor::new("x\t0\ny\t1\n");
        assert!(matches!(
            Codebook::read_from(&mut reader),
            Err(CodecError::MissingDelimiter)
        ));
    }

    #[test]
    fn first_entry_wins_on_duplicate_codes() {
        let mut codebook = Codebook::new();
        codebook.push(CodebookEntry { ch: 'a', code: "0".into() });
        codebook.push(CodebookEntry { ch: 'b', code: "0".into() });
        assert_eq!(codebook.char_for("0"), Some('a'));
        assert_eq!(codebook.len(), 2);
    }

    #[test]
    fn unmatched_tokens_follow_policy() {
        let codebook = codebook_for("aabb");
        let dropped = codebook
            .decode_tokens(["0", "11", "1"], UnmatchedPolicy::Drop)
            .unwrap();
        assert_eq!(dropped, "ba");

        let err = codebook
            .decode_tokens(["0", "11", "1"], UnmatchedPolicy::Fail)
            .unwrap_err();
        assert!(matches!(err, CodecError::UnmatchedToken { position: 1, .. }));
    }

    #[test]
    fn encoded_bits_weights_codes_by_count() {
        let freq = FreqTable::from_line("aaabbc");
        let codebook = codebook_for("aaabbc");
        // a:3*1 + b:2*2 + c:1*2
        assert_eq!(codebook.encoded_bits(&freq), 9);
    }
}
