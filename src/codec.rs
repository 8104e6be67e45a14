use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, info};

use crate::codebook::{Codebook, DELIMITER, FIELD_SEPARATOR, strip_line_ending};
use crate::config::DecodeOptions;
use crate::error::{CodecError, Result};
use crate::freq::FreqTable;
use crate::huffman::build_huffman_tree;

/// Result of encoding one line: the codebook plus one code token per input
/// character, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub frequencies: FreqTable,
    pub codebook: Codebook,
    pub stream: Vec<String>,
}

impl Encoded {
    /// Writes the codebook, the delimiter line, then the message line with
    /// every token followed by a tab.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.codebook.write_to(writer)?;
        writeln!(writer, "{}", DELIMITER)?;
        for token in &self.stream {
            write!(writer, "{}{}", token, FIELD_SEPARATOR)?;
        }
        Ok(())
    }

    /// The same document [`Encoded::write_to`] produces, as a `String`.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for entry in self.codebook.entries() {
            text.push(entry.ch);
            text.push(FIELD_SEPARATOR);
            text.push_str(&entry.code);
            text.push('\n');
        }
        text.push_str(DELIMITER);
        text.push('\n');
        for token in &self.stream {
            text.push_str(token);
            text.push(FIELD_SEPARATOR);
        }
        text
    }

    /// Mean code length per input character, in bits.
    pub fn average_code_length(&self) -> f64 {
        let total = self.frequencies.total();
        if total == 0 {
            return 0.0;
        }
        self.codebook.encoded_bits(&self.frequencies) as f64 / total as f64
    }
}

pub fn encode(line: &str) -> Result<Encoded> {
    let frequencies = FreqTable::from_line(line);

    let codebook = match build_huffman_tree(&frequencies) {
        Some(root) => Codebook::from_tree(&root)?,
        None => {
            debug!("Empty input, nothing to encode");
            Codebook::new()
        }
    };

    let mut stream = Vec::with_capacity(line.len());
    for ch in line.chars() {
        let code = codebook
            .code_for(ch)
            .ok_or(CodecError::BrokenTree { ch })?;
        stream.push(code.to_string());
    }
    debug!(
        "Encoded {} characters with {} codebook entries",
        stream.len(),
        codebook.len()
    );

    Ok(Encoded {
        frequencies,
        codebook,
        stream,
    })
}

/// Splits the encoded message into code tokens.
///
/// Every token is terminated by a tab, so an empty tab-terminated token is
/// the empty code. Other whitespace inside a token separates tokens as well.
pub fn tokenize(message: &str) -> Vec<&str> {
    let message = message.trim_end_matches(['\r', '\n']);
    let mut tokens = Vec::new();
    for field in message.split_terminator(FIELD_SEPARATOR) {
        let before = tokens.len();
        tokens.extend(field.split_whitespace());
        if tokens.len() == before {
            tokens.push("");
        }
    }
    tokens
}

pub fn decode(codebook: &Codebook, message: &str, options: &DecodeOptions) -> Result<String> {
    let tokens = tokenize(message);
    debug!("Decoding {} code tokens", tokens.len());
    codebook.decode_tokens(tokens, options.unmatched)
}

/// Decodes a complete encoded document: codebook, delimiter, message.
pub fn decode_from<R: BufRead>(mut reader: R, options: &DecodeOptions) -> Result<String> {
    let codebook = Codebook::read_from(&mut reader)?;
    let mut message = String::new();
    reader.read_to_string(&mut message)?;
    decode(&codebook, &message, options)
}

/// Reads the first line of `path` without its line ending. An empty file
/// reads as an empty line.
pub fn read_source_line(path: &Path) -> Result<String> {
    let unreadable = |source: std::io::Error| CodecError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(unreadable)?;
    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(unreadable)?;
    let len = strip_line_ending(&line).len();
    line.truncate(len);
    Ok(line)
}

fn create_sink(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|source| CodecError::SinkUncreatable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

/// Encodes the first line of `input` into `output`. The sink is only
/// created once encoding has succeeded.
pub fn encode_file(input: &Path, output: &Path) -> Result<Encoded> {
    info!("Reading source file: {}", input.display());
    let line = read_source_line(input)?;
    let encoded = encode(&line)?;

    info!("Writing encoded output to file: {}", output.display());
    let mut writer = create_sink(output)?;
    encoded.write_to(&mut writer)?;
    writer.flush()?;
    Ok(encoded)
}

/// Decodes the encoded document at `input` and writes the recovered text to
/// `output`. The sink is only created once decoding has succeeded.
pub fn decode_file(input: &Path, output: &Path, options: &DecodeOptions) -> Result<String> {
    info!("Reading encoded file: {}", input.display());
    let document = fs::read_to_string(input).map_err(|source| CodecError::SourceUnreadable {
        path: input.to_path_buf(),
        source,
    })?;
    let text = decode_from(document.as_bytes(), options)?;

    info!("Writing decoded output to file: {}", output.display());
    let mut writer = create_sink(output)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(text)
}
