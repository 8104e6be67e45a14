//! Decode policy and entry point argument resolution

use std::path::PathBuf;

pub const DEFAULT_SOURCE: &str = "testing.txt";
pub const DEFAULT_ENCODED: &str = "encrypted.txt";
pub const DEFAULT_RECOVERED: &str = "recovered.txt";

const STRICT_FLAG: &str = "--strict";

/// What the decoder does with a message token that has no codebook entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnmatchedPolicy {
    #[default]
    Drop,
    Fail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub unmatched: UnmatchedPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeInvocation {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl EncodeInvocation {
    /// Resolves paths from the arguments following the program name.
    /// Anything other than one or two arguments falls back to both defaults.
    pub fn from_args(args: &[String]) -> Self {
        let (input, output) = match args {
            [input] => (input.as_str(), DEFAULT_ENCODED),
            [input, output] => (input.as_str(), output.as_str()),
            _ => (DEFAULT_SOURCE, DEFAULT_ENCODED),
        };
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

impl Default for EncodeInvocation {
    fn default() -> Self {
        Self::from_args(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeInvocation {
    pub input: PathBuf,
    pub output: PathBuf,
    pub options: DecodeOptions,
}

impl DecodeInvocation {
    /// Like [`EncodeInvocation::from_args`], with `--strict` accepted anywhere
    /// to reject unmatched tokens.
    pub fn from_args(args: &[String]) -> Self {
        let mut options = DecodeOptions::default();
        let mut positional = Vec::with_capacity(args.len());
        for arg in args {
            if arg == STRICT_FLAG {
                options.unmatched = UnmatchedPolicy::Fail;
            } else {
                positional.push(arg.as_str());
            }
        }

        let (input, output) = match positional.as_slice() {
            [input] => (*input, DEFAULT_RECOVERED),
            [input, output] => (*input, *output),
            _ => (DEFAULT_ENCODED, DEFAULT_RECOVERED),
        };
        Self {
            input: input.into(),
            output: output.into(),
            options,
        }
    }
}

impl Default for DecodeInvocation {
    fn default() -> Self {
        Self::from_args(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn encode_defaults() {
        let inv = EncodeInvocation::default();
        assert_eq!(inv.input, PathBuf::from("testing.txt"));
        assert_eq!(inv.output, PathBuf::from("encrypted.txt"));
    }

    #[test]
    fn encode_single_argument_keeps_default_output() {
        let inv = EncodeInvocation::from_args(&args(&["in.txt"]));
        assert_eq!(inv.input, PathBuf::from("in.txt"));
        assert_eq!(inv.output, PathBuf::from("encrypted.txt"));
    }

    #[test]
    fn encode_too_many_arguments_fall_back_to_defaults() {
        let inv = EncodeInvocation::from_args(&args(&["a", "b", "c"]));
        assert_eq!(inv, EncodeInvocation::default());
    }

    #[test]
    fn decode_two_arguments() {
        let inv = DecodeInvocation::from_args(&args(&["enc.txt", "out.txt"]));
        assert_eq!(inv.input, PathBuf::from("enc.txt"));
        assert_eq!(inv.output, PathBuf::from("out.txt"));
        assert_eq!(inv.options.unmatched, UnmatchedPolicy::Drop);
    }

    #[test]
    fn decode_strict_flag_is_not_positional() {
        let inv = DecodeInvocation::from_args(&args(&["--strict", "enc.txt"]));
        assert_eq!(inv.input, PathBuf::from("enc.txt"));
        assert_eq!(inv.output, PathBuf::from("recovered.txt"));
        assert_eq!(inv.options.unmatched, UnmatchedPolicy::Fail);
    }

    #[test]
    fn decode_defaults() {
        let inv = DecodeInvocation::default();
        assert_eq!(inv.input, PathBuf::from("encrypted.txt"));
        assert_eq!(inv.output, PathBuf::from("recovered.txt"));
    }
}
