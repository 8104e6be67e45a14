use std::env;
use std::fs;

use log::{error, info};

use huffman_text_codec::{EncodeInvocation, encode_file};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let invocation = EncodeInvocation::from_args(&args);

    info!("--- Start Encoding ---");

    let encoded = match encode_file(&invocation.input, &invocation.output) {
        Ok(encoded) => encoded,
        Err(e) => {
            error!("Encoding failed: {}", e);
            println!("Unsuccessful");
            std::process::exit(1);
        }
    };

    let output_size = fs::metadata(&invocation.output)
        .map(|m| m.len())
        .unwrap_or(0);

    info!(
        "Encoded {} ({} characters, {} distinct) to {} ({} bytes)",
        invocation.input.display(),
        encoded.frequencies.total(),
        encoded.codebook.len(),
        invocation.output.display(),
        output_size
    );
    info!(
        "Entropy: {:.4} bits/symbol, average code length: {:.4} bits/symbol",
        encoded.frequencies.entropy(),
        encoded.average_code_length()
    );
    info!("--- End ---");
}
