use std::env;

use log::{error, info};

use huffman_text_codec::{DecodeInvocation, decode_file};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let invocation = DecodeInvocation::from_args(&args);

    info!("--- Start Decoding ---");

    let text = match decode_file(&invocation.input, &invocation.output, &invocation.options) {
        Ok(text) => text,
        Err(e) => {
            error!("Decoding failed: {}", e);
            println!("Unsuccessful");
            std::process::exit(1);
        }
    };

    info!(
        "Recovered {} characters from {} into {}",
        text.chars().count(),
        invocation.input.display(),
        invocation.output.display()
    );
    info!("--- End ---");
}
