use std::time::Instant;

use clap::Parser;
use huffpack::codec;

#[derive(Parser, Debug)]
#[command(about = "Decompress a Huffman-compressed file using its code table and metadata artifacts")]
struct Args {
    /// The compressed file (its .table and .properties artifacts must sit next to it)
    source_name: String,
    /// The destination of the reconstructed file
    dest_name: String,
}

fn main() {
    let args = Args::parse();

    let comp_time = Instant::now();
    if let Err(e) = codec::decompress(&args.source_name, &args.dest_name) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    let comp_time = comp_time.elapsed().as_nanos() as f64;

    println!(
        "decompressed '{}' to '{}' in {}ns",
        args.source_name, args.dest_name, comp_time
    );
}
