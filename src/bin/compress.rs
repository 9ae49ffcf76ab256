use std::time::Instant;

use clap::Parser;
use huffpack::codec;

#[derive(Parser, Debug)]
#[command(about = "Compress a file with Huffman coding, writing the code table and metadata alongside")]
struct Args {
    /// The file to compress
    source_name: String,
    /// The destination of the compressed file
    dest_name: String,
}

fn main() {
    let args = Args::parse();

    let comp_time = Instant::now();
    if let Err(e) = codec::compress(&args.source_name, &args.dest_name) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    let comp_time = comp_time.elapsed().as_nanos() as f64;

    println!(
        "compressed '{}' to '{}' in {}ns",
        args.source_name, args.dest_name, comp_time
    );
}
