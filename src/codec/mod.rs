use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::bitstreams::{BitReader, BitWriter};
use crate::huffman::CodeTable;
use crate::properties::Properties;
use crate::{HuffmanError, HuffmanTree};

/// Concatenates the code of every input byte into an MSB-first bit stream,
/// zero-padded to the next byte boundary. Returns the padded payload along
/// with the number of meaningful bits, which the caller must persist for
/// the padding to be skippable on decompression.
pub fn pack(data: &[u8], table: &CodeTable) -> Result<(Box<[u8]>, u64), HuffmanError> {
    let mut writer = BitWriter::new();

    for &byte in data.iter() {
        let code = table.get(&byte).ok_or(HuffmanError::UnknownSymbol(byte))?;
        if code.len == 0 || code.len > 64 {
            return Err(HuffmanError::CorruptStream);
        }
        writer.push_bits(code.bits, code.len as u64);
    }

    let payload_bits = writer.written_bits as u64;
    Ok((writer.build(), payload_bits))
}

#[derive(Debug, Clone, Copy, Default)]
struct TrieNode {
    children: [Option<usize>; 2],
    symbol: Option<u8>,
}

/// Prefix trie over a code table. Decoding walks one node per payload bit
/// and emits a symbol each time it lands on a leaf, so a stream of n bits
/// resolves in O(n) regardless of the table size.
pub struct Decoder {
    nodes: Vec<TrieNode>,
}

impl Decoder {
    /// Builds the trie, rejecting tables that are not prefix-free: a code
    /// passing through or stopping on another code's leaf can never have
    /// come out of a prefix tree. Code lengths outside 1..=64 cannot have
    /// come out of one either (the table artifact is untrusted input).
    pub fn from_table(table: &CodeTable) -> Result<Self, HuffmanError> {
        let mut nodes = vec![TrieNode::default()];

        for (&byte, code) in table.iter() {
            if code.len == 0 || code.len > 64 {
                return Err(HuffmanError::CorruptStream);
            }

            let mut at = 0;
            for i in (0..code.len).rev() {
                if nodes[at].symbol.is_some() {
                    return Err(HuffmanError::CorruptStream);
                }

                let bit = ((code.bits >> i) & 1) as usize;
                let next = nodes[at].children[bit];
                at = match next {
                    Some(next) => next,
                    None => {
                        let id = nodes.len();
                        nodes.push(TrieNode::default());
                        nodes[at].children[bit] = Some(id);
                        id
                    }
                };
            }

            if nodes[at].symbol.is_some() || nodes[at].children.iter().any(Option::is_some) {
                return Err(HuffmanError::CorruptStream);
            }
            nodes[at].symbol = Some(byte);
        }

        Ok(Decoder { nodes })
    }

    /// Resolves exactly `payload_bits` bits of `payload` back into bytes.
    /// Fails if a bit sequence leaves the trie, if the meaningful bits end
    /// in the middle of a code, or if `payload_bits` overruns the buffer.
    pub fn unpack(&self, payload: &[u8], payload_bits: u64) -> Result<Vec<u8>, HuffmanError> {
        let mut reader = BitReader::new(payload.to_vec().into_boxed_slice());

        if payload_bits > reader.len_bits() as u64 {
            return Err(HuffmanError::CorruptStream);
        }

        let mut output = Vec::new();
        let mut at = 0;

        for _ in 0..payload_bits {
            let bit = reader.read_bit().ok_or(HuffmanError::CorruptStream)? as usize;
            at = self.nodes[at].children[bit].ok_or(HuffmanError::CorruptStream)?;

            if let Some(byte) = self.nodes[at].symbol {
                output.push(byte);
                at = 0;
            }
        }

        if at != 0 {
            return Err(HuffmanError::CorruptStream);
        }

        Ok(output)
    }
}

fn read_artifact(name: &str) -> Result<Vec<u8>, HuffmanError> {
    fs::read(name).map_err(|e| match e.kind() {
        ErrorKind::NotFound => HuffmanError::MissingArtifact(PathBuf::from(name)),
        _ => HuffmanError::IO(e),
    })
}

/// Stores the code table as `{basename}.table`, bincode-serialized.
pub fn save_code_table(table: &CodeTable, basename: &str) -> Result<(), HuffmanError> {
    let bytes =
        bincode::serialize(table).map_err(|e| std::io::Error::new(ErrorKind::Other, e))?;
    fs::write(format!("{}.table", basename), bytes)?;
    Ok(())
}

pub fn load_code_table(basename: &str) -> Result<CodeTable, HuffmanError> {
    let bytes = read_artifact(&format!("{}.table", basename))?;
    bincode::deserialize(&bytes).map_err(|_| HuffmanError::CorruptStream)
}

/// Stores the payload metadata as `{basename}.properties`, in JSON.
pub fn save_properties(props: &Properties, basename: &str) -> Result<(), HuffmanError> {
    let json =
        serde_json::to_string(props).map_err(|e| std::io::Error::new(ErrorKind::Other, e))?;
    fs::write(format!("{}.properties", basename), json)?;
    Ok(())
}

pub fn load_properties(basename: &str) -> Result<Properties, HuffmanError> {
    let bytes = read_artifact(&format!("{}.properties", basename))?;
    serde_json::from_slice(&bytes).map_err(|_| HuffmanError::CorruptStream)
}

/// Compresses the file at `source`, writing the packed payload to `dest`
/// and the artifacts needed to decompress it to `{dest}.table` and
/// `{dest}.properties`. Everything is materialized in memory before the
/// first write, so a failure never leaves a truncated payload behind.
pub fn compress(source: &str, dest: &str) -> Result<(), HuffmanError> {
    let data = fs::read(source)?;

    let tree = HuffmanTree::from_bytes(&data)?;
    let table = tree.code_table();
    let (payload, payload_bits) = pack(&data, &table)?;

    let props = Properties {
        original_len: data.len() as u64,
        payload_bits,
        symbols: table.len(),
    };

    save_code_table(&table, dest)?;
    save_properties(&props, dest)?;
    fs::write(dest, &payload)?;

    Ok(())
}

/// Reads the payload at `source` and its sidecar artifacts, and writes the
/// reconstructed bytes to `dest`. Any disagreement between the three files
/// surfaces as an error; symbols are never silently substituted.
pub fn decompress(source: &str, dest: &str) -> Result<(), HuffmanError> {
    let payload = read_artifact(source)?;
    let table = load_code_table(source)?;
    let props = load_properties(source)?;

    if props.symbols != table.len() {
        return Err(HuffmanError::CorruptStream);
    }

    let decoder = Decoder::from_table(&table)?;
    let data = decoder.unpack(&payload, props.payload_bits)?;

    if data.len() as u64 != props.original_len {
        return Err(HuffmanError::CorruptStream);
    }

    fs::write(dest, &data)?;

    Ok(())
}
