use serde::{Deserialize, Serialize};

/// Sidecar metadata written next to a compressed payload. `payload_bits`
/// records how many bits of the payload are meaningful, so trailing
/// zero-padding can never be misread as extra codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Properties {
    /// Length in bytes of the original, uncompressed input.
    pub original_len: u64,
    /// Number of meaningful bits in the packed payload, before padding.
    pub payload_bits: u64,
    /// Number of distinct symbols in the code table.
    pub symbols: usize,
}

#[test]
fn test_properties_json_round_trip() {
    let props = Properties {
        original_len: 11,
        payload_bits: 23,
        symbols: 5,
    };

    let json = serde_json::to_string(&props).unwrap();
    let parsed: Properties = serde_json::from_str(&json).unwrap();

    assert_eq!(props, parsed);
}
