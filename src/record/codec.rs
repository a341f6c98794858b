// Keyslot: Attribute blob codec
//
// The blob stored in the secure store is the JSON encoding of the attribute
// map. This is the only place values cross the serialization boundary.

use super::{AttributeMap, RecordError, MAX_NESTING_DEPTH};

/// Encode the map, refusing values too deep for `decode_attributes` to read back.
pub fn encode_attributes(attributes: &AttributeMap) -> Result<Vec<u8>, RecordError> {
    for (key, value) in attributes {
        let depth = value.depth();
        if depth > MAX_NESTING_DEPTH {
            return Err(RecordError::TooDeep {
                key: key.clone(),
                depth,
                limit: MAX_NESTING_DEPTH,
            });
        }
    }
    Ok(serde_json::to_vec(attributes)?)
}

pub fn decode_attributes(blob: &[u8]) -> Result<AttributeMap, RecordError> {
    Ok(serde_json::from_slice(blob)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::AttributeValue;

    #[test]
    fn test_empty_map_encodes_as_empty_object() {
        let blob = encode_attributes(&AttributeMap::new()).unwrap();
        assert_eq!(blob, b"{}");
    }

    #[test]
    fn test_encoding_is_key_ordered() {
        let mut attributes = AttributeMap::new();
        attributes.insert("zeta".to_string(), AttributeValue::Bool(true));
        attributes.insert("alpha".to_string(), AttributeValue::Bool(false));

        let blob = String::from_utf8(encode_attributes(&attributes).unwrap()).unwrap();
        let alpha = blob.find("alpha").unwrap();
        let zeta = blob.find("zeta").unwrap();
        assert!(alpha < zeta, "keys must be encoded in sorted order: {}", blob);
    }

    fn nested_array(depth: usize) -> AttributeValue {
        let mut value = AttributeValue::Bool(true);
        for _ in 1..depth {
            value = AttributeValue::Array(vec![value]);
        }
        value
    }

    #[test]
    fn test_deepest_allowed_value_decodes_back() {
        let mut attributes = AttributeMap::new();
        attributes.insert("deep".to_string(), nested_array(MAX_NESTING_DEPTH));

        let blob = encode_attributes(&attributes).unwrap();
        assert_eq!(decode_attributes(&blob).unwrap(), attributes);
    }

    #[test]
    fn test_encode_rejects_values_past_depth_limit() {
        let mut attributes = AttributeMap::new();
        attributes.insert("deep".to_string(), nested_array(MAX_NESTING_DEPTH + 1));

        match encode_attributes(&attributes).unwrap_err() {
            RecordError::TooDeep { key, depth, limit } => {
                assert_eq!(key, "deep");
                assert_eq!(depth, MAX_NESTING_DEPTH + 1);
                assert_eq!(limit, MAX_NESTING_DEPTH);
            }
            other => panic!("expected TooDeep, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_non_map_blob() {
        assert!(decode_attributes(b"[1, 2, 3]").is_err());
        assert!(decode_attributes(b"not json").is_err());
        assert!(decode_attributes(b"").is_err());
    }

    #[test]
    fn test_decode_rejects_untagged_values() {
        let err = decode_attributes(br#"{"username": "alice"}"#).unwrap_err();
        assert!(matches!(err, RecordError::Codec(_)));
    }

    #[test]
    fn test_decode_reads_tagged_values() {
        let blob = br#"{"remember": {"kind": "bool", "value": true}}"#;
        let attributes = decode_attributes(blob).unwrap();
        assert_eq!(attributes.get("remember"), Some(&AttributeValue::Bool(true)));
    }
}
