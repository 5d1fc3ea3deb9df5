//! The three LDAP message schemas used by the bind exchange, each a fixed
//! tree of codec nodes mirroring its ASN.1 definition (RFC 4511 section 4.2).

use crate::ber::{AsnNode, BerCursor};
use crate::error::CodecError;

/// BindRequest ::= [APPLICATION 0] SEQUENCE { version, name, simple [0] }
///
/// The password rides as raw octets inside the `[0]` choice tag, so the
/// credential bytes themselves carry no framing of their own.
pub struct BindRequest {
    message: AsnNode,
}

impl BindRequest {
    pub fn new(message_id: i32, protocol_version: i32, username: &str, password: &[u8]) -> Self {
        let message = AsnNode::sequence(vec![
            AsnNode::integer_value(message_id),
            AsnNode::application(
                0,
                vec![
                    AsnNode::integer_value(protocol_version),
                    AsnNode::utf8_value(username),
                    AsnNode::choice(0, AsnNode::raw_value(password.to_vec())),
                ],
            ),
        ]);
        Self { message }
    }

    pub fn der(&self) -> Vec<u8> {
        self.message.der()
    }
}

/// BindResponse ::= [APPLICATION 1] SEQUENCE { resultCode, matchedDN, diagnosticMessage }
///
/// Built empty and populated in place by `decode`. Accessors return `None`
/// for fields the decoder never reached.
pub struct BindResponse {
    message: AsnNode,
}

impl BindResponse {
    pub fn new() -> Self {
        let message = AsnNode::sequence(vec![
            AsnNode::integer(),
            AsnNode::application(
                1,
                vec![AsnNode::enumerated(), AsnNode::utf8(), AsnNode::utf8()],
            ),
        ]);
        Self { message }
    }

    /// Consume one encoded BindResponse from the cursor, returning the
    /// number of bytes it occupied.
    pub fn decode(&mut self, cursor: &mut BerCursor) -> Result<usize, CodecError> {
        self.message.decode(cursor)
    }

    fn op_field(&self, index: usize) -> Option<&AsnNode> {
        self.message.child(1)?.child(index)
    }

    pub fn message_id(&self) -> Option<i32> {
        self.message.child(0)?.int_value()
    }

    pub fn result_code(&self) -> Option<i32> {
        self.op_field(0)?.int_value()
    }

    pub fn matched_dn(&self) -> Option<&str> {
        self.op_field(1)?.str_value()
    }

    pub fn diagnostic_message(&self) -> Option<&str> {
        self.op_field(2)?.str_value()
    }
}

impl Default for BindResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// UnbindRequest ::= [APPLICATION 2] NULL, rendered here as an empty
/// OCTET STRING the way the wire fixture expects.
pub struct UnbindRequest {
    message: AsnNode,
}

impl UnbindRequest {
    pub fn new(message_id: i32) -> Self {
        let message = AsnNode::sequence(vec![
            AsnNode::integer_value(message_id),
            AsnNode::application(2, vec![AsnNode::utf8_value("")]),
        ]);
        Self { message }
    }

    pub fn der(&self) -> Vec<u8> {
        self.message.der()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_hex(fixture: &str) -> Vec<u8> {
        fixture
            .split(':')
            .map(|pair| u8::from_str_radix(pair, 16).unwrap())
            .collect()
    }

    fn readable(bytes: &[u8]) -> String {
        bytes
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect::<Vec<_>>()
            .join(":")
    }

    #[test]
    fn test_der_encode_bind_request() {
        let request = BindRequest::new(1, 3, "username", b"password");
        assert_eq!(
            readable(&request.der()),
            "30:22:02:04:00:00:00:01:60:1a:02:04:00:00:00:03:04:08:75:73:65:72:6e:61:6d:65:80:08:70:61:73:73:77:6f:72:64"
        );
    }

    #[test]
    fn test_der_encode_unbind_request() {
        let request = UnbindRequest::new(2);
        assert_eq!(
            readable(&request.der()),
            "30:0a:02:04:00:00:00:02:62:02:04:00"
        );
    }

    #[test]
    fn test_decode_successful_bind_response() {
        let bytes =
            from_hex("30:84:00:00:00:10:02:01:01:61:84:00:00:00:07:0a:01:00:04:00:04:00");
        let mut response = BindResponse::new();
        let mut cursor = BerCursor::new(&bytes);
        assert_eq!(response.decode(&mut cursor).unwrap(), bytes.len());

        assert_eq!(response.message_id(), Some(1));
        assert_eq!(response.result_code(), Some(0));
        assert_eq!(response.matched_dn(), Some(""));
        assert_eq!(response.diagnostic_message(), Some(""));
    }

    #[test]
    fn test_decode_invalid_credentials_bind_response() {
        // Active Directory style rejection: long-form lengths, resultCode 49,
        // NUL-terminated diagnostic text.
        let bytes = from_hex(
            "30:84:00:00:00:67:02:01:01:61:84:00:00:00:5e:0a:01:31:04:00:04:57:38:30:30:39:30:33:30:38:3a:20:4c:64:61:70:45:72:72:3a:20:44:53:49:44:2d:30:43:30:39:30:33:33:34:2c:20:63:6f:6d:6d:65:6e:74:3a:20:41:63:63:65:70:74:53:65:63:75:72:69:74:79:43:6f:6e:74:65:78:74:20:65:72:72:6f:72:2c:20:64:61:74:61:20:35:32:65:2c:20:76:65:63:65:00",
        );
        let mut response = BindResponse::new();
        let mut cursor = BerCursor::new(&bytes);
        assert_eq!(response.decode(&mut cursor).unwrap(), bytes.len());

        assert_eq!(response.message_id(), Some(1));
        assert_eq!(response.result_code(), Some(49));
        assert_eq!(response.matched_dn(), Some(""));
        assert_eq!(
            response.diagnostic_message(),
            Some("80090308: LdapErr: DSID-0C090334, comment: AcceptSecurityContext error, data 52e, vece\0")
        );
    }

    #[test]
    fn test_unparsed_response_fields_are_unset() {
        let response = BindResponse::new();
        assert_eq!(response.message_id(), None);
        assert_eq!(response.result_code(), None);
        assert_eq!(response.diagnostic_message(), None);

        // A zero-length outer sequence decodes but never reaches the leaves.
        let mut response = BindResponse::new();
        let mut cursor = BerCursor::new(&[0x30, 0x00]);
        assert_eq!(response.decode(&mut cursor).unwrap(), 2);
        assert_eq!(response.result_code(), None);
    }

    #[test]
    fn test_response_must_start_with_sequence_tag() {
        let mut response = BindResponse::new();
        let mut cursor = BerCursor::new(&[0x31, 0x00]);
        assert_eq!(
            response.decode(&mut cursor).unwrap_err(),
            CodecError::UnexpectedTag {
                expected: 0x30,
                actual: 0x31
            }
        );
    }

    #[test]
    fn test_response_with_stale_application_length() {
        // Application wrapper claims 8 content bytes but its children only
        // occupy 7; the padding byte keeps the outer sequence consistent.
        let bytes = from_hex(
            "30:10:02:04:00:00:00:01:61:08:0a:01:00:04:00:04:00:00",
        );
        let mut response = BindResponse::new();
        let mut cursor = BerCursor::new(&bytes);
        assert_eq!(
            response.decode(&mut cursor).unwrap_err(),
            CodecError::LengthMismatch {
                declared: 8,
                consumed: 7
            }
        );
    }
}
