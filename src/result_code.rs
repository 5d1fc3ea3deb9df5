//! LDAP result codes (RFC 4511 Appendix A) seen in bind responses.

pub const SUCCESS: i32 = 0;
pub const INVALID_CREDENTIALS: i32 = 49;

/// RFC 4511 name for a result code, for log lines and CLI output.
pub fn name(code: i32) -> &'static str {
    match code {
        0 => "success",
        1 => "operationsError",
        2 => "protocolError",
        7 => "authMethodNotSupported",
        8 => "strongerAuthRequired",
        32 => "noSuchObject",
        34 => "invalidDNSyntax",
        48 => "inappropriateAuthentication",
        49 => "invalidCredentials",
        50 => "insufficientAccessRights",
        51 => "busy",
        52 => "unavailable",
        53 => "unwillingToPerform",
        _ => "other",
    }
}
