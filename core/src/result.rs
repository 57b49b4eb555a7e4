//! Protocol result codes and responses.
//!
//! Every termination path of a write operation maps to exactly one of these
//! codes. The requester receives exactly one response per request (or, for a
//! referral, the result plus a list of alternate locations).

use std::fmt;

/// System-maintained attribute names injected by the write path.
pub mod sys_attr {
    pub const CREATORS_NAME: &str = "creatorsName";
    pub const CREATE_TIMESTAMP: &str = "createTimestamp";
    pub const ENTRY_UUID: &str = "entryUUID";
    pub const MODIFIERS_NAME: &str = "modifiersName";
    pub const MODIFY_TIMESTAMP: &str = "modifyTimestamp";
}

/// The fixed protocol result surface of the write path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Success,
    ProtocolError,
    NoSuchAttributeType,
    ConstraintViolation,
    NoSuchObject,
    InvalidDnSyntax,
    InsufficientAccess,
    Busy,
    NamingViolation,
    NotAllowedOnNonLeaf,
    AlreadyExists,
    /// Generic store or internal fault.
    Other,
}

impl ResultCode {
    /// The numeric value carried on the wire.
    pub fn value(self) -> u8 {
        match self {
            ResultCode::Success => 0,
            ResultCode::ProtocolError => 2,
            ResultCode::NoSuchAttributeType => 16,
            ResultCode::ConstraintViolation => 19,
            ResultCode::NoSuchObject => 32,
            ResultCode::InvalidDnSyntax => 34,
            ResultCode::InsufficientAccess => 50,
            ResultCode::Busy => 51,
            ResultCode::NamingViolation => 64,
            ResultCode::NotAllowedOnNonLeaf => 66,
            ResultCode::AlreadyExists => 68,
            ResultCode::Other => 80,
        }
    }

    /// True only for the single success outcome.
    pub fn is_success(self) -> bool {
        self == ResultCode::Success
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResultCode::Success => "success",
            ResultCode::ProtocolError => "protocolError",
            ResultCode::NoSuchAttributeType => "noSuchAttributeType",
            ResultCode::ConstraintViolation => "constraintViolation",
            ResultCode::NoSuchObject => "noSuchObject",
            ResultCode::InvalidDnSyntax => "invalidDNSyntax",
            ResultCode::InsufficientAccess => "insufficientAccess",
            ResultCode::Busy => "busy",
            ResultCode::NamingViolation => "namingViolation",
            ResultCode::NotAllowedOnNonLeaf => "notAllowedOnNonLeaf",
            ResultCode::AlreadyExists => "alreadyExists",
            ResultCode::Other => "other",
        };
        f.write_str(name)
    }
}

/// The protocol reply for one write request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Result code for this request.
    pub code: ResultCode,
    /// Alternate locations for keys outside all local partitions.
    pub referrals: Vec<String>,
}

impl Response {
    /// A plain response carrying only a result code.
    pub fn code(code: ResultCode) -> Self {
        Self {
            code,
            referrals: Vec::new(),
        }
    }

    /// A referral response redirecting the requester elsewhere.
    pub fn referral(targets: Vec<String>) -> Self {
        Self {
            code: ResultCode::Success,
            referrals: targets,
        }
    }

    /// True if this response redirects rather than resolves.
    pub fn is_referral(&self) -> bool {
        !self.referrals.is_empty()
    }
}
