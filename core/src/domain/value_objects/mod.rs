//! Value objects representing immutable domain concepts.

pub mod challenge;
pub mod otp_code;
pub mod phone_number;
pub mod profile_draft;


// Re-export commonly used types
pub use challenge::{ChallengeHandle, ProviderUserId};
pub use otp_code::OtpCode;
pub use phone_number::PhoneNumber;
pub use profile_draft::ProfileDraft;
