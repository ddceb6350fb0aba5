//! These models represent the objects passed between the session, the completion
//! client and the providers
//!
//! - messages are what we send to a provider, always a system message followed by a user message
//! - provider responses are the raw replies, classified by the shape we found
//! - completion results are what the client hands back, either text or an error description
//! - slots name the configured model positions a session compares
pub mod completion;
pub mod message;
pub mod role;
pub mod slot;
