/// Caller identity proven by a verified bearer token.
///
/// Lives for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    /// Subject identifier carried in the token's `jti` claim
    pub subject_id: String,
    /// Display name carried in the token's `username` claim
    pub display_name: String,
}
