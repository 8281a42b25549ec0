use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LogoutResponse {
    pub message: String,
    /// Whether the rental backend confirmed the logout
    pub backend_acknowledged: bool,
}
