use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct VolunteerRequest {
    pub fullname: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
}
