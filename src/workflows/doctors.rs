use tracing::info;

use crate::api::DoctorRepository;
use crate::error::AppResult;
use crate::http::ApiClient;
use crate::models::Doctor;

pub async fn load_doctors(api: &ApiClient) -> AppResult<Vec<Doctor>> {
    let doctors = DoctorRepository::list(api).await?;
    info!(count = doctors.len(), "Loaded doctors");
    Ok(doctors)
}

/// Case-insensitive substring match on "first last", narrowed to one
/// specialization when given. Blank filters match everything.
pub fn filter_doctors<'a>(
    doctors: &'a [Doctor],
    search: &str,
    specialization: Option<&str>,
) -> Vec<&'a Doctor> {
    let needle = search.trim().to_lowercase();
    let specialization = specialization.map(str::trim).filter(|s| !s.is_empty());
    doctors
        .iter()
        .filter(|d| needle.is_empty() || d.full_name().to_lowercase().contains(&needle))
        .filter(|d| specialization.map_or(true, |s| d.specialization == s))
        .collect()
}
