use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::api::{BookingRepository, DoctorRepository, PatientRepository};
use crate::app_state::AppState;
use crate::chat::{ChatSession, ChatTransport, ChatUser};
use crate::error::AppResult;
use crate::http::ApiClient;
use crate::identity::IdentityProvider;
use crate::models::{Booking, BookingQuery};

/// Someone the user can open a conversation with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatContact {
    pub id: String,
    pub name: String,
    pub specialization: Option<String>,
    pub picture: Option<String>,
}

/// Open the chat screen between `user` and `peer_id`. The caller closes the
/// session when the screen goes away.
pub async fn open_conversation<I, C>(
    state: &AppState<I, C>,
    user: ChatUser,
    peer_id: &str,
) -> AppResult<ChatSession<C>>
where
    I: IdentityProvider,
    C: ChatTransport,
{
    ChatSession::open(
        Arc::clone(&state.chat),
        user,
        peer_id,
        &state.chat_config.channel_prefix,
    )
    .await
}

/// Doctors the patient has a confirmed booking with, in directory order.
pub async fn patient_chat_contacts(api: &ApiClient, patient_id: &str) -> AppResult<Vec<ChatContact>> {
    let bookings = BookingRepository::list(api, &BookingQuery::for_patient(patient_id)).await?;
    let doctor_ids = confirmed_peers(&bookings, |b| &b.doctor_id);
    if doctor_ids.is_empty() {
        return Ok(Vec::new());
    }

    let contacts: Vec<ChatContact> = DoctorRepository::list(api)
        .await?
        .into_iter()
        .filter(|d| doctor_ids.contains(d.doctor_id.as_str()))
        .map(|d| ChatContact {
            name: d.display_name(),
            id: d.doctor_id,
            specialization: Some(d.specialization),
            picture: d.picture,
        })
        .collect();
    info!(%patient_id, contacts = contacts.len(), "Loaded chat contacts");
    Ok(contacts)
}

/// Patients with a confirmed booking with the doctor, in directory order.
pub async fn doctor_chat_contacts(api: &ApiClient, doctor_id: &str) -> AppResult<Vec<ChatContact>> {
    let bookings = BookingRepository::list(api, &BookingQuery::for_doctor(doctor_id)).await?;
    let patient_ids = confirmed_peers(&bookings, |b| &b.patient_id);
    if patient_ids.is_empty() {
        return Ok(Vec::new());
    }

    let contacts: Vec<ChatContact> = PatientRepository::list(api)
        .await?
        .into_iter()
        .filter(|p| patient_ids.contains(p.patient_id.as_str()))
        .map(|p| ChatContact {
            name: p.full_name(),
            id: p.patient_id,
            specialization: None,
            picture: p.picture,
        })
        .collect();
    info!(%doctor_id, contacts = contacts.len(), "Loaded chat contacts");
    Ok(contacts)
}

fn confirmed_peers<'a>(
    bookings: &'a [Booking],
    peer: impl Fn(&'a Booking) -> &'a String,
) -> HashSet<&'a str> {
    bookings
        .iter()
        .filter(|b| b.is_confirmed())
        .map(|b| peer(b).as_str())
        .collect()
}
