//! Static appointment data. The scheduling backend is not wired up yet, so every
//! screen that lists sessions reads from here.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFormat {
    Video,
    InPerson,
}

impl SessionFormat {
    pub fn label(&self) -> &'static str {
        match self {
            SessionFormat::Video => "Video session",
            SessionFormat::InPerson => "In person",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: &'static str,
    pub therapist_name: &'static str,
    pub client_name: &'static str,
    pub starts_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub format: SessionFormat,
    pub status: AppointmentStatus,
}

/// Times are relative to `now` so the split between upcoming and past stays stable.
pub fn sample_appointments(now: DateTime<Utc>) -> Vec<Appointment> {
    vec![
        Appointment {
            id: "apt-1",
            therapist_name: "Dr. Maya Chen",
            client_name: "Jordan Lee",
            starts_at: now + Duration::days(1) + Duration::hours(2),
            duration_minutes: 50,
            format: SessionFormat::Video,
            status: AppointmentStatus::Scheduled,
        },
        Appointment {
            id: "apt-2",
            therapist_name: "Dr. Maya Chen",
            client_name: "Sam Rivera",
            starts_at: now + Duration::days(3),
            duration_minutes: 50,
            format: SessionFormat::InPerson,
            status: AppointmentStatus::Scheduled,
        },
        Appointment {
            id: "apt-3",
            therapist_name: "Alex Morgan, LMFT",
            client_name: "Jordan Lee",
            starts_at: now + Duration::days(8),
            duration_minutes: 80,
            format: SessionFormat::Video,
            status: AppointmentStatus::Scheduled,
        },
        Appointment {
            id: "apt-4",
            therapist_name: "Dr. Maya Chen",
            client_name: "Jordan Lee",
            starts_at: now - Duration::days(6),
            duration_minutes: 50,
            format: SessionFormat::Video,
            status: AppointmentStatus::Completed,
        },
        Appointment {
            id: "apt-5",
            therapist_name: "Alex Morgan, LMFT",
            client_name: "Priya Patel",
            starts_at: now - Duration::days(13),
            duration_minutes: 50,
            format: SessionFormat::InPerson,
            status: AppointmentStatus::Cancelled,
        },
    ]
}

pub fn upcoming(appointments: &[Appointment], now: DateTime<Utc>) -> Vec<Appointment> {
    let mut list: Vec<_> = appointments
        .iter()
        .filter(|a| a.starts_at >= now && a.status == AppointmentStatus::Scheduled)
        .cloned()
        .collect();
    list.sort_by_key(|a| a.starts_at);
    list
}

pub fn past(appointments: &[Appointment], now: DateTime<Utc>) -> Vec<Appointment> {
    let mut list: Vec<_> = appointments
        .iter()
        .filter(|a| a.starts_at < now || a.status == AppointmentStatus::Cancelled)
        .cloned()
        .collect();
    list.sort_by_key(|a| std::cmp::Reverse(a.starts_at));
    list
}

pub fn format_slot(appointment: &Appointment) -> String {
    format!(
        "{} · {} min",
        appointment.starts_at.format("%a %b %-d, %H:%M UTC"),
        appointment.duration_minutes
    )
}
