//! Due-date evaluation for maintenance reminders.
//!
//! All arithmetic is on calendar days: a date exactly N days away always
//! yields N regardless of the time of day the evaluation runs.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{
    DueNotice, MaintenanceCalendarEntry, MaintenanceCalendarResponse, MaintenanceStatus, Platoon,
    Vehicle,
};

/// Days up to which an upcoming maintenance counts as "this week".
pub const DUE_THIS_WEEK_DAYS: i64 = 7;

/// Whole days from `today` until `maintenance_date`.
///
/// Negative when overdue, zero when due today.
pub fn days_until(today: NaiveDate, maintenance_date: NaiveDate) -> i64 {
    maintenance_date.signed_duration_since(today).num_days()
}

/// Days until a vehicle's maintenance, or `None` if it has no date.
pub fn evaluate(today: NaiveDate, vehicle: &Vehicle) -> Option<i64> {
    vehicle
        .maintenance_date
        .map(|date| days_until(today, date))
}

/// Builds a notice for every vehicle whose day count is a threshold day.
pub fn due_notices(
    today: NaiveDate,
    vehicles: &[Vehicle],
    thresholds: &BTreeSet<i64>,
) -> Vec<DueNotice> {
    vehicles
        .iter()
        .filter_map(|vehicle| {
            let maintenance_date = vehicle.maintenance_date?;
            let days = days_until(today, maintenance_date);
            thresholds.contains(&days).then(|| DueNotice {
                vehicle_id: vehicle.id,
                vehicle_number: vehicle.vehicle_number.clone(),
                maintenance_date,
                days_until: days,
            })
        })
        .collect()
}

/// Classifies a day count for the maintenance calendar.
pub fn maintenance_status(days_until: Option<i64>) -> MaintenanceStatus {
    match days_until {
        None => MaintenanceStatus::NotScheduled,
        Some(days) if days < 0 => MaintenanceStatus::Overdue,
        Some(days) if days <= DUE_THIS_WEEK_DAYS => MaintenanceStatus::DueThisWeek,
        Some(_) => MaintenanceStatus::OnSchedule,
    }
}

/// Builds the maintenance calendar: soonest first, unscheduled vehicles last.
///
/// Entries carry the name of the vehicle's platoon when it is among `platoons`.
pub fn maintenance_calendar(
    today: NaiveDate,
    vehicles: &[Vehicle],
    platoons: &[Platoon],
) -> MaintenanceCalendarResponse {
    let platoon_name = |id: Option<Uuid>| {
        id.and_then(|id| platoons.iter().find(|p| p.id == id))
            .map(|p| p.name.clone())
    };

    let mut entries: Vec<MaintenanceCalendarEntry> = vehicles
        .iter()
        .map(|vehicle| {
            let days = evaluate(today, vehicle);
            MaintenanceCalendarEntry {
                vehicle_id: vehicle.id,
                vehicle_number: vehicle.vehicle_number.clone(),
                platoon_id: vehicle.platoon_id,
                platoon_name: platoon_name(vehicle.platoon_id),
                maintenance_date: vehicle.maintenance_date,
                days_until: days,
                status: maintenance_status(days),
            }
        })
        .collect();

    entries.sort_by(|a, b| match (a.maintenance_date, b.maintenance_date) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.vehicle_number.cmp(&b.vehicle_number)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.vehicle_number.cmp(&b.vehicle_number),
    });

    let overdue = entries
        .iter()
        .filter(|e| e.status == MaintenanceStatus::Overdue)
        .count();
    let due_this_week = entries
        .iter()
        .filter(|e| e.status == MaintenanceStatus::DueThisWeek)
        .count();

    MaintenanceCalendarResponse {
        today,
        entries,
        overdue,
        due_this_week,
    }
}
