use chrono::{DateTime, Utc};
use serde::Deserialize;

use models::{datetime, reservation};

use super::admission::{Booking, TimeSlot};
use crate::errors::ServiceError;

/// Create/update body. `id` is only meaningful on update.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationInput {
    #[serde(default)]
    pub id: Option<i32>,
    pub service_bay_id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    #[serde(deserialize_with = "datetime::flexible::deserialize")]
    pub start_time: DateTime<Utc>,
    #[serde(deserialize_with = "datetime::flexible::deserialize")]
    pub end_time: DateTime<Utc>,
}

impl ReservationInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(id) = self.id {
            reservation::validate_reference("id", id)?;
        }
        reservation::validate_reference("serviceBayId", self.service_bay_id)?;
        reservation::validate_reference("customerId", self.customer_id)?;
        reservation::validate_reference("vehicleId", self.vehicle_id)?;
        reservation::validate_window(&self.start_time, &self.end_time)?;
        Ok(())
    }

    pub(crate) fn candidate(&self, id: Option<i32>) -> Candidate {
        Candidate {
            id,
            service_bay_id: self.service_bay_id,
            slot: TimeSlot::new(self.start_time, self.end_time),
        }
    }
}

/// A validated reservation that has not been written yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub id: Option<i32>,
    pub service_bay_id: i32,
    pub slot: TimeSlot,
}

impl Booking for Candidate {
    fn booking_id(&self) -> Option<i32> { self.id }
    fn service_bay_id(&self) -> i32 { self.service_bay_id }
    fn slot(&self) -> TimeSlot { self.slot }
}

/// Result of a create or update that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReservationOutcome {
    Saved(reservation::Model),
    Conflicted(Vec<reservation::Model>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body() -> serde_json::Value {
        json!({
            "serviceBayId": 1,
            "customerId": 1,
            "vehicleId": 1,
            "startTime": "2024-06-14 08:00:00",
            "endTime": "2024-06-14T09:00:00Z"
        })
    }

    #[test]
    fn accepts_both_timestamp_forms() {
        let input: ReservationInput = serde_json::from_value(body()).unwrap();
        assert!(input.id.is_none());
        assert!(input.validate().is_ok());
        assert_eq!((input.end_time - input.start_time).num_minutes(), 60);
    }

    #[test]
    fn end_before_start_is_invalid() {
        let mut b = body();
        b["endTime"] = json!("2024-06-14 07:00");
        let input: ReservationInput = serde_json::from_value(b).unwrap();
        let err = input.validate().unwrap_err();
        assert!(err.to_string().contains("endTime must be after startTime"));
    }

    #[test]
    fn non_positive_references_are_invalid() {
        let mut b = body();
        b["vehicleId"] = json!(0);
        let input: ReservationInput = serde_json::from_value(b).unwrap();
        assert!(input.validate().is_err());

        let mut b = body();
        b["id"] = json!(-3);
        let input: ReservationInput = serde_json::from_value(b).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn unparsable_timestamp_fails_deserialization() {
        let mut b = body();
        b["startTime"] = json!("soon");
        assert!(serde_json::from_value::<ReservationInput>(b).is_err());
    }

    #[test]
    fn candidate_carries_the_given_id() {
        let input: ReservationInput = serde_json::from_value(body()).unwrap();
        let c = input.candidate(Some(9));
        assert_eq!(c.booking_id(), Some(9));
        assert_eq!(c.service_bay_id(), 1);
        assert_eq!(c.slot().start, input.start_time);
    }
}
