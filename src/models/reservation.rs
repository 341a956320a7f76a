use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::Date;

pub const FIRST_SEATING_HOUR: u32 = 11;
pub const LAST_SEATING_HOUR: u32 = 22;
pub const MAX_PARTY_SIZE: u32 = 10;

/// Booking form as posted by the browser. Nothing here is ever stored.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct ReservationRequest {
    pub place_id: String,
    pub restaurant_name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub time: String,
    pub party_size: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub special_requests: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReservationConfirmation {
    pub place_id: String,
    pub restaurant: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub time: String,
    pub party_size: u32,
    pub redirect: String,
}

/// Seating times from 11:00 to 22:30 in half hour steps.
pub fn time_slots() -> Vec<String> {
    (FIRST_SEATING_HOUR..=LAST_SEATING_HOUR)
        .flat_map(|hour| ["00", "30"].map(|minute| format!("{}:{}", hour, minute)))
        .collect()
}

impl ReservationRequest {
    /// Checks the form the way the booking widget does. `today` is excluded,
    /// only later dates can be booked.
    pub fn confirm(&self, today: Date) -> Result<ReservationConfirmation, String> {
        let required = [
            &self.place_id,
            &self.restaurant_name,
            &self.date,
            &self.time,
            &self.name,
            &self.email,
            &self.phone,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err("Please fill in all required fields".to_string());
        }

        let date = Date::parse(self.date.trim(), format_description!("[year]-[month]-[day]"))
            .map_err(|_| format!("Invalid reservation date: {}", self.date))?;
        if date <= today {
            return Err("Reservation date must be in the future".to_string());
        }

        let time = self.time.trim();
        if !time_slots().iter().any(|slot| slot == time) {
            return Err(format!("{} is not an available time slot", time));
        }

        if self.party_size == 0 || self.party_size > MAX_PARTY_SIZE {
            return Err(format!("Party size must be between 1 and {}", MAX_PARTY_SIZE));
        }

        if !self.email.contains('@') {
            return Err("Please provide a valid email address".to_string());
        }

        let redirect = format!(
            "/reservations/confirmation?restaurant={}&date={}&time={}&party={}",
            urlencoding::encode(self.restaurant_name.trim()),
            date,
            urlencoding::encode(time),
            self.party_size,
        );

        Ok(ReservationConfirmation {
            place_id: self.place_id.trim().to_string(),
            restaurant: self.restaurant_name.trim().to_string(),
            date: date.to_string(),
            time: time.to_string(),
            party_size: self.party_size,
            redirect,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn booking() -> ReservationRequest {
        ReservationRequest {
            place_id: "p1".to_string(),
            restaurant_name: "Sushi & Co".to_string(),
            date: "2030-05-01".to_string(),
            time: "19:30".to_string(),
            party_size: 2,
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            phone: "0400 000 000".to_string(),
            special_requests: None,
        }
    }

    #[test]
    fn slots_cover_lunch_to_late_dinner() {
        let slots = time_slots();
        assert_eq!(slots.len(), 24);
        assert_eq!(slots.first().map(String::as_str), Some("11:00"));
        assert_eq!(slots.last().map(String::as_str), Some("22:30"));
    }

    #[test]
    fn confirms_valid_booking() {
        let confirmation = booking().confirm(date!(2030 - 04 - 30)).unwrap();
        assert_eq!(confirmation.date, "2030-05-01");
        assert_eq!(
            confirmation.redirect,
            "/reservations/confirmation?restaurant=Sushi%20%26%20Co&date=2030-05-01&time=19%3A30&party=2"
        );
    }

    #[test]
    fn today_cannot_be_booked() {
        let err = booking().confirm(date!(2030 - 05 - 01)).unwrap_err();
        assert_eq!(err, "Reservation date must be in the future");
    }

    #[test]
    fn rejects_incomplete_or_invalid_forms() {
        let today = date!(2030 - 01 - 01);

        let mut missing_phone = booking();
        missing_phone.phone = " ".to_string();
        assert_eq!(missing_phone.confirm(today).unwrap_err(), "Please fill in all required fields");

        let mut off_slot = booking();
        off_slot.time = "23:00".to_string();
        assert!(off_slot.confirm(today).is_err());

        let mut crowd = booking();
        crowd.party_size = 11;
        assert!(crowd.confirm(today).is_err());

        let mut bad_date = booking();
        bad_date.date = "01/05/2030".to_string();
        assert!(bad_date.confirm(today).is_err());
    }
}
