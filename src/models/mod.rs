pub mod place;
pub mod reservation;
pub mod restaurant;
