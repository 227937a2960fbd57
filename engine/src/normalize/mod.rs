// Per-field normalizers used while enriching launch records
pub mod country;
pub mod date;
pub mod price;

pub use country::{cold_war_country, normalize_country};
pub use date::{parse_launch_date, LaunchDate};
pub use price::normalize_price;
