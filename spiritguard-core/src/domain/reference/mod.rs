pub mod cities;

pub use cities::{CityDirectory, CityLocation, Coordinates};
