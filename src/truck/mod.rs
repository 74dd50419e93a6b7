//! The truck calculator, which saves a trip's revenue as an income.

mod core;
mod endpoints;
mod page;

pub use core::{TruckForm, TruckTrip};
pub use endpoints::{create_truck_revenue_endpoint, truck_preview_endpoint};
pub use page::get_truck_calculator_page;
