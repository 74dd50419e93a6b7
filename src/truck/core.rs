//! The revenue calculation for a single truck trip.

use serde::Deserialize;

use crate::amount_input::parse_amount_input;

/// The amounts of a truck trip, in whole Rupiah.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruckTrip {
    /// The payment for the outbound leg ("berangkat").
    pub outbound: i64,
    /// The payment for the return leg ("pulang").
    pub return_leg: i64,
    /// The allowance paid to the driver ("sangu supir").
    pub allowance: i64,
}

impl TruckTrip {
    /// Parse the amounts typed into the calculator, see [parse_amount_input].
    pub fn from_inputs(form: &TruckForm) -> Self {
        Self {
            outbound: parse_amount_input(&form.outbound),
            return_leg: parse_amount_input(&form.return_leg),
            allowance: parse_amount_input(&form.allowance),
        }
    }

    /// Whether every amount has been filled in with a number greater than zero.
    pub fn is_complete(&self) -> bool {
        self.outbound > 0 && self.return_leg > 0 && self.allowance > 0
    }

    /// The revenue of the trip: both legs minus the driver's allowance.
    ///
    /// May be zero or negative when the allowance is larger than the legs.
    pub fn revenue(&self) -> i64 {
        self.outbound + self.return_leg - self.allowance
    }
}

/// The form data of the truck calculator.
///
/// The amounts are kept as typed, e.g. "500,000".
#[derive(Debug, Default, Deserialize)]
pub struct TruckForm {
    #[serde(default)]
    pub outbound: String,
    #[serde(default)]
    pub return_leg: String,
    #[serde(default)]
    pub allowance: String,
    #[serde(default)]
    pub description: String,
}
