//! Pricing contract types.
//!
//! These mirror what the rate service returns for a `(hotel ids, in date, out date)`
//! request. The search flow only reads [`RatePlan::hotel_id`]; the remaining fields
//! are carried through for callers that want them.

use serde::{Deserialize, Serialize};

/// A room offer attached to a rate plan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoomType {
    pub bookable_rate: f64,
    pub total_rate: f64,
    pub total_rate_inclusive: f64,
    pub code: String,
    pub currency: String,
    pub room_description: String,
}

/// A rate plan for one hotel over a stay.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RatePlan {
    pub hotel_id: String,
    pub code: String,
    /// Check-in date, `YYYY-MM-DD`
    pub in_date: String,
    /// Check-out date, `YYYY-MM-DD`
    pub out_date: String,
    #[serde(default)]
    pub room_type: Option<RoomType>,
}

impl RatePlan {
    /// Minimal plan carrying only the identifying fields.
    pub fn new(
        hotel_id: impl Into<String>,
        in_date: impl Into<String>,
        out_date: impl Into<String>,
    ) -> Self {
        Self {
            hotel_id: hotel_id.into(),
            in_date: in_date.into(),
            out_date: out_date.into(),
            ..Self::default()
        }
    }

    pub fn with_room_type(mut self, room_type: RoomType) -> Self {
        self.room_type = Some(room_type);
        self
    }
}
