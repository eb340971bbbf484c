//! Domain types for the departure board.
//!
//! Values here are validated at construction time, so code that receives
//! them can trust their shape.

mod departure;
mod stop;

pub use departure::{BICYCLE_CONVEYANCE_CODE, DepartureRecord, Remark};
pub use stop::{InvalidStopId, StopId};
