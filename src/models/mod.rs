//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos del ledger: sesiones de
//! ocupación y el tarifario.

pub mod rate;
pub mod session;

pub use rate::{RateEntry, RateSchedule};
pub use session::{Session, VehicleId};
