//! Services module
//!
//! Este módulo contiene la lógica de negocio: el ledger de ocupación,
//! el motor de tarifas y el planificador que acumula las tarifas.

pub mod accrual_scheduler;
pub mod fee_engine;
pub mod ledger;

pub use accrual_scheduler::AccrualScheduler;
pub use fee_engine::FeeEngine;
pub use ledger::{OccupancyLedger, Settlement, SharedLedger};
