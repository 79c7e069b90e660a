//! Motor de tarifas
//!
//! Convierte tiempo transcurrido en importe usando la tarifa de facturación
//! (primera entrada del tarifario). No guarda estado propio: opera sobre
//! sesiones que el ledger ya validó.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{RateSchedule, Session};

/// Precisión de los segundos transcurridos: nanosegundos
const NANOS_SCALE: u32 = 9;
/// Precisión de respaldo para intervalos que no caben en i64 nanosegundos
const MICROS_SCALE: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeEngine {
    rate: Decimal,
}

impl FeeEngine {
    pub fn new(rate: Decimal) -> Self {
        Self { rate }
    }

    pub fn from_schedule(schedule: &RateSchedule) -> Self {
        Self::new(schedule.billing_rate())
    }

    /// Segundos entre `from` y `to`, recortados a cero si `to` es anterior
    pub fn elapsed_seconds(from: DateTime<Utc>, to: DateTime<Utc>) -> Decimal {
        if to <= from {
            return Decimal::ZERO;
        }

        let span = to - from;
        match span.num_nanoseconds() {
            Some(nanos) => Decimal::new(nanos, NANOS_SCALE),
            // más de ~292 años
            None => Decimal::new(span.num_microseconds().unwrap_or(i64::MAX), MICROS_SCALE),
        }
    }

    /// Importe de `elapsed` segundos; satura en `Decimal::MAX`
    fn charge(&self, elapsed: Decimal) -> Decimal {
        elapsed.saturating_mul(self.rate)
    }

    /// Acumula la tarifa desde la última acumulación hasta `now`
    ///
    /// Un `now` anterior a `last_accrual_instant` (reloj desfasado) no suma
    /// nada ni hace retroceder la marca de tiempo. El total satura en
    /// `Decimal::MAX` en lugar de desbordar. Devuelve el importe sumado.
    pub fn accrue(&self, session: &mut Session, now: DateTime<Utc>) -> Decimal {
        let elapsed = Self::elapsed_seconds(session.last_accrual_instant, now);
        if elapsed.is_zero() {
            return Decimal::ZERO;
        }

        let delta = self.charge(elapsed);
        session.accrued_fee = session.accrued_fee.saturating_add(delta);
        session.last_accrual_instant = now;
        delta
    }

    /// Importe actual sin redondear, sin modificar la sesión
    pub fn preview(&self, session: &Session, now: DateTime<Utc>) -> Decimal {
        let pending = self.charge(Self::elapsed_seconds(session.last_accrual_instant, now));
        session.accrued_fee.saturating_add(pending)
    }

    /// Liquidación final: una última acumulación y redondeo a unidades enteras
    ///
    /// Redondeo half-up (10.4 -> 10, 10.5 -> 11). El valor redondeado se
    /// devuelve pero no se guarda en la sesión.
    pub fn settle(&self, session: &mut Session, now: DateTime<Utc>) -> Decimal {
        self.accrue(session, now);
        round_fee(session.accrued_fee)
    }
}

/// Redondeo de facturación a la unidad monetaria entera más cercana
pub fn round_fee(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
