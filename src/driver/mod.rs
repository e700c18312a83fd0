//! DRV8462 register protocol.
//!
//! Register map, frame encoding, status decoding, the fault hook and the
//! device driver itself.

mod device;
mod fault;
pub mod registers;
mod status;

pub use device::Drv8462;
pub use fault::{FaultHandler, FaultKind, FaultReport, LogFaults};
pub use registers::reg;
pub use status::{Access, FaultRegister, FaultStatus, Response};
