//! Application core: pure domain logic, zero I/O.
//!
//! Classification, the decision rule, command application, and the serial
//! status protocol. Hardware is reached only through the **port traits**
//! in [`ports`], so everything here runs on the host.

pub mod actuation;
pub mod commands;
pub mod decision;
pub mod ports;
pub mod report;
pub mod shared;
pub mod state;
