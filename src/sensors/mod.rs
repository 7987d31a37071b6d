//! Temperature sources: the board thermistor and a bench simulator.

pub mod simulated;
pub mod temperature;

pub use simulated::SimulatedThermometer;
pub use temperature::NtcThermistor;
