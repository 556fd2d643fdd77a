// Domain layer: transfer models and the ports the adapters implement.

pub mod model;
pub mod ports;
