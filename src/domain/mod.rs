// Domain layer: models and ports. Adapters and the web layer depend on this, never the reverse.

pub mod model;
pub mod ports;
