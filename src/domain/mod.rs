// Domain layer: models, ports (interfaces) and the comparison rule. No I/O here.

pub mod model;
pub mod ports;
pub mod rules;
