// Domain layer: course models and the ports the presentation layer talks through.

pub mod model;
pub mod ports;
