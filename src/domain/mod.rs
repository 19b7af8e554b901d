// Domain layer: catalogue models, label tables and ports. No HTTP here.

pub mod labels;
pub mod model;
pub mod ports;
