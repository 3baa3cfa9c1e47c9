// Domain layer: data model and the seams (storage, probing) the tools are written against.

pub mod model;
pub mod ports;
