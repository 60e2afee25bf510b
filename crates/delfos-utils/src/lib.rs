pub mod id_map;
pub mod net;
pub mod tracing;
