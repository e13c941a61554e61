//! Generated tonic/prost types for the Gymbros internal gRPC surface.

pub mod membership {
    tonic::include_proto!("membership");
}
