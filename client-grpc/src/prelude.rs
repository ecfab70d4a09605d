//! Re-export of used objects

pub use super::client as neuro;
pub use super::{Client, ClientConnect, GrpcClient, RpcError};
pub use neuro::neuro_client::NeuroClient;
pub use neuro::StatusReply;

/// Client for the neuroevolution run service on a [`tonic::transport::Channel`]
pub type NeuroGrpcClient = GrpcClient<NeuroClient<tonic::transport::Channel>>;
