//! Exposes neuroevolution run gRPC client functions
//!
//! The `client` module is generated from `proto/neuroevolution.proto` and
//! checked in, so building this crate does not require `protoc`.

#[macro_use]
pub mod macros;
#[cfg(feature = "mock")]
pub mod mock;
pub mod prelude;

/// Client Library: Client Functions, Structs
pub mod client {
    #![allow(unused_qualifications)]
    include!("grpc.rs");
}

use client::neuro_client::NeuroClient;
use client::StatusReply;
use snafu::prelude::*;
use tonic::transport::{Channel, Endpoint};

/// Errors raised while talking to the remote service
#[derive(Debug, Snafu)]
pub enum RpcError {
    /// The address could not be turned into a channel.
    #[snafu(display("Could not build a channel for {address}: {source}"))]
    InvalidEndpoint {
        /// address the channel was built for
        address: String,
        /// transport error
        source: tonic::transport::Error,
    },

    /// The remote call failed (connection refused, timeout, server error).
    #[snafu(display("Request to {address} failed: {source}"))]
    Request {
        /// address of the remote service
        address: String,
        /// status returned by tonic
        source: tonic::Status,
    },
}

/// Service clients that can be built on top of a [`Channel`]
pub trait ClientConnect: Clone {
    /// Wrap the given channel
    fn with_channel(channel: Channel) -> Self;
}

impl ClientConnect for NeuroClient<Channel> {
    fn with_channel(channel: Channel) -> Self {
        NeuroClient::new(channel)
    }
}

/// Getters shared by all gRPC client wrappers
pub trait Client<T> {
    /// Name of the remote service, used in log messages
    fn get_name(&self) -> &str;

    /// Full address (`http://host:port`) of the remote service
    fn get_address(&self) -> &str;

    /// A handle to the service client. Clones share the same channel.
    fn get_client(&self) -> T;
}

/// A named service client on a lazily connected, insecure channel
#[derive(Debug, Clone)]
pub struct GrpcClient<T> {
    inner: T,
    address: String,
    name: String,
}

impl<T: ClientConnect> GrpcClient<T> {
    /// Builds the channel to `http://{host}:{port}`.
    ///
    /// No connection is attempted here: network errors are reported by the
    /// first call. Must be called from within a tokio runtime.
    pub fn new_client(host: &str, port: u16, name: &str) -> Result<Self, RpcError> {
        let address = format!("http://{host}:{port}");
        grpc_debug!("(new_client) {} client for {}.", name, address);

        let endpoint = Endpoint::from_shared(address.clone()).context(InvalidEndpointSnafu {
            address: address.clone(),
        })?;

        Ok(Self {
            inner: T::with_channel(endpoint.connect_lazy()),
            address,
            name: name.to_owned(),
        })
    }
}

impl<T: ClientConnect> Client<T> for GrpcClient<T> {
    fn get_name(&self) -> &str {
        &self.name
    }

    fn get_address(&self) -> &str {
        &self.address
    }

    fn get_client(&self) -> T {
        self.inner.clone()
    }
}

impl GrpcClient<NeuroClient<Channel>> {
    /// Requests the current status of the run.
    pub async fn status(&self) -> Result<StatusReply, RpcError> {
        grpc_info!("(status) {} client.", self.name);

        let response = self
            .get_client()
            .status(tonic::Request::new(()))
            .await
            .map_err(|e| {
                grpc_error!("(status) request to {} failed: {}", self.address, e);
                e
            })
            .context(RequestSnafu {
                address: self.address.clone(),
            })?;

        Ok(response.into_inner())
    }
}
