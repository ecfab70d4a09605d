//! Mock data and a stub service for tests

use crate::client::neuro_server::Neuro;
use crate::client::StatusReply;
use tonic::{Request, Response, Status};

/// Returns the reply used throughout the tests
pub fn status_reply() -> StatusReply {
    StatusReply {
        num_iter: 5,
        top_score: 0.42,
        top_individual: String::from("seed-7"),
    }
}

/// Stub `Neuro` service answering every status request with the same reply
#[derive(Debug, Clone)]
pub struct StubNeuro {
    /// reply handed out for each request
    pub reply: StatusReply,
}

impl Default for StubNeuro {
    fn default() -> Self {
        Self {
            reply: status_reply(),
        }
    }
}

#[tonic::async_trait]
impl Neuro for StubNeuro {
    async fn status(&self, _request: Request<()>) -> Result<Response<StatusReply>, Status> {
        grpc_info!("(status) (MOCK) neuro server.");
        Ok(Response::new(self.reply.clone()))
    }
}
