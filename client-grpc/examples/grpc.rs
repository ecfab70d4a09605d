//! gRPC client implementation

use neuro_monitor_client_grpc::prelude::*;

/// Example neuro-monitor-client-grpc
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let host = std::env::var("SERVER_HOST_GRPC").unwrap_or_else(|_| String::from("127.0.0.1"));
    let port = std::env::var("SERVER_PORT_GRPC")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(8080);

    let connection = NeuroGrpcClient::new_client(&host, port, "neuro")?;
    println!("Connection created");
    println!(
        "NOTE: Ensure the server is running on {} or this example will fail.",
        connection.get_address()
    );

    let response = connection.status().await?;

    println!("RESPONSE={:?}", response);

    Ok(())
}
