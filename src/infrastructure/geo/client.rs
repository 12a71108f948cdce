//! gRPC Geocoding Client
//!
//! Unary client for `geo.Geo/GetGeolocation` over one long-lived channel.
//! Plaintext credentials are acceptable on the trusted service network.

use std::time::Duration;

use async_trait::async_trait;
use tonic::client::Grpc;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Request};

use crate::domain::model::vo::Location;
use crate::domain::ports::{GeoClient, GeoClientError};

use super::proto::{GetGeolocationRequest, GetGeolocationResponse};

/// Hard ceiling on every geocoding call, independent of the caller deadline
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Geocoding client bound to the configured geo service host.
#[derive(Clone)]
pub struct GeoGrpcClient {
    grpc: Grpc<Channel>,
}

impl GeoGrpcClient {
    /// Create a client for the given host. The underlying connection is
    /// established lazily on the first call.
    pub fn connect(host: &str) -> Result<Self, GeoClientError> {
        if host.is_empty() {
            return Err(GeoClientError::Transport(
                "host must not be empty".to_string(),
            ));
        }

        let endpoint = Endpoint::from_shared(format!("http://{}", host))
            .map_err(|e| GeoClientError::Transport(e.to_string()))?;

        Ok(Self {
            grpc: Grpc::new(endpoint.connect_lazy()),
        })
    }

    async fn get_geolocation(
        &self,
        request: GetGeolocationRequest,
    ) -> Result<GetGeolocationResponse, GeoClientError> {
        let mut grpc = self.grpc.clone();

        let response = tokio::time::timeout(REQUEST_TIMEOUT, async move {
            grpc.ready()
                .await
                .map_err(|e| GeoClientError::Transport(e.to_string()))?;

            let codec: tonic_prost::ProstCodec<GetGeolocationRequest, GetGeolocationResponse> =
                tonic_prost::ProstCodec::default();
            let path = PathAndQuery::from_static("/geo.Geo/GetGeolocation");

            grpc.unary(Request::new(request), path, codec)
                .await
                .map_err(|status| match status.code() {
                    Code::DeadlineExceeded => GeoClientError::Timeout,
                    _ => GeoClientError::Transport(status.to_string()),
                })
        })
        .await
        .map_err(|_| GeoClientError::Timeout)??;

        Ok(response.into_inner())
    }
}

#[async_trait]
impl GeoClient for GeoGrpcClient {
    async fn get_location(&self, street: &str) -> Result<Location, GeoClientError> {
        let response = self
            .get_geolocation(GetGeolocationRequest {
                street: street.to_string(),
            })
            .await?;

        let location = response.location.ok_or_else(|| {
            GeoClientError::Transport("response carried no location".to_string())
        })?;

        // The service is trusted to answer in range, but the value object
        // still gets the last word
        Ok(Location::new(location.x, location.y)?)
    }
}
