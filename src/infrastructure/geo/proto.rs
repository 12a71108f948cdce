//! Wire messages of the `geo.Geo` service.
//!
//! Mirrors the service's protobuf schema; field tags must stay in sync with
//! the geo service deployment.

/// Request for resolving a street to grid coordinates
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetGeolocationRequest {
    #[prost(string, tag = "1")]
    pub street: ::prost::alloc::string::String,
}

/// A grid coordinate pair
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GeoLocation {
    #[prost(int32, tag = "1")]
    pub x: i32,
    #[prost(int32, tag = "2")]
    pub y: i32,
}

/// Response carrying the resolved coordinates
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetGeolocationResponse {
    #[prost(message, optional, tag = "1")]
    pub location: ::core::option::Option<GeoLocation>,
}

#[cfg(test)]
mod tests {
    use prost::Message;

    use super::*;

    #[test]
    fn test_request_round_trip() {
        let request = GetGeolocationRequest {
            street: "Baker Street".to_string(),
        };

        let bytes = request.encode_to_vec();
        let decoded = GetGeolocationRequest::decode(bytes.as_slice()).unwrap();

        assert_eq!(decoded, request);
    }

    #[test]
    fn test_response_round_trip() {
        let response = GetGeolocationResponse {
            location: Some(GeoLocation { x: 3, y: 8 }),
        };

        let bytes = response.encode_to_vec();
        let decoded = GetGeolocationResponse::decode(bytes.as_slice()).unwrap();

        assert_eq!(decoded, response);
    }
}
