//! Async client for the French national geocoding API (Géoplateforme
//! geocodage service).
//!
//! Wraps the `search` and `reverse` endpoints: named parameters go out as a
//! GET query string, the JSON body comes back as a list of [`Feature`]
//! records or a typed [`Error`]. No caching, no retries; one reusable
//! `reqwest::Client` underneath.
//!
//! Docs: <https://geoservices.ign.fr/documentation/services/services-geoplateforme/geocodage>

pub mod address_api;
pub mod error;
pub mod models;

pub use address_api::{AddressAPIR, DEFAULT_LIMIT};
pub use error::{Error, Result};
pub use models::{Feature, ParamValue, Params};

pub trait AddressAPI {
    /// Query addresses matching `query`. `limit` defaults to
    /// [`DEFAULT_LIMIT`] unless `params` carries its own. Optional filter
    /// names understood by the service include `lat`, `lon`, `index`,
    /// `postcode`, `citycode`, `type`, `city`, `category`, `departmentcode`,
    /// `municipalitycode`, `oldmunicipalitycode`, `districtcode`, `section`,
    /// `number`, `sheet`, `returntruegeometry` and `autocomplete`; extra
    /// names are passed through unvalidated.
    fn search(
        &self,
        query: &str,
        params: Params,
    ) -> impl std::future::Future<Output = Result<Vec<Feature>>> + Send;

    /// Reverse geocode a location (usually `lat` + `lon`, optionally
    /// `searchgeom` and the same filters as [`AddressAPI::search`]) to the
    /// addresses around it.
    fn reverse(&self, params: Params) -> impl std::future::Future<Output = Result<Vec<Feature>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address_api::check_response;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_RESPONSE: &str = include_str!("testFeatures.json");

    fn test_body() -> serde_json::Value {
        serde_json::from_str(TEST_RESPONSE).expect("Parsing Failed")
    }

    #[test]
    fn test_parse() {
        let features = check_response(test_body()).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].label(), Some("10 Rue de Rivoli 75004 Paris"));
        assert_eq!(features[0].coordinates(), Some((2.358407, 48.855557)));
        assert!(features[0].score().unwrap() > features[1].score().unwrap());
    }

    fn api_for(server: &MockServer) -> AddressAPIR {
        AddressAPIR::with_base_url(server.uri(), reqwest::Client::new())
    }

    #[tokio::test]
    async fn search_returns_features() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "10 rue de Rivoli"))
            .and(query_param("limit", "5"))
            .and(query_param("postcode", "75004"))
            .respond_with(ResponseTemplate::new(200).set_body_json(test_body()))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server);
        let features = api
            .search(
                "10 rue de Rivoli",
                Params::new().set("limit", 5u32).set("postcode", "75004"),
            )
            .await
            .unwrap();

        assert_eq!(features.len(), 2);
        assert_eq!(features[0].label(), Some("10 Rue de Rivoli 75004 Paris"));
        api.close();
    }

    #[tokio::test]
    async fn search_applies_default_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Paris"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(test_body()))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server);
        api.search("Paris", Params::new()).await.unwrap();
    }

    #[tokio::test]
    async fn reverse_with_no_match_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .and(query_param("lat", "48.85"))
            .and(query_param("lon", "2.35"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"features": []})),
            )
            .mount(&server)
            .await;

        let api = api_for(&server);
        let err = api
            .reverse(Params::new().set("lat", 48.85).set("lon", 2.35))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(err.to_string(), "No addresses found for the given query.");
    }

    #[tokio::test]
    async fn error_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"error": "bad query"})),
            )
            .mount(&server)
            .await;

        let api = api_for(&server);
        let err = api.search("anything", Params::new()).await.unwrap_err();

        assert!(matches!(err, Error::InvalidResponse { .. }));
        assert_eq!(err.to_string(), "Error in response: bad query");
    }

    #[tokio::test]
    async fn transport_failure_maps_to_not_found_with_cause() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = api_for(&server);
        let err = api.reverse(Params::new().set("lat", 48.85)).await.unwrap_err();

        assert_eq!(err.to_string(), "Address not found.");
        let cause = std::error::Error::source(&err).expect("cause must be preserved");
        assert!(cause.to_string().contains("500"));
    }
}
