//! Relay endpoint integration tests
//!
//! Drives the actix app end to end, with `wiremock` playing the image
//! provider and the style asset host.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{ConfigFactory, MultipartBody, TINY_PNG, b64_reply};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use plushy_relay::config::StyleReferenceConfig;
    use plushy_relay::server::server::HttpServer;
    use std::io::Write;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const EDITS_PATH: &str = "/v1/images/edits";

    fn plushy_post(body: MultipartBody) -> test::TestRequest {
        let (content_type, bytes) = body.build();
        test::TestRequest::post()
            .uri("/api/plushy")
            .insert_header(("content-type", content_type))
            .set_payload(bytes)
    }

    async fn mount_success(server: &MockServer, payload: &str) {
        Mock::given(method("POST"))
            .and(path(EDITS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(b64_reply(payload)))
            .expect(1)
            .mount(server)
            .await;
    }

    async fn provider_body(server: &MockServer) -> String {
        let received = server.received_requests().await.unwrap();
        let request = received
            .iter()
            .find(|r| r.url.path() == EDITS_PATH)
            .expect("provider was called");
        String::from_utf8_lossy(&request.body).to_string()
    }

    // ==================== Input validation ====================

    #[actix_web::test]
    async fn test_missing_file_returns_400_without_provider_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(EDITS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(b64_reply("unused")))
            .expect(0)
            .mount(&server)
            .await;

        let state = ConfigFactory::state(ConfigFactory::with_provider(&server.uri()));
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = plushy_post(MultipartBody::new().text("bg", "#FFFFFF")).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.headers().get("access-control-allow-origin").unwrap(), "*");
        assert_eq!(resp.headers().get("access-control-allow-headers").unwrap(), "content-type");
        let body = test::read_body(resp).await;
        assert_eq!(body, "No file uploaded");
    }

    #[actix_web::test]
    async fn test_oversized_payload_is_rejected() {
        let server = MockServer::start().await;
        let mut config = ConfigFactory::with_provider(&server.uri());
        config.relay.server.max_body_size = 16;
        let app = test::init_service(HttpServer::create_app(ConfigFactory::state(config))).await;

        let req = plushy_post(MultipartBody::new().file("logo.png", &[0u8; 64])).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    // ==================== Success path ====================

    #[actix_web::test]
    async fn test_success_returns_data_uri() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(EDITS_PATH))
            .and(header("authorization", "Bearer sk-test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(b64_reply("aGVsbG8=")))
            .expect(1)
            .mount(&server)
            .await;

        let state = ConfigFactory::state(ConfigFactory::with_provider(&server.uri()));
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = plushy_post(MultipartBody::new().file("logo.png", TINY_PNG)).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("access-control-allow-origin").unwrap(), "*");
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({"image": "data:image/png;base64,aGVsbG8="}));
    }

    #[actix_web::test]
    async fn test_defaults_reach_provider() {
        let server = MockServer::start().await;
        mount_success(&server, "aGVsbG8=").await;

        let state = ConfigFactory::state(ConfigFactory::with_provider(&server.uri()));
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = plushy_post(
            MultipartBody::new()
                .file("logo.png", TINY_PNG)
                .text("bg", "")
                .text("notes", "ignored"),
        )
        .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let body = provider_body(&server).await;
        assert!(body.contains("name=\"model\""));
        assert!(body.contains("gpt-image-1"));
        assert!(body.contains("#EAF2FF"));
        assert!(body.contains("1024x1024"));
        assert_eq!(body.matches("name=\"image[]\"").count(), 1);
        assert!(body.contains("filename=\"logo.png\""));
    }

    #[actix_web::test]
    async fn test_caller_values_reach_provider() {
        let server = MockServer::start().await;
        mount_success(&server, "aGVsbG8=").await;

        let state = ConfigFactory::state(ConfigFactory::with_provider(&server.uri()));
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = plushy_post(
            MultipartBody::new()
                .text("bg", "#112233")
                .text("size", "1536x1024")
                .file("brand.png", TINY_PNG),
        )
        .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let body = provider_body(&server).await;
        assert!(body.contains("#112233"));
        assert!(body.contains("1536x1024"));
        assert!(!body.contains("#EAF2FF"));
    }

    #[actix_web::test]
    async fn test_singular_image_field() {
        let server = MockServer::start().await;
        mount_success(&server, "aGVsbG8=").await;

        let mut config = ConfigFactory::with_provider(&server.uri());
        config.relay.provider.image_field = "image".to_string();
        let app = test::init_service(HttpServer::create_app(ConfigFactory::state(config))).await;

        let req = plushy_post(MultipartBody::new().file("logo.png", TINY_PNG)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let body = provider_body(&server).await;
        assert!(body.contains("name=\"image\""));
        assert!(!body.contains("name=\"image[]\""));
    }

    // ==================== Provider failures ====================

    #[actix_web::test]
    async fn test_missing_payload_returns_502() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(EDITS_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": [{"url": "x"}]})),
            )
            .mount(&server)
            .await;

        let state = ConfigFactory::state(ConfigFactory::with_provider(&server.uri()));
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = plushy_post(MultipartBody::new().file("logo.png", TINY_PNG)).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(test::read_body(resp).await, "No image returned");
    }

    #[actix_web::test]
    async fn test_provider_error_is_relayed() {
        let server = MockServer::start().await;
        let provider_error = r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#;
        Mock::given(method("POST"))
            .and(path(EDITS_PATH))
            .respond_with(ResponseTemplate::new(429).set_body_raw(provider_error, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let state = ConfigFactory::state(ConfigFactory::with_provider(&server.uri()));
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = plushy_post(MultipartBody::new().file("logo.png", TINY_PNG)).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(resp.headers().get("content-type").unwrap(), "application/json");
        assert_eq!(resp.headers().get("access-control-allow-origin").unwrap(), "*");
        assert_eq!(test::read_body(resp).await, provider_error);
    }

    #[actix_web::test]
    async fn test_empty_provider_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(EDITS_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let state = ConfigFactory::state(ConfigFactory::with_provider(&server.uri()));
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = plushy_post(MultipartBody::new().file("logo.png", TINY_PNG)).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(test::read_body(resp).await, "Provider error");
    }

    #[actix_web::test]
    async fn test_forbidden_returns_diagnostic() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(EDITS_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_raw(
                r#"{"error":{"message":"Your organization must be verified"}}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let state = ConfigFactory::state(ConfigFactory::with_provider(&server.uri()));
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = plushy_post(MultipartBody::new().file("logo.png", TINY_PNG)).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 403);
        assert!(body["error"].is_string());
        assert_eq!(body["likely_causes"].as_array().unwrap().len(), 3);
        assert_eq!(body["provider_message"], "Your organization must be verified");
    }

    #[actix_web::test]
    async fn test_unreachable_provider_returns_500() {
        let mut config = ConfigFactory::with_provider("http://127.0.0.1:1");
        config.relay.provider.timeout_secs = Some(10);
        let app = test::init_service(HttpServer::create_app(ConfigFactory::state(config))).await;

        let req = plushy_post(MultipartBody::new().file("logo.png", TINY_PNG)).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = test::read_body(resp).await;
        assert!(!body.is_empty());
    }

    #[actix_web::test]
    async fn test_deadline_returns_504() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(EDITS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(b64_reply("late"))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let mut config = ConfigFactory::with_provider(&server.uri());
        config.relay.provider.timeout_secs = Some(1);
        let app = test::init_service(HttpServer::create_app(ConfigFactory::state(config))).await;

        let req = plushy_post(MultipartBody::new().file("logo.png", TINY_PNG)).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(resp.headers().get("access-control-allow-origin").unwrap(), "*");
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("1 seconds"));
        assert_eq!(body["timeout_secs"], 1);
    }

    // ==================== Style reference ====================

    #[actix_web::test]
    async fn test_style_from_request_origin_goes_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/material_reference_2.jpeg"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(b"STYLEBYTES".to_vec(), "image/jpeg"))
            .expect(1)
            .mount(&server)
            .await;
        mount_success(&server, "aGVsbG8=").await;

        let config = ConfigFactory::with_style(&server.uri(), StyleReferenceConfig::from_origin());
        let app = test::init_service(HttpServer::create_app(ConfigFactory::state(config))).await;

        let req = plushy_post(MultipartBody::new().file("logo.png", b"LOGOBYTES"))
            .insert_header(("host", server.address().to_string()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let body = provider_body(&server).await;
        assert_eq!(body.matches("name=\"image[]\"").count(), 2);
        let style = body.find("STYLEBYTES").unwrap();
        let logo = body.find("LOGOBYTES").unwrap();
        assert!(style < logo);
    }

    #[actix_web::test]
    async fn test_style_fetch_failure_skips_provider() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/style.jpeg"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(EDITS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(b64_reply("unused")))
            .expect(0)
            .mount(&server)
            .await;

        let style = StyleReferenceConfig::remote_url(format!("{}/style.jpeg", server.uri()));
        let config = ConfigFactory::with_style(&server.uri(), style);
        let app = test::init_service(HttpServer::create_app(ConfigFactory::state(config))).await;

        let req = plushy_post(MultipartBody::new().file("logo.png", TINY_PNG)).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(test::read_body(resp).await, "Style reference not found");
    }

    #[actix_web::test]
    async fn test_local_style_reference() {
        let server = MockServer::start().await;
        mount_success(&server, "aGVsbG8=").await;

        let mut style_file = tempfile::NamedTempFile::new().unwrap();
        style_file.write_all(b"LOCALSTYLE").unwrap();

        let config = ConfigFactory::with_style(
            &server.uri(),
            StyleReferenceConfig::local(style_file.path()),
        );
        let app = test::init_service(HttpServer::create_app(ConfigFactory::state(config))).await;

        let req = plushy_post(MultipartBody::new().file("logo.png", TINY_PNG)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let body = provider_body(&server).await;
        assert!(body.contains("LOCALSTYLE"));
        assert!(body.contains("filename=\"style.jpeg\""));
    }

    // ==================== Preflight ====================

    #[actix_web::test]
    async fn test_preflight_ignores_request_content() {
        let server = MockServer::start().await;
        let state = ConfigFactory::state(ConfigFactory::with_provider(&server.uri()));
        let app = test::init_service(HttpServer::create_app(state)).await;

        let (content_type, bytes) = MultipartBody::new().file("logo.png", TINY_PNG).build();
        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/plushy")
            .insert_header(("content-type", content_type))
            .set_payload(bytes)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(resp.headers().get("access-control-allow-methods").unwrap(), "POST,OPTIONS");
        assert!(test::read_body(resp).await.is_empty());
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
