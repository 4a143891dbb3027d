use image_book_finder::{
    ai::{MockKeywordClient, MockVisionClient},
    catalog::{CatalogService, MockCatalogClient, OpenLibraryClient},
    image::{ImageDetail, ImagePayload},
    models::{BookRecord, CatalogEntry, Config},
    pipeline::{Pipeline, PipelineServices},
    Error,
};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::io::Cursor;
use std::num::NonZeroUsize;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(16, 12, image::Rgb([200, 180, 90]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "choices": [{
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    }))
}

fn dune_docs() -> serde_json::Value {
    serde_json::json!({
        "docs": [{
            "title": "Dune",
            "author_name": ["Frank Herbert"],
            "first_publish_year": 1965,
            "edition_count": 120,
            "key": "OL1"
        }]
    })
}

fn config_for(openai: &MockServer, catalog: &MockServer) -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("OPENAI_API_KEY", "test-key".to_string()),
        ("OPENAI_BASE_URL", openai.uri()),
        ("CATALOG_BASE_URL", catalog.uri()),
        ("REQUEST_TIMEOUT_SECS", "5".to_string()),
    ]);
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

fn mock_pipeline(
    vision: MockVisionClient,
    keyword: MockKeywordClient,
    catalog: MockCatalogClient,
) -> Pipeline {
    Pipeline::with_services(
        PipelineServices {
            vision: Box::new(vision),
            keyword: Box::new(keyword),
            catalog: Box::new(catalog),
        },
        ImageDetail::Low,
        NonZeroUsize::new(5).unwrap(),
    )
}

#[tokio::test]
async fn test_catalog_lookup_maps_dune_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "Dune"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dune_docs()))
        .mount(&server)
        .await;

    let client = OpenLibraryClient::new_with_client(reqwest::Client::new())
        .with_base_url(server.uri());
    let books = client
        .search("Dune", NonZeroUsize::new(5).unwrap())
        .await
        .unwrap();

    assert_eq!(books.len(), 1);
    let book = &books[0];
    assert_eq!(book.title, "Dune");
    assert_eq!(book.author(), "Frank Herbert");
    assert_eq!(book.first_publish_year, Some(1965));
    assert_eq!(book.edition_count, Some(120));
    assert_eq!(book.catalog_id, "OL1");
}

#[tokio::test]
async fn test_full_pipeline_against_http_services() {
    let openai = MockServer::start().await;
    let catalog = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_string_contains("data:image/png;base64,"))
        .respond_with(completion("An orange desert planet with a giant sandworm."))
        .expect(1)
        .mount(&openai)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("extracts concise keywords"))
        .and(body_string_contains("giant sandworm"))
        .respond_with(completion("Dune"))
        .expect(1)
        .mount(&openai)
        .await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "Dune"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dune_docs()))
        .expect(1)
        .mount(&catalog)
        .await;

    let pipeline = Pipeline::from_config(&config_for(&openai, &catalog)).unwrap();
    let result = pipeline
        .run(Some(ImagePayload::from_bytes(png_bytes())))
        .await
        .unwrap();

    assert_eq!(result.keyword, "Dune");
    assert_eq!(
        result.books,
        vec![CatalogEntry::Book(BookRecord::new(
            Some("Dune".into()),
            Some(vec!["Frank Herbert".into()]),
            Some(1965),
            Some(120),
            Some("OL1".into()),
        ))]
    );
    assert!(result.summary_text.contains("**Top Books**:"));
    assert!(result.summary_text.contains("Frank Herbert"));
}

#[tokio::test]
async fn test_inference_outage_still_produces_result() {
    let openai = MockServer::start().await;
    let catalog = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(2)
        .mount(&openai)
        .await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "docs": []
        })))
        .expect(1)
        .mount(&catalog)
        .await;

    let pipeline = Pipeline::from_config(&config_for(&openai, &catalog)).unwrap();
    let result = pipeline
        .run(Some(ImagePayload::from_bytes(png_bytes())))
        .await
        .unwrap();

    assert!(result.keyword.starts_with("Error extracting keywords:"));
    assert!(result.books.is_empty());
    assert!(result.summary_text.ends_with("No books found."));
    assert!(result.summary_text.contains("Error analyzing image"));

    let requests = catalog.received_requests().await.unwrap();
    let query: HashMap<_, _> = requests[0].url.query_pairs().into_owned().collect();
    assert_eq!(query.get("q"), Some(&result.keyword));
}

#[tokio::test]
async fn test_catalog_outage_yields_error_row() {
    let openai = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(completion("Lighthouse"))
        .mount(&openai)
        .await;

    // Nothing listens on the discard port.
    let vars: HashMap<&str, String> = HashMap::from([
        ("OPENAI_API_KEY", "test-key".to_string()),
        ("OPENAI_BASE_URL", openai.uri()),
        ("CATALOG_BASE_URL", "http://127.0.0.1:9".to_string()),
    ]);
    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();

    let pipeline = Pipeline::from_config(&config).unwrap();
    let result = pipeline
        .run(Some(ImagePayload::from_bytes(png_bytes())))
        .await
        .unwrap();

    assert_eq!(result.keyword, "Lighthouse");
    assert_eq!(result.books.len(), 1);
    assert!(result.books[0].is_error());
    assert!(result.summary_text.contains("Error fetching data"));
}

#[tokio::test]
async fn test_missing_image_fails_before_any_call() {
    let vision = MockVisionClient::new();
    let keyword = MockKeywordClient::new();
    let catalog = MockCatalogClient::new();
    let pipeline = mock_pipeline(vision.clone(), keyword.clone(), catalog.clone());

    let err = pipeline.run(None).await.unwrap_err();

    assert!(matches!(err, Error::Input));
    assert_eq!(err.to_string(), "No image provided");
    assert_eq!(vision.get_call_count(), 0);
    assert_eq!(keyword.get_call_count(), 0);
    assert_eq!(catalog.get_call_count(), 0);
}

#[tokio::test]
async fn test_image_loaded_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("upload.png");
    std::fs::write(&image_path, png_bytes()).unwrap();

    let payload = ImagePayload::from_path(&image_path).await.unwrap();
    assert_eq!(payload.media_type(), "image/png");

    let vision = MockVisionClient::new();
    let pipeline = mock_pipeline(
        vision.clone(),
        MockKeywordClient::new().with_keyword("Sunflower".to_string()),
        MockCatalogClient::new(),
    );

    let result = pipeline.run(Some(payload)).await.unwrap();
    assert_eq!(result.keyword, "Sunflower");
    assert_eq!(vision.get_call_count(), 1);
}

#[tokio::test]
async fn test_every_valid_image_yields_summary() {
    let pipelines = [
        mock_pipeline(
            MockVisionClient::new().with_failure("down".to_string()),
            MockKeywordClient::new().with_failure("down".to_string()),
            MockCatalogClient::new().with_failure("down".to_string()),
        ),
        mock_pipeline(
            MockVisionClient::new(),
            MockKeywordClient::new(),
            MockCatalogClient::new(),
        ),
    ];

    for pipeline in &pipelines {
        let result = pipeline
            .run(Some(ImagePayload::from_bytes(png_bytes())))
            .await
            .unwrap();
        assert!(!result.summary_text.is_empty());
        assert!(result.summary_text.starts_with("**Extracted Keywords**:"));
    }
}

#[tokio::test]
async fn test_result_serializes_for_json_output() {
    let pipeline = mock_pipeline(
        MockVisionClient::new(),
        MockKeywordClient::new().with_keyword("Dune".to_string()),
        MockCatalogClient::new().with_failure("reset".to_string()),
    );

    let result = pipeline
        .run(Some(ImagePayload::from_bytes(png_bytes())))
        .await
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["keyword"], "Dune");
    assert_eq!(
        json["books"][0]["error"],
        "Error fetching data: Catalog error: reset"
    );
    assert!(json["summary_text"].as_str().unwrap().contains("Error"));
}
