use clarity_gemini::types::image::PNG_DATA_URI_PREFIX;
use clarity_gemini::{Error, ImageSize};
use mockito::Matcher;
use serde_json::json;

use crate::mock_server::{image_reply, text_reply, MockServerFixture};

const MODEL: &str = "gemini-3-pro-image-preview";

#[tokio::test]
async fn test_generate_image_for_each_size() {
    let fixture = MockServerFixture::new().await;
    let client = fixture.client();

    for size in ImageSize::ALL {
        let mock = fixture
            .mock_generate(
                MODEL,
                Matcher::PartialJson(json!({
                    "generationConfig": {
                        "imageConfig": { "imageSize": size.as_str(), "aspectRatio": "16:9" }
                    }
                })),
                200,
                &image_reply("iVBORw0KGgo="),
            )
            .await;

        let uri = client.generate_image("A lighthouse at dusk", size).await.unwrap();
        assert!(uri.starts_with(PNG_DATA_URI_PREFIX));
        assert!(uri.len() > PNG_DATA_URI_PREFIX.len());
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_generate_image_without_image_part() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_generate(MODEL, Matcher::Any, 200, &text_reply("I can't create that image."))
        .await;

    let err = fixture
        .client()
        .generate_image("something", ImageSize::Size1K)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoImageData));
    assert_eq!(err.to_string(), "no image data returned");
}
