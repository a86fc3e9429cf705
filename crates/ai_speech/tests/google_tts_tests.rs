//! Integration tests for the Google TTS provider using WireMock

use ai_speech::{
    AudioFormat, GoogleTtsProvider, SpeechConfig, SynthesisLanguage, TextToSpeech, VoiceGender,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path, query_param},
};

fn config_for_mock(base_url: &str) -> SpeechConfig {
    SpeechConfig {
        google_api_key: Some("test-key".to_string()),
        google_base_url: base_url.to_string(),
        timeout_ms: 5000,
        ..SpeechConfig::default()
    }
}

fn synthesize_response(audio: &[u8]) -> serde_json::Value {
    serde_json::json!({ "audioContent": BASE64.encode(audio) })
}

#[tokio::test]
async fn synthesize_decodes_mp3_bytes() {
    let mock_server = MockServer::start().await;
    let mp3_bytes = b"ID3fake-mp3-payload";

    Mock::given(method("POST"))
        .and(path("/v1/text:synthesize"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(synthesize_response(mp3_bytes)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GoogleTtsProvider::new(config_for_mock(&mock_server.uri())).unwrap();

    let audio = provider
        .synthesize_dialog("Hello", SynthesisLanguage::English, VoiceGender::Female)
        .await
        .unwrap();

    assert_eq!(audio.format(), AudioFormat::Mp3);
    assert_eq!(audio.data(), mp3_bytes);
}

#[tokio::test]
async fn synthesize_sends_voice_selection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/text:synthesize"))
        .and(body_partial_json(serde_json::json!({
            "input": {"text": "namaste"},
            "voice": {
                "languageCode": "hi-IN",
                "name": "hi-IN-Wavenet-B",
                "ssmlGender": "MALE"
            },
            "audioConfig": {"audioEncoding": "MP3"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(synthesize_response(b"audio")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GoogleTtsProvider::new(config_for_mock(&mock_server.uri())).unwrap();

    let result = provider
        .synthesize_dialog("namaste", SynthesisLanguage::Hindi, VoiceGender::Male)
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn trait_synthesize_defaults_to_english_female() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/text:synthesize"))
        .and(body_partial_json(serde_json::json!({
            "voice": {"name": "en-US-Wavenet-F"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(synthesize_response(b"audio")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GoogleTtsProvider::new(config_for_mock(&mock_server.uri())).unwrap();
    assert!(provider.synthesize("Hello", None).await.is_ok());
}

#[tokio::test]
async fn api_error_surfaces_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/text:synthesize"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key invalid"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GoogleTtsProvider::new(config_for_mock(&mock_server.uri())).unwrap();

    let err = provider
        .synthesize_dialog("Hello", SynthesisLanguage::English, VoiceGender::Female)
        .await
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("403"));
    assert!(msg.contains("API key invalid"));
}

#[tokio::test]
async fn invalid_base64_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/text:synthesize"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"audioContent": "!!! not base64 !!!"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GoogleTtsProvider::new(config_for_mock(&mock_server.uri())).unwrap();

    let result = provider
        .synthesize_dialog("Hello", SynthesisLanguage::English, VoiceGender::Female)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn empty_audio_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/text:synthesize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(synthesize_response(b"")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GoogleTtsProvider::new(config_for_mock(&mock_server.uri())).unwrap();

    let result = provider
        .synthesize_dialog("Hello", SynthesisLanguage::English, VoiceGender::Female)
        .await;
    assert!(result.is_err());
}
