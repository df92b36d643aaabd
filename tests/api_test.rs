use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use voxsight::application::ports::{
    SpeechSynthesizer, SynthesisError, TranscriptionEngine, TranscriptionError, VisionClient,
    VisionError,
};
use voxsight::application::services::{PipelineService, UploadPolicy};
use voxsight::domain::{EncodedImage, UploadArtifact};
use voxsight::presentation::config::{
    CompletionSettings, DEFAULT_PROMPT_TEMPLATE, OpenAiSettings, ServerSettings, Settings,
    SynthesisSettings, TranscriptionSettings, UploadSettings,
};
use voxsight::presentation::{AppState, create_router};

const BOUNDARY: &str = "test-boundary-7d92";

const MOCK_TRANSCRIPT: &str = "What is this?";
const MOCK_ANSWER: &str = "That's an oven!";
const MOCK_SPEECH: &[u8] = b"ID3 fake mp3 payload";

#[derive(Default)]
struct StageCalls {
    transcribe: AtomicUsize,
    complete: AtomicUsize,
    synthesize: AtomicUsize,
}

struct MockTranscription {
    calls: Arc<StageCalls>,
    fail: bool,
}

#[async_trait::async_trait]
impl TranscriptionEngine for MockTranscription {
    async fn transcribe(&self, _audio: &UploadArtifact) -> Result<String, TranscriptionError> {
        self.calls.transcribe.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(TranscriptionError::Unavailable("mock outage".to_string()));
        }
        Ok(MOCK_TRANSCRIPT.to_string())
    }
}

struct MockVision {
    calls: Arc<StageCalls>,
    fail: bool,
}

#[async_trait::async_trait]
impl VisionClient for MockVision {
    async fn answer(
        &self,
        _transcript: &str,
        _image: &EncodedImage,
    ) -> Result<String, VisionError> {
        self.calls.complete.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(VisionError::Rejected("status 500: mock".to_string()));
        }
        Ok(MOCK_ANSWER.to_string())
    }
}

struct MockSpeech {
    calls: Arc<StageCalls>,
}

#[async_trait::async_trait]
impl SpeechSynthesizer for MockSpeech {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>, SynthesisError> {
        self.calls.synthesize.fetch_add(1, Ordering::SeqCst);
        Ok(MOCK_SPEECH.to_vec())
    }
}

fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        openai: OpenAiSettings {
            api_key: "test-key".to_string(),
            base_url: "http://localhost".to_string(),
            request_timeout_secs: 5,
        },
        transcription: TranscriptionSettings {
            model: "whisper-1".to_string(),
        },
        completion: CompletionSettings {
            model: "gpt-4o".to_string(),
            max_output_tokens: 50,
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
        },
        synthesis: SynthesisSettings {
            enabled: true,
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
        },
        upload: UploadSettings {
            max_image_size_mb: 20,
            enforce_image_format: false,
        },
    }
}

struct TestApp {
    router: axum::Router,
    calls: Arc<StageCalls>,
}

fn create_test_app(
    policy: UploadPolicy,
    with_synthesis: bool,
    transcription_fails: bool,
    completion_fails: bool,
) -> TestApp {
    let calls = Arc::new(StageCalls::default());

    let transcription = Arc::new(MockTranscription {
        calls: Arc::clone(&calls),
        fail: transcription_fails,
    });
    let vision = Arc::new(MockVision {
        calls: Arc::clone(&calls),
        fail: completion_fails,
    });
    let synthesizer = with_synthesis.then(|| {
        Arc::new(MockSpeech {
            calls: Arc::clone(&calls),
        })
    });

    let pipeline = Arc::new(PipelineService::new(
        transcription,
        vision,
        synthesizer,
        policy,
    ));

    let state = AppState {
        pipeline,
        settings: test_settings(),
    };

    TestApp {
        router: create_router(state),
        calls,
    }
}

fn default_policy() -> UploadPolicy {
    UploadPolicy {
        max_image_bytes: 20 * 1024 * 1024,
        enforce_image_format: false,
    }
}

fn multipart_body(parts: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n",
                name, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn process_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/process")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_running_server_when_root_probed_then_returns_greeting() {
    let app = create_test_app(default_policy(), true, false, false);

    let response = app
        .router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["Server Running"], "Welcome to your favourite server!");
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_ok() {
    let app = create_test_app(default_policy(), true, false, false);

    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_audio_and_image_when_processing_then_returns_text_and_speech() {
    let app = create_test_app(default_policy(), true, false, false);
    let png = vec![0x89u8; 2 * 1024];

    let body = multipart_body(&[
        ("audio", "question.m4a", b"fake audio"),
        ("image", "oven.png", &png),
    ]);
    let response = app.router.oneshot(process_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["response_text"], MOCK_ANSWER);
    assert!(!json["speech_mp3"].as_str().unwrap().is_empty());

    assert_eq!(app.calls.transcribe.load(Ordering::SeqCst), 1);
    assert_eq!(app.calls.complete.load(Ordering::SeqCst), 1);
    assert_eq!(app.calls.synthesize.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_synthesis_disabled_when_processing_then_returns_raw_answer_text() {
    let app = create_test_app(default_policy(), false, false, false);

    let body = multipart_body(&[
        ("audio", "question.m4a", b"fake audio"),
        ("image", "oven.png", b"fake png"),
    ]);
    let response = app.router.oneshot(process_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], MOCK_ANSWER.as_bytes());
    assert_eq!(app.calls.synthesize.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_image_over_ceiling_when_processing_then_rejects_without_remote_calls() {
    let app = create_test_app(default_policy(), true, false, false);
    let oversized = vec![0u8; 25 * 1024 * 1024];

    let body = multipart_body(&[
        ("audio", "question.m4a", b"fake audio"),
        ("image", "huge.png", &oversized),
    ]);
    let response = app.router.oneshot(process_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Image file size exceeds 20 MB");

    assert_eq!(app.calls.transcribe.load(Ordering::SeqCst), 0);
    assert_eq!(app.calls.complete.load(Ordering::SeqCst), 0);
    assert_eq!(app.calls.synthesize.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_missing_audio_field_when_processing_then_rejects_without_remote_calls() {
    let app = create_test_app(default_policy(), true, false, false);

    let body = multipart_body(&[("image", "oven.png", b"fake png")]);
    let response = app.router.oneshot(process_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Audio or image file is missing");

    assert_eq!(app.calls.transcribe.load(Ordering::SeqCst), 0);
    assert_eq!(app.calls.complete.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_missing_image_field_when_processing_then_rejects_without_remote_calls() {
    let app = create_test_app(default_policy(), true, false, false);

    let body = multipart_body(&[("audio", "question.m4a", b"fake audio")]);
    let response = app.router.oneshot(process_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Audio or image file is missing");
    assert_eq!(app.calls.transcribe.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_format_check_enabled_when_extension_not_allowed_then_rejects() {
    let policy = UploadPolicy {
        max_image_bytes: 20 * 1024 * 1024,
        enforce_image_format: true,
    };
    let app = create_test_app(policy, true, false, false);

    let body = multipart_body(&[
        ("audio", "question.m4a", b"fake audio"),
        ("image", "scan.bmp", b"fake bmp"),
    ]);
    let response = app.router.oneshot(process_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Unsupported image format: bmp");
    assert_eq!(app.calls.transcribe.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_format_check_disabled_when_extension_not_allowed_then_processes_anyway() {
    let app = create_test_app(default_policy(), true, false, false);

    let body = multipart_body(&[
        ("audio", "question.m4a", b"fake audio"),
        ("image", "scan.bmp", b"fake bmp"),
    ]);
    let response = app.router.oneshot(process_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.calls.complete.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_transcription_outage_when_processing_then_completion_never_runs() {
    let app = create_test_app(default_policy(), true, true, false);

    let body = multipart_body(&[
        ("audio", "question.m4a", b"fake audio"),
        ("image", "oven.png", b"fake png"),
    ]);
    let response = app.router.oneshot(process_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(app.calls.transcribe.load(Ordering::SeqCst), 1);
    assert_eq!(app.calls.complete.load(Ordering::SeqCst), 0);
    assert_eq!(app.calls.synthesize.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_completion_failure_when_processing_then_synthesis_never_runs() {
    let app = create_test_app(default_policy(), true, false, true);

    let body = multipart_body(&[
        ("audio", "question.m4a", b"fake audio"),
        ("image", "oven.png", b"fake png"),
    ]);
    let response = app.router.oneshot(process_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(app.calls.complete.load(Ordering::SeqCst), 1);
    assert_eq!(app.calls.synthesize.load(Ordering::SeqCst), 0);
}
