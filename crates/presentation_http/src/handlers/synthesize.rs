//! Synthesis demo handlers
//!
//! A minimal form page plus the endpoint behind it: text in, MP3 out.

use std::str::FromStr;

use ai_speech::{SynthesisLanguage, VoiceGender};
use axum::{
    extract::{Form, State},
    http::header,
    response::{Html, IntoResponse},
};
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Maitre - Text to Speech</title>
  <style>
    body { font-family: sans-serif; max-width: 40rem; margin: 3rem auto; padding: 0 1rem; }
    textarea { width: 100%; height: 6rem; }
    select, button { margin-top: 0.5rem; padding: 0.3rem 0.8rem; }
    #player { margin-top: 1rem; width: 100%; }
    #error { color: #b00; margin-top: 0.5rem; }
  </style>
</head>
<body>
  <h1>Maitre - Text to Speech</h1>
  <form id="form">
    <textarea name="text" placeholder="Type something to say..."></textarea><br>
    <select name="language">
      <option>English</option>
      <option>Hindi</option>
      <option>Hinglish</option>
    </select>
    <select name="gender">
      <option>Female</option>
      <option>Male</option>
    </select>
    <button type="submit">Speak</button>
  </form>
  <audio id="player" controls hidden></audio>
  <div id="error"></div>
  <script>
    const form = document.getElementById('form');
    const player = document.getElementById('player');
    const errorBox = document.getElementById('error');
    form.addEventListener('submit', async (e) => {
      e.preventDefault();
      errorBox.textContent = '';
      const body = new URLSearchParams(new FormData(form));
      const resp = await fetch('/synthesize', { method: 'POST', body });
      if (!resp.ok) {
        const detail = await resp.json().catch(() => ({}));
        errorBox.textContent = detail.error || ('Synthesis failed: ' + resp.status);
        return;
      }
      player.src = URL.createObjectURL(await resp.blob());
      player.hidden = false;
      player.play();
    });
  </script>
</body>
</html>
"#;

/// The demo form page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Synthesis request (form-encoded, as the page submits it)
#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    /// Text to synthesize
    pub text: String,
    /// Language name: English, Hindi or Hinglish
    pub language: String,
    /// Voice gender: Male or Female
    pub gender: String,
}

/// Synthesize text to MP3 bytes
#[instrument(skip(state, request), fields(text_len = request.text.len()))]
pub async fn synthesize(
    State(state): State<AppState>,
    Form(request): Form<SynthesizeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Text cannot be empty".to_string()));
    }

    let language =
        SynthesisLanguage::from_str(&request.language).map_err(ApiError::BadRequest)?;
    let gender = VoiceGender::from_str(&request.gender).map_err(ApiError::BadRequest)?;

    let Some(tts) = state.tts.as_ref() else {
        return Err(ApiError::ServiceUnavailable(
            "Synthesis is not configured (missing API key)".to_string(),
        ));
    };

    let audio = tts
        .synthesize_dialog(request.text.trim(), language, gender)
        .await
        .map_err(|e| ApiError::ServiceUnavailable(e.to_string()))?;

    let mime = audio.mime_type();
    Ok(([(header::CONTENT_TYPE, mime)], audio.into_data()))
}
