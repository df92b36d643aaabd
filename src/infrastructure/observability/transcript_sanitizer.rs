const MAX_VISIBLE_LENGTH: usize = 80;

/// Sanitizes spoken-question text for safe logging. Transcripts are user
/// speech; they can run long and can contain anything the microphone heard.
pub fn sanitize_transcript(transcript: &str) -> String {
    let trimmed = transcript.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    if trimmed.len() > MAX_VISIBLE_LENGTH {
        let cut = trimmed
            .char_indices()
            .take_while(|(i, _)| *i < MAX_VISIBLE_LENGTH)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}... ({} chars total)", &trimmed[..cut], trimmed.len())
    } else {
        trimmed.to_string()
    }
}
