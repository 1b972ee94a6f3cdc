// End-to-end tests for the VoiceDesk Backend API
//
// Each test gets its own router on an ephemeral port, wired exactly as in
// production but pointed at an httpmock TTS backend and a temporary data
// directory, so tests run in parallel without sharing files.

mod helpers;
mod test_health;
mod test_tts;
mod test_voices;
