pub mod batch;
pub mod tts;
pub mod voice;

#[cfg(test)]
pub mod test_support;
