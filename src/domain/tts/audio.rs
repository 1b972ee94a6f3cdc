/// Concatenate audio buffers in order.
///
/// This is a plain byte-level join: container headers are neither parsed nor
/// rewritten, so merging several WAV files yields one stream with embedded
/// headers rather than a validated WAV file.
pub fn merge_audio_buffers<B: AsRef<[u8]>>(buffers: &[B]) -> Vec<u8> {
    let total_len = buffers.iter().map(|b| b.as_ref().len()).sum();
    let mut merged = Vec::with_capacity(total_len);
    for buffer in buffers {
        merged.extend_from_slice(buffer.as_ref());
    }
    merged
}
