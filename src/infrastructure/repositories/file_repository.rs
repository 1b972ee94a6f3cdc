use std::io;
use std::path::Path;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Text read from disk along with the encoding it was decoded from
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedText {
    pub content: String,
    pub encoding: &'static str,
}

/// Local file system access for audio artifacts and input text
#[derive(Debug, Default, Clone)]
pub struct FileRepository;

impl FileRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    pub async fn write_bytes(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        tokio::fs::write(path, data).await?;
        tracing::debug!(path = %path.display(), size_bytes = data.len(), "File written");
        Ok(())
    }

    /// Recursive and idempotent
    pub async fn create_dir(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    /// Delete a file; a missing file is not an error
    pub async fn delete_file(&self, path: &Path) -> io::Result<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Read a text file and decode it to a UTF-8 string.
    ///
    /// Byte order marks select UTF-8 or UTF-16; anything else is read as UTF-8,
    /// replacing invalid sequences.
    pub async fn read_text(&self, path: &Path) -> io::Result<DecodedText> {
        let bytes = self.read_bytes(path).await?;
        let decoded = decode_text(&bytes);

        tracing::info!(
            path = %path.display(),
            encoding = decoded.encoding,
            chars = decoded.content.chars().count(),
            "Text file decoded"
        );

        Ok(decoded)
    }
}

fn decode_text(bytes: &[u8]) -> DecodedText {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return DecodedText {
            content: String::from_utf8_lossy(rest).into_owned(),
            encoding: "UTF-8",
        };
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
        return decode_utf16(rest, u16::from_le_bytes, "UTF-16LE");
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
        return decode_utf16(rest, u16::from_be_bytes, "UTF-16BE");
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => DecodedText {
            content: text.to_string(),
            encoding: "UTF-8",
        },
        Err(_) => {
            tracing::warn!("Text is not valid UTF-8, replacing invalid sequences");
            DecodedText {
                content: String::from_utf8_lossy(bytes).into_owned(),
                encoding: "UTF-8 (lossy)",
            }
        }
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16, encoding: &'static str) -> DecodedText {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    DecodedText {
        content: String::from_utf16_lossy(&units),
        encoding,
    }
}
