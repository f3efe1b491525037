//! Transcript file upload decoding

use crate::domain::error::InputError;

/// Supported transcript upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscriptFormat {
    Txt,
    Md,
}

impl TranscriptFormat {
    /// Resolve a format from a file extension
    pub fn from_extension(extension: &str) -> Result<Self, InputError> {
        match extension.trim().to_lowercase().as_str() {
            "txt" => Ok(Self::Txt),
            "md" => Ok(Self::Md),
            other => Err(InputError::UnsupportedTranscriptFormat {
                extension: other.to_string(),
            }),
        }
    }

    /// Decode transcript file contents as UTF-8 text
    pub fn decode(&self, bytes: Vec<u8>) -> Result<String, InputError> {
        String::from_utf8(bytes).map_err(|_| InputError::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_extension_accepts_txt_and_md() {
        assert_eq!(
            TranscriptFormat::from_extension("txt").unwrap(),
            TranscriptFormat::Txt
        );
        assert_eq!(
            TranscriptFormat::from_extension("md").unwrap(),
            TranscriptFormat::Md
        );
    }

    #[test]
    fn from_extension_is_case_insensitive() {
        assert_eq!(
            TranscriptFormat::from_extension("TXT").unwrap(),
            TranscriptFormat::Txt
        );
    }

    #[test]
    fn from_extension_rejects_unsupported() {
        assert!(TranscriptFormat::from_extension("pdf").is_err());
        assert!(TranscriptFormat::from_extension("docx").is_err());
        assert!(TranscriptFormat::from_extension("").is_err());
    }

    #[test]
    fn decode_valid_utf8() {
        let text = TranscriptFormat::Txt
            .decode(b"Client wants a loan.".to_vec())
            .unwrap();
        assert_eq!(text, "Client wants a loan.");
    }

    #[test]
    fn decode_invalid_utf8() {
        let result = TranscriptFormat::Txt.decode(vec![0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(InputError::InvalidUtf8)));
    }
}
