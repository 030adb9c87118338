//! Synthesized narration audio.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// A synthesized audio clip with its MIME type.
///
/// # Examples
///
/// ```
/// use ninna_core::AudioClip;
///
/// let clip = AudioClip::new("audio/mpeg", vec![0xff, 0xfb]);
/// assert!(clip.to_data_url().starts_with("data:audio/mpeg;base64,"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioClip {
    /// MIME type of the encoded audio, e.g. `audio/mpeg`.
    pub mime: String,
    /// Raw encoded audio bytes.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl AudioClip {
    /// Wrap raw audio bytes with their MIME type.
    pub fn new(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }

    /// True when the clip carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Render the clip as an inline `data:` URL for embedding in responses.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.data))
    }
}

/// Serialize audio bytes as base64 so clips embed cleanly in JSON.
mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_encodes_payload() {
        let clip = AudioClip::new("audio/mpeg", b"abc".to_vec());
        assert_eq!(clip.to_data_url(), "data:audio/mpeg;base64,YWJj");
    }

    #[test]
    fn json_round_trip_uses_base64() {
        let clip = AudioClip::new("audio/mpeg", vec![1, 2, 3]);
        let json = serde_json::to_string(&clip).unwrap();
        assert!(json.contains("AQID"));
        let back: AudioClip = serde_json::from_str(&json).unwrap();
        assert_eq!(back, clip);
    }
}
