use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Profile picture picked by the user. The content is displayed as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    mime_type: String,
    bytes: Vec<u8>,
}

impl Avatar {
    #[must_use]
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// URL usable as image source.
    #[must_use]
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("image/png", b"\x89PNG".to_vec(), "data:image/png;base64,iVBORw==")]
    #[case("image/jpeg", b"face".to_vec(), "data:image/jpeg;base64,ZmFjZQ==")]
    #[case("", vec![], "data:;base64,")]
    fn test_data_url(#[case] mime_type: &str, #[case] bytes: Vec<u8>, #[case] expected: &str) {
        assert_eq!(Avatar::new(mime_type, bytes).data_url(), expected);
    }

    #[test]
    fn test_accessors() {
        let avatar = Avatar::new("image/gif", vec![1, 2, 3]);

        assert_eq!(avatar.mime_type(), "image/gif");
        assert_eq!(avatar.len(), 3);
        assert!(!avatar.is_empty());
    }
}
