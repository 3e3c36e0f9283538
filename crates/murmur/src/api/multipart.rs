//! Re-sendable multipart form description.

use std::fmt;

use crate::error::{Error, InvalidInputError};
use crate::models::ImageUpload;

/// An owned description of a multipart/form-data body.
///
/// `reqwest`'s form type is consumed on send, so the gateway keeps this
/// owned description instead and materializes a fresh form for every
/// attempt of a call.
#[derive(Clone, Default)]
pub struct MultipartForm {
    parts: Vec<Part>,
}

#[derive(Clone)]
struct Part {
    name: String,
    body: PartBody,
}

#[derive(Clone)]
enum PartBody {
    Text(String),
    File {
        filename: String,
        content_type: String,
        data: Vec<u8>,
    },
}

impl MultipartForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text part.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(Part {
            name: name.into(),
            body: PartBody::Text(value.into()),
        });
        self
    }

    /// Append a file part.
    pub fn file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        self.parts.push(Part {
            name: name.into(),
            body: PartBody::File {
                filename: filename.into(),
                content_type: content_type.into(),
                data,
            },
        });
        self
    }

    /// Append an image under the given part name.
    pub fn image(self, name: impl Into<String>, image: ImageUpload) -> Self {
        self.file(name, image.filename, image.content_type, image.bytes)
    }

    /// Number of parts in the form.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// True when the form has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Materialize a sendable `reqwest` form from this description.
    pub(crate) fn to_form(&self) -> Result<reqwest::multipart::Form, Error> {
        let mut form = reqwest::multipart::Form::new();
        for part in &self.parts {
            form = match &part.body {
                PartBody::Text(value) => form.text(part.name.clone(), value.clone()),
                PartBody::File {
                    filename,
                    content_type,
                    data,
                } => {
                    let file = reqwest::multipart::Part::bytes(data.clone())
                        .file_name(filename.clone())
                        .mime_str(content_type)
                        .map_err(|e| InvalidInputError::Mime {
                            value: content_type.clone(),
                            reason: e.to_string(),
                        })?;
                    form.part(part.name.clone(), file)
                }
            };
        }
        Ok(form)
    }
}

// Keep file bytes out of Debug output
impl fmt::Debug for MultipartForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for part in &self.parts {
            match &part.body {
                PartBody::Text(value) => {
                    list.entry(&format_args!("{}: text ({} bytes)", part.name, value.len()));
                }
                PartBody::File { filename, data, .. } => {
                    list.entry(&format_args!(
                        "{}: file {} ({} bytes)",
                        part.name,
                        filename,
                        data.len()
                    ));
                }
            }
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_reqwest_form_repeatedly() {
        let form = MultipartForm::new()
            .text("post", r#"{"text":"hi"}"#)
            .image("images", ImageUpload::new("photo.png", vec![1, 2, 3]));

        assert_eq!(form.len(), 2);
        // The same description can back more than one attempt.
        assert!(form.to_form().is_ok());
        assert!(form.to_form().is_ok());
    }

    #[test]
    fn rejects_invalid_mime_type() {
        let form = MultipartForm::new().file("images", "x.bin", "not a mime", vec![]);
        assert!(matches!(
            form.to_form(),
            Err(Error::InvalidInput(InvalidInputError::Mime { .. }))
        ));
    }
}
