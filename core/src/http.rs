//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network — the caller (host) is responsible for executing
//! the actual I/O. This separation keeps the core deterministic and easy to
//! test.
//!
//! All fields use owned types (`String`, `Vec`) so request values can outlive
//! the builder that produced them. Multipart upload bodies are carried as
//! structured data ([`MultipartForm`]) and encoded to wire bytes only when the
//! host picks a boundary.

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// Body of an outgoing request.
///
/// JSON bodies are pre-serialized at build time. Multipart bodies stay
/// structured until the host encodes them with a boundary of its choosing;
/// for that reason multipart requests carry no `content-type` header — the
/// host derives it from the boundary via [`MultipartForm::content_type`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Json(String),
    Multipart(MultipartForm),
}

/// One uploaded file inside a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name, e.g. `image`.
    pub name: String,
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A `multipart/form-data` body: plain text fields plus one file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub file: FilePart,
}

impl MultipartForm {
    /// The `content-type` header value for a body encoded with `boundary`.
    pub fn content_type(boundary: &str) -> String {
        format!("multipart/form-data; boundary={boundary}")
    }

    /// Encode the form as RFC 7578 wire bytes under the given boundary.
    ///
    /// The boundary must not occur in any field value or in the file bytes;
    /// hosts should pick a long random token.
    pub fn encode(&self, boundary: &str) -> Vec<u8> {
        let mut out = Vec::new();
        for (name, value) in &self.fields {
            out.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            out.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            );
            out.extend_from_slice(value.as_bytes());
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        out.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                self.file.name, self.file.filename
            )
            .as_bytes(),
        );
        out.extend_from_slice(format!("Content-Type: {}\r\n\r\n", self.file.content_type).as_bytes());
        out.extend_from_slice(&self.file.data);
        out.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        out
    }
}

/// An HTTP request described as plain data.
///
/// Built by `CmsClient::build_*` methods. The caller is responsible for
/// executing this request against the network and returning the corresponding
/// `HttpResponse`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an `HttpRequest`, then passed
/// to `CmsClient::parse_*` methods for deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> MultipartForm {
        MultipartForm {
            fields: vec![("showId".to_string(), "abc-123".to_string())],
            file: FilePart {
                name: "image".to_string(),
                filename: "cover.png".to_string(),
                content_type: "image/png".to_string(),
                data: vec![0x89, 0x50, 0x4e, 0x47],
            },
        }
    }

    #[test]
    fn content_type_carries_boundary() {
        assert_eq!(
            MultipartForm::content_type("xyz"),
            "multipart/form-data; boundary=xyz"
        );
    }

    #[test]
    fn encode_produces_one_part_per_field_plus_file() {
        let bytes = form().encode("B");
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("--B\r\n"));
        assert!(text.contains("Content-Disposition: form-data; name=\"showId\"\r\n\r\nabc-123\r\n"));
        assert!(text.contains(
            "Content-Disposition: form-data; name=\"image\"; filename=\"cover.png\"\r\n"
        ));
        assert!(text.contains("Content-Type: image/png\r\n\r\n"));
        assert!(text.ends_with("\r\n--B--\r\n"));
    }

    #[test]
    fn encode_keeps_file_bytes_verbatim() {
        let bytes = form().encode("B");
        let needle: &[u8] = &[0x89, 0x50, 0x4e, 0x47];
        assert!(bytes.windows(needle.len()).any(|w| w == needle));
    }
}
