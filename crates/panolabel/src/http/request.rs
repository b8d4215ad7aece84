//! Executor-neutral request description

use bytes::Bytes;
use http::Method;

/// Content type sent with JSON bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type sent with multipart bodies (the boundary is appended by the executor).
pub const CONTENT_TYPE_MULTIPART: &str = "multipart/form-data";

/// A single API call as handed to a [`RequestExecutor`](super::RequestExecutor).
///
/// The path is relative to the executor's base URL (e.g. `/project/7/labels`).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the base URL, always starting with `/`
    pub path: String,
    /// Query string pairs, in order
    pub query: Vec<(String, String)>,
    /// Optional request body
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    /// Create a request without query or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Attach a body.
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Content type implied by the body, if there is one.
    pub fn content_type(&self) -> Option<&'static str> {
        self.body.as_ref().map(RequestBody::content_type)
    }

    /// Value of a query parameter.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON document
    Json(serde_json::Value),
    /// `multipart/form-data` form
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Serialize any value into a JSON body.
    pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> crate::Result<Self> {
        Ok(RequestBody::Json(serde_json::to_value(value)?))
    }

    /// Content type for this body kind.
    pub fn content_type(&self) -> &'static str {
        match self {
            RequestBody::Json(_) => CONTENT_TYPE_JSON,
            RequestBody::Multipart(_) => CONTENT_TYPE_MULTIPART,
        }
    }

    /// The JSON document, if this is a JSON body.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            RequestBody::Json(value) => Some(value),
            RequestBody::Multipart(_) => None,
        }
    }

    /// The form, if this is a multipart body.
    pub fn as_multipart(&self) -> Option<&MultipartForm> {
        match self {
            RequestBody::Multipart(form) => Some(form),
            RequestBody::Json(_) => None,
        }
    }
}

/// An ordered multipart form.
///
/// Unlike `reqwest::multipart::Form` this type can be cloned and inspected, so it can be
/// validated before sending and asserted on in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

/// One field of a [`MultipartForm`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    /// Plain text field
    Text {
        /// Field name
        name: String,
        /// Field value
        value: String,
    },
    /// File field
    File {
        /// Field name
        name: String,
        /// File content
        content: Bytes,
        /// File name reported to the server
        filename: String,
        /// MIME type of the content
        mime: String,
    },
}

impl FormPart {
    /// Field name of this part.
    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

impl MultipartForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.to_string(),
        });
        self
    }

    /// Add a file field.
    pub fn file(
        mut self,
        name: impl Into<String>,
        content: impl Into<Bytes>,
        filename: impl Into<String>,
        mime: impl Into<String>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            content: content.into(),
            filename: filename.into(),
            mime: mime.into(),
        });
        self
    }

    /// All parts in insertion order.
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Value of the first text field with this name.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Whether a field (text or file) with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.parts.iter().any(|part| part.name() == name)
    }

    /// Convert into a `reqwest` form for sending.
    pub(crate) fn into_reqwest(self) -> crate::Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File {
                    name,
                    content,
                    filename,
                    mime,
                } => {
                    let part = reqwest::multipart::Part::stream(content)
                        .file_name(filename)
                        .mime_str(&mime)
                        .map_err(|e| {
                            crate::Error::InvalidRequest(format!("Invalid MIME type '{}': {}", mime, e))
                        })?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}
