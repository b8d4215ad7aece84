//! Image, perspective crop and annotation endpoints

use super::Resource;
use crate::{
    client::Client,
    error::{Error, Result},
    http::{ApiRequest, Method, MultipartForm, RequestBody},
    types::{Annotation, Image, ImageId, PerspectiveCrop, PerspectiveRequest, ProjectId},
};
use bytes::Bytes;
use serde::Serialize;
use std::path::Path;

/// Form field carrying the owning project of an upload.
pub const PROJECT_ID_FIELD: &str = "project_id";

/// Form field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// Images API resource.
///
/// # Example
///
/// ```rust,no_run
/// # use panolabel::{Client, ImageUpload, PerspectiveRequest, AnnotationCreate};
/// # async fn example(client: Client) -> panolabel::Result<()> {
/// let image = client
///     .images()
///     .upload(ImageUpload::new(1, std::fs::read("hall.jpg")?, "hall.jpg"))
///     .await?;
///
/// let crop = client
///     .images()
///     .crop(&PerspectiveRequest::new(image.id, 2048.0, 1024.0))
///     .await?;
///
/// let saved = client
///     .images()
///     .annotate(image.id, &AnnotationCreate::for_crop(3, &crop, (200.0, 180.0, 96.0, 140.0)))
///     .await?;
/// println!("{} boundary points", saved.boundary_points.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Images {
    client: Client,
}

impl Images {
    /// Create a new Images resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Upload a panorama (`POST /image/upload`, `multipart/form-data`).
    ///
    /// The form is sent unmodified. It must carry a non-empty `project_id` text field;
    /// the backend rejects uploads without one, so this is checked before anything is
    /// sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if `project_id` is absent, blank or not a text
    /// field, otherwise
    /// whatever the executor reports.
    pub async fn upload(&self, form: impl Into<MultipartForm>) -> Result<Image> {
        let form = form.into();
        let has_project = form
            .text_value(PROJECT_ID_FIELD)
            .is_some_and(|value| !value.trim().is_empty());
        if !has_project {
            return Err(Error::MissingField(PROJECT_ID_FIELD));
        }

        tracing::debug!(
            project_id = form.text_value(PROJECT_ID_FIELD),
            parts = form.parts().len(),
            "uploading image"
        );
        let request =
            ApiRequest::new(Method::POST, "/image/upload").body(RequestBody::Multipart(form));
        self.client().execute(request).await?.json()
    }

    /// Read a file from disk and upload it into a project.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read.
    pub async fn upload_file(&self, project_id: ProjectId, path: impl AsRef<Path>) -> Result<Image> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                Error::InvalidRequest(format!("'{}' has no usable file name", path.display()))
            })?;

        self.upload(ImageUpload::new(project_id, content, filename))
            .await
    }

    /// List the images of a project (`GET /image/list?project_id=..`).
    pub async fn list(&self, project_id: ProjectId) -> Result<Vec<Image>> {
        tracing::debug!(project_id, "listing images");
        let request =
            ApiRequest::new(Method::GET, "/image/list").query(PROJECT_ID_FIELD, project_id);
        self.client().execute(request).await?.json()
    }

    /// Render a perspective crop of a panorama (`POST /image/crop`).
    pub async fn crop<B>(&self, body: &B) -> Result<PerspectiveCrop>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!("requesting perspective crop");
        let request = ApiRequest::new(Method::POST, "/image/crop").body(RequestBody::json(body)?);
        self.client().execute(request).await?.json()
    }

    /// Shorthand for [`crop`](Self::crop) with a typed request.
    pub async fn perspective(&self, request: &PerspectiveRequest) -> Result<PerspectiveCrop> {
        self.crop(request).await
    }

    /// Save an annotation on an image (`POST /image/{image_id}/annotate`).
    ///
    /// The payload is forwarded as-is; see
    /// [`AnnotationCreate`](crate::types::AnnotationCreate) for the shape the backend
    /// expects.
    pub async fn annotate<B>(&self, image_id: ImageId, body: &B) -> Result<Annotation>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!(image_id, "saving annotation");
        let request =
            ApiRequest::new(Method::POST, annotate_path(image_id)).body(RequestBody::json(body)?);
        self.client().execute(request).await?.json()
    }
}

impl Resource for Images {
    fn client(&self) -> &Client {
        &self.client
    }
}

pub(crate) fn annotate_path(image_id: ImageId) -> String {
    format!("/image/{}/annotate", image_id)
}

/// Typed builder for an upload form.
///
/// Produces the fields the backend expects: `project_id` as text and the image under
/// `file`.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    project_id: ProjectId,
    content: Bytes,
    filename: String,
    mime: Option<String>,
}

impl ImageUpload {
    /// Upload `content` as `filename` into `project_id`.
    pub fn new(project_id: ProjectId, content: impl Into<Bytes>, filename: impl Into<String>) -> Self {
        Self {
            project_id,
            content: content.into(),
            filename: filename.into(),
            mime: None,
        }
    }

    /// Override the MIME type guessed from the file extension.
    pub fn mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

impl From<ImageUpload> for MultipartForm {
    fn from(upload: ImageUpload) -> Self {
        let mime = upload
            .mime
            .unwrap_or_else(|| guess_image_mime(&upload.filename).to_string());
        MultipartForm::new()
            .text(PROJECT_ID_FIELD, upload.project_id)
            .file(FILE_FIELD, upload.content, upload.filename, mime)
    }
}

fn guess_image_mime(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::FormPart;

    #[test]
    fn test_images_resource_shares_client() {
        let client = Client::new("http://localhost:8000/api/v1").unwrap();
        let images = client.images();
        assert_eq!(images.client().base_url(), "http://localhost:8000/api/v1");
        assert_eq!(images.client().executor_name(), "reqwest");
    }

    #[test]
    fn test_annotate_path() {
        assert_eq!(annotate_path(5), "/image/5/annotate");
    }

    #[test]
    fn test_guess_image_mime() {
        assert_eq!(guess_image_mime("pano.JPG"), "image/jpeg");
        assert_eq!(guess_image_mime("pano.png"), "image/png");
        assert_eq!(guess_image_mime("pano"), "application/octet-stream");
    }

    #[test]
    fn test_image_upload_into_form() {
        let form: MultipartForm = ImageUpload::new(12, vec![1u8, 2, 3], "lobby.jpeg").into();

        assert_eq!(form.text_value(PROJECT_ID_FIELD), Some("12"));
        match &form.parts()[1] {
            FormPart::File {
                name,
                content,
                filename,
                mime,
            } => {
                assert_eq!(name, FILE_FIELD);
                assert_eq!(content.as_ref(), &[1, 2, 3]);
                assert_eq!(filename, "lobby.jpeg");
                assert_eq!(mime, "image/jpeg");
            }
            other => panic!("Expected file part, got {other:?}"),
        }
    }

    #[test]
    fn test_image_upload_mime_override() {
        let form: MultipartForm = ImageUpload::new(1, vec![0u8], "scan.raw")
            .mime("image/x-raw")
            .into();
        assert!(matches!(&form.parts()[1], FormPart::File { mime, .. } if mime == "image/x-raw"));
    }
}
