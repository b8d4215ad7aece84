//! Panorama image, perspective crop and annotation types

use crate::error::{Error, Result};
use base64::Engine;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

use super::ProjectId;
use super::project::LabelId;

/// Identifier of a panorama image.
pub type ImageId = i64;

/// Identifier of an annotation.
pub type AnnotationId = i64;

/// Field of view used for perspective crops when none is given, in degrees.
pub const DEFAULT_CROP_FOV: f64 = 90.0;

/// An uploaded equirectangular panorama.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Unique identifier
    pub id: ImageId,

    /// Owning project
    pub project_id: ProjectId,

    /// Original file name
    pub filename: String,

    /// URL the image is served from, relative to the backend host
    pub url: String,

    /// Width in pixels, if the backend could decode the image
    #[serde(default)]
    pub width: Option<u32>,

    /// Height in pixels, if the backend could decode the image
    #[serde(default)]
    pub height: Option<u32>,

    /// When the image was uploaded
    #[serde(with = "super::timestamp")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Image {
    /// `(width, height)` when both are known.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.width.zip(self.height)
    }
}

/// Request for a perspective (rectilinear) crop of a panorama.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveRequest {
    /// Source image
    pub image_id: ImageId,

    /// Horizontal pixel coordinate of the crop centre
    pub u: f64,

    /// Vertical pixel coordinate of the crop centre
    pub v: f64,

    /// Field of view in degrees
    #[serde(default = "default_fov")]
    pub fov: f64,
}

fn default_fov() -> f64 {
    DEFAULT_CROP_FOV
}

impl PerspectiveRequest {
    /// Crop centred on pixel `(u, v)` with the default field of view.
    pub fn new(image_id: ImageId, u: f64, v: f64) -> Self {
        Self {
            image_id,
            u,
            v,
            fov: DEFAULT_CROP_FOV,
        }
    }

    /// Set the field of view in degrees.
    pub fn fov(mut self, fov: f64) -> Self {
        self.fov = fov;
        self
    }

    /// Crop looking in the spherical direction `(theta, phi)`.
    ///
    /// `theta` is longitude in `[-π, π]`, `phi` latitude in `[-π/2, π/2]`, both in
    /// radians. The pixel centre is derived from the image dimensions with the same
    /// equirectangular mapping the backend uses to go back to angles.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the image dimensions are unknown.
    pub fn from_spherical(image: &Image, theta: f64, phi: f64) -> Result<Self> {
        let (width, height) = image.dimensions().ok_or_else(|| {
            Error::InvalidRequest(format!("image {} has no known dimensions", image.id))
        })?;
        let (w, h) = (f64::from(width), f64::from(height));

        let u = (theta + PI) / (2.0 * PI) * w;
        let v = h / 2.0 - phi / FRAC_PI_2 * (h / 2.0);

        Ok(Self::new(image.id, u, v))
    }
}

/// A perspective crop returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveCrop {
    /// `data:` URL holding the encoded crop (JPEG)
    pub image_base64: String,

    /// Longitude of the crop centre, radians
    pub center_theta: f64,

    /// Latitude of the crop centre, radians
    pub center_phi: f64,

    /// Field of view, degrees
    pub fov: f64,
}

impl PerspectiveCrop {
    /// MIME type declared by the data URL, if any.
    pub fn mime_type(&self) -> Option<&str> {
        let rest = self.image_base64.strip_prefix("data:")?;
        let (header, _) = rest.split_once(',')?;
        header.split(';').next().filter(|mime| !mime.is_empty())
    }

    /// Decode the crop into raw image bytes.
    ///
    /// Accepts either a full `data:<mime>;base64,<payload>` URL or bare base64.
    pub fn decode_image(&self) -> Result<Bytes> {
        let payload = match self.image_base64.split_once(',') {
            Some((header, payload)) if header.starts_with("data:") => {
                if !header.ends_with(";base64") {
                    return Err(Error::ResponseValidation(format!(
                        "unsupported data URL encoding '{}'",
                        header
                    )));
                }
                payload
            }
            _ => self.image_base64.as_str(),
        };

        base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map(Bytes::from)
            .map_err(|e| Error::ResponseValidation(format!("invalid base64 image data: {}", e)))
    }
}

/// Payload for saving an annotation drawn on a perspective crop.
///
/// The box is given in crop-canvas pixels together with the crop's viewing direction;
/// the backend projects it back onto the sphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationCreate {
    /// Label assigned to the object
    pub label_id: LabelId,

    /// Crop centre longitude, radians
    pub crop_theta: f64,
    /// Crop centre latitude, radians
    pub crop_phi: f64,
    /// Crop field of view, degrees
    pub crop_fov: f64,

    /// Box left edge
    pub box_x: f64,
    /// Box top edge
    pub box_y: f64,
    /// Box width
    pub box_w: f64,
    /// Box height
    pub box_h: f64,
    /// Box rotation, degrees
    #[serde(default)]
    pub box_angle: f64,
}

impl AnnotationCreate {
    /// Annotation for an axis-aligned box `(x, y, w, h)` drawn on `crop`.
    pub fn for_crop(label_id: LabelId, crop: &PerspectiveCrop, bbox: (f64, f64, f64, f64)) -> Self {
        let (box_x, box_y, box_w, box_h) = bbox;
        Self {
            label_id,
            crop_theta: crop.center_theta,
            crop_phi: crop.center_phi,
            crop_fov: crop.fov,
            box_x,
            box_y,
            box_w,
            box_h,
            box_angle: 0.0,
        }
    }

    /// Set the box rotation in degrees.
    pub fn angle(mut self, degrees: f64) -> Self {
        self.box_angle = degrees;
        self
    }
}

/// Pixel on the panorama outlining an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPoint {
    /// Horizontal pixel coordinate
    pub x: f64,
    /// Vertical pixel coordinate
    pub y: f64,
}

/// A saved annotation in spherical (RBFoV) form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Unique identifier
    pub id: AnnotationId,

    /// Annotated image
    pub image_id: ImageId,

    /// Assigned label
    pub label_id: LabelId,

    /// Who drew it, if recorded
    #[serde(default)]
    pub annotator_id: Option<i64>,

    /// Centre longitude, radians
    pub center_theta: f64,
    /// Centre latitude, radians
    pub center_phi: f64,
    /// Horizontal field of view, degrees
    pub fov_w: f64,
    /// Vertical field of view, degrees
    pub fov_h: f64,
    /// Rotation about the viewing axis, radians
    pub gamma: f64,

    /// Outline on the panorama, for drawing as a polygon
    #[serde(default)]
    pub boundary_points: Vec<BoundaryPoint>,

    /// When the annotation was saved
    #[serde(with = "super::timestamp")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}
