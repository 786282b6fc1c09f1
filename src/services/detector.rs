use crate::models::annotation::{TextAnnotation, Vertex};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Failure modes of the external text-detection service.
///
/// An empty annotation list is NOT an error; it means the detector ran and
/// found no text. These variants cover transport failures, non-success
/// status codes, and responses the client cannot interpret.
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("detector request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("detector returned status {status}: {body}")]
    ServiceStatus { status: u16, body: String },
    #[error("malformed detector response: {0}")]
    MalformedResponse(String),
}

/// Contract for the external OCR-style text detector.
///
/// `Ok(vec![])` means "no text found"; `Err` is reserved for genuine
/// transport or service failures.
#[allow(async_fn_in_trait)]
pub trait TextDetector {
    async fn detect(&self, image_bytes: &[u8]) -> Result<Vec<TextAnnotation>, DetectionError>;
}

#[derive(Serialize)]
struct DetectRequest {
    image_base64: String,
}

/// Single text box as the detection server reports it.
#[derive(Deserialize)]
struct AnnotationPayload {
    text: String,
    /// Corner points `[[x1,y1], [x2,y2], [x3,y3], [x4,y4]]`.
    bounding_box: Vec<[i32; 2]>,
}

#[derive(Deserialize)]
struct DetectResponse {
    annotations: Vec<AnnotationPayload>,
}

impl AnnotationPayload {
    /// Convert to the pipeline's annotation type.
    ///
    /// Boxes without exactly four corners are dropped (logged), so one bad
    /// entry never sinks the whole detection.
    fn into_annotation(self) -> Option<TextAnnotation> {
        if self.bounding_box.len() != 4 {
            warn!(
                text = %self.text,
                corners = self.bounding_box.len(),
                "dropping annotation with non-quadrilateral bounds"
            );
            return None;
        }

        let mut quad = [Vertex { x: 0, y: 0 }; 4];
        for (slot, point) in quad.iter_mut().zip(self.bounding_box.iter()) {
            *slot = Vertex {
                x: point[0],
                y: point[1],
            };
        }

        Some(TextAnnotation {
            text: self.text,
            bounding_box: quad,
        })
    }
}

/// HTTP client for the text-detection server.
#[derive(Clone)]
pub struct HttpTextDetector {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTextDetector {
    pub fn new(base_url: impl Into<String>) -> Result<Self, DetectionError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Check that the detection server is reachable.
    pub async fn health_check(&self) -> Result<(), DetectionError> {
        let url = format!("{}/health", self.base_url);
        self.client.get(&url).send().await?;
        Ok(())
    }

    fn encode_image(image_bytes: &[u8]) -> String {
        general_purpose::STANDARD.encode(image_bytes)
    }
}

impl TextDetector for HttpTextDetector {
    async fn detect(&self, image_bytes: &[u8]) -> Result<Vec<TextAnnotation>, DetectionError> {
        let url = format!("{}/detect", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&DetectRequest {
                image_base64: Self::encode_image(image_bytes),
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(DetectionError::ServiceStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: DetectResponse = serde_json::from_str(&body)
            .map_err(|e| DetectionError::MalformedResponse(e.to_string()))?;

        Ok(parsed
            .annotations
            .into_iter()
            .filter_map(AnnotationPayload::into_annotation)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_conversion() {
        let payload = AnnotationPayload {
            text: "1st".to_string(),
            bounding_box: vec![[10, 20], [40, 20], [40, 35], [10, 35]],
        };

        let annotation = payload.into_annotation().unwrap();
        assert_eq!(annotation.text, "1st");
        assert_eq!(annotation.first_vertex(), Vertex { x: 10, y: 20 });
    }

    #[test]
    fn test_payload_with_wrong_corner_count_is_dropped() {
        let payload = AnnotationPayload {
            text: "broken".to_string(),
            bounding_box: vec![[0, 0], [1, 1]],
        };

        assert!(payload.into_annotation().is_none());
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{
            "annotations": [
                { "text": "2nd", "bounding_box": [[5,5],[25,5],[25,15],[5,15]] },
                { "text": "bad", "bounding_box": [[0,0]] }
            ]
        }"#;

        let parsed: DetectResponse = serde_json::from_str(body).unwrap();
        let annotations: Vec<TextAnnotation> = parsed
            .annotations
            .into_iter()
            .filter_map(AnnotationPayload::into_annotation)
            .collect();

        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].text, "2nd");
    }

    #[test]
    fn test_empty_annotation_list_is_not_an_error() {
        let body = r#"{ "annotations": [] }"#;
        let parsed: DetectResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.annotations.is_empty());
    }
}
