use crate::voucher::{DocumentKind, VoucherDocument};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to encode document: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Renderer failed: {0}")]
    Backend(String),
}

/// A rendered file ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Turns an assembled document into a downloadable file. The PDF engine sits
/// behind this trait.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &VoucherDocument) -> Result<RenderedDocument, RenderError>;
}

/// Renders the document as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl DocumentRenderer for JsonRenderer {
    fn render(&self, document: &VoucherDocument) -> Result<RenderedDocument, RenderError> {
        let bytes = serde_json::to_vec_pretty(document)?;
        Ok(RenderedDocument {
            filename: filename(document, "json"),
            content_type: "application/json".to_string(),
            bytes,
        })
    }
}

/// e.g. `voucher-BS-2025-0077.pdf`
pub fn filename(document: &VoucherDocument, extension: &str) -> String {
    let kind = match document.kind {
        DocumentKind::Voucher => "voucher",
        DocumentKind::Invoice => "invoice",
    };
    let reference: String = document
        .booking_reference
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("{}-{}.{}", kind, reference, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Booking;
    use crate::voucher::DocumentGenerator;
    use serde_json::{json, Value};

    #[test]
    fn test_json_renderer() {
        let booking: Booking = serde_json::from_value(json!({
            "_id": "pk-9",
            "reference": "PK 2025/9",
            "status": "CONFIRMED",
            "travelers": [{ "firstName": "Sara", "lastName": "Khan" }],
            "package": {
                "title": "Baku Getaway",
                "destination": "Azerbaijan",
                "nights": 4,
                "startDate": "2025-12-01",
                "endDate": "2025-12-05"
            },
            "pricing": { "currency": "AED", "fare": { "adult": 250000 } }
        }))
        .unwrap();
        let document = DocumentGenerator::new()
            .generate(DocumentKind::Voucher, &booking)
            .unwrap();

        let rendered = JsonRenderer.render(&document).unwrap();
        assert_eq!(rendered.filename, "voucher-PK_2025_9.json");
        assert_eq!(rendered.content_type, "application/json");

        let body: Value = serde_json::from_slice(&rendered.bytes).unwrap();
        assert_eq!(body["bookingReference"], json!("PK 2025/9"));
        assert_eq!(body["itinerary"][0]["label"], json!("Baku Getaway, Azerbaijan (4 nights)"));
        assert_eq!(body["itinerary"][0]["duration"], json!("96h 0m"));
        assert_eq!(body["total"], json!(250000));
    }
}
