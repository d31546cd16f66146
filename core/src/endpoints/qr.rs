use crate::client::{TlyClient, NO_BODY};
use crate::error::Result;
use crate::http::{HttpMethod, Query, Transport};
use crate::types::{QrCode, QrCodeRequest, QrCodeUpdateRequest};

const QR_CODE_PATH: &str = "/api/v1/link/qr-code";

impl<T: Transport> TlyClient<T> {
    /// QR code payload exactly as served: image bytes, SVG/EPS text, or a
    /// base64 document depending on `output` and `format`.
    pub fn get_qr_code(&self, request: &QrCodeRequest) -> Result<Vec<u8>> {
        let mut query = Query::new();
        query
            .set("short_url", request.short_url.as_str())
            .set_if_present("output", request.output.as_deref())
            .set_if_present("format", request.format.as_deref());
        self.send_raw(HttpMethod::Get, QR_CODE_PATH, Some(&query), NO_BODY)
    }

    pub fn update_qr_code(&self, request: &QrCodeUpdateRequest) -> Result<QrCode> {
        self.send(HttpMethod::Put, QR_CODE_PATH, None, Some(request), "QR code")
    }
}
