use crate::client::{TlyClient, NO_BODY};
use crate::error::Result;
use crate::http::{HttpMethod, Transport};
use crate::types::{Pixel, PixelCreateRequest, PixelUpdateRequest};

const PIXEL_PATH: &str = "/api/v1/link/pixel";

impl<T: Transport> TlyClient<T> {
    pub fn create_pixel(&self, request: &PixelCreateRequest) -> Result<Pixel> {
        self.send(HttpMethod::Post, PIXEL_PATH, None, Some(request), "pixel")
    }

    pub fn list_pixels(&self) -> Result<Vec<Pixel>> {
        self.send(HttpMethod::Get, PIXEL_PATH, None, NO_BODY, "pixel list")
    }

    pub fn get_pixel(&self, id: i64) -> Result<Pixel> {
        let path = format!("{PIXEL_PATH}/{id}");
        self.send(HttpMethod::Get, &path, None, NO_BODY, "pixel")
    }

    /// Replace the pixel identified by `request.id`.
    pub fn update_pixel(&self, request: &PixelUpdateRequest) -> Result<Pixel> {
        let path = format!("{PIXEL_PATH}/{}", request.id);
        self.send(HttpMethod::Put, &path, None, Some(request), "pixel")
    }

    pub fn delete_pixel(&self, id: i64) -> Result<()> {
        let path = format!("{PIXEL_PATH}/{id}");
        self.send_raw(HttpMethod::Delete, &path, None, NO_BODY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::{client, json_body, respond};

    #[test]
    fn create_pixel_posts_all_fields() {
        let c = client();
        c.transport().push(respond(
            201,
            r#"{"id":4,"name":"GA","pixel_id":"G-1","pixel_type":"googleAnalytics","created_at":"2024-01-01 00:00:00"}"#,
        ));
        let pixel = c
            .create_pixel(&PixelCreateRequest {
                name: "GA".to_string(),
                pixel_id: "G-1".to_string(),
                pixel_type: "googleAnalytics".to_string(),
            })
            .unwrap();
        assert_eq!(pixel.id, 4);
        assert_eq!(pixel.created_at.as_deref(), Some("2024-01-01 00:00:00"));

        let req = c.transport().last_request();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/api/v1/link/pixel");
        assert_eq!(
            json_body(&req),
            json!({"name": "GA", "pixel_id": "G-1", "pixel_type": "googleAnalytics"})
        );
    }

    #[test]
    fn list_pixels_decodes_bare_array() {
        let c = client();
        c.transport().push(respond(
            200,
            r#"[{"id":1,"name":"a","pixel_id":"x","pixel_type":"facebook"},{"id":2,"name":"b","pixel_id":"y","pixel_type":"tiktok"}]"#,
        ));
        let pixels = c.list_pixels().unwrap();
        assert_eq!(pixels.len(), 2);
        assert_eq!(pixels[1].pixel_type, "tiktok");
        assert!(c.transport().last_request().body.is_none());
    }

    #[test]
    fn update_pixel_puts_to_id_path_and_echoes_id() {
        let c = client();
        c.transport().push(respond(200, r#"{"id":9,"name":"renamed"}"#));
        let pixel = c
            .update_pixel(&PixelUpdateRequest {
                id: 9,
                name: "renamed".to_string(),
                pixel_id: "G-1".to_string(),
                pixel_type: "googleAnalytics".to_string(),
            })
            .unwrap();
        assert_eq!(pixel.name, "renamed");

        let req = c.transport().last_request();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:3000/api/v1/link/pixel/9");
        assert_eq!(json_body(&req)["id"], json!(9));
    }

    #[test]
    fn get_and_delete_pixel_address_by_path() {
        let c = client();
        c.transport().push(respond(200, r#"{"id":3}"#));
        assert_eq!(c.get_pixel(3).unwrap().id, 3);
        c.delete_pixel(3).unwrap();

        let requests = c.transport().requests();
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].url, "http://localhost:3000/api/v1/link/pixel/3");
        assert_eq!(requests[1].method, HttpMethod::Delete);
        assert_eq!(requests[1].url, "http://localhost:3000/api/v1/link/pixel/3");
        assert!(requests[1].body.is_none());
    }

    #[test]
    fn delete_pixel_ignores_response_payload() {
        let c = client();
        c.transport().push(respond(200, r#"{"message":"Pixel deleted"}"#));
        assert!(c.delete_pixel(3).is_ok());
    }

    #[test]
    fn missing_pixel_is_not_found() {
        let c = client();
        c.transport().push(respond(404, r#"{"message":"Not Found"}"#));
        let err = c.get_pixel(404).unwrap_err();
        assert!(err.is_not_found());
    }
}
