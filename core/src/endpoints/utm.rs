//! UTM presets. The service wraps some of these responses in a `data`
//! envelope and not others, so every read goes through `decode_enveloped`.

use crate::client::{decode_enveloped, TlyClient, NO_BODY};
use crate::error::Result;
use crate::http::{HttpMethod, Transport};
use crate::types::{UtmPreset, UtmPresetRequest};

const UTM_PRESET_PATH: &str = "/api/v1/link/utm-preset";

impl<T: Transport> TlyClient<T> {
    pub fn create_utm_preset(&self, request: &UtmPresetRequest) -> Result<UtmPreset> {
        let bytes = self.send_raw(HttpMethod::Post, UTM_PRESET_PATH, None, Some(request))?;
        decode_enveloped(&bytes, "UTM preset")
    }

    pub fn list_utm_presets(&self) -> Result<Vec<UtmPreset>> {
        let bytes = self.send_raw(HttpMethod::Get, UTM_PRESET_PATH, None, NO_BODY)?;
        decode_enveloped(&bytes, "UTM preset list")
    }

    pub fn get_utm_preset(&self, id: i64) -> Result<UtmPreset> {
        let path = format!("{UTM_PRESET_PATH}/{id}");
        let bytes = self.send_raw(HttpMethod::Get, &path, None, NO_BODY)?;
        decode_enveloped(&bytes, "UTM preset")
    }

    pub fn update_utm_preset(&self, id: i64, request: &UtmPresetRequest) -> Result<UtmPreset> {
        let path = format!("{UTM_PRESET_PATH}/{id}");
        let bytes = self.send_raw(HttpMethod::Put, &path, None, Some(request))?;
        decode_enveloped(&bytes, "UTM preset")
    }

    pub fn delete_utm_preset(&self, id: i64) -> Result<()> {
        let path = format!("{UTM_PRESET_PATH}/{id}");
        self.send_raw(HttpMethod::Delete, &path, None, NO_BODY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ClientError;
    use crate::testing::{client, json_body, respond};

    const PRESET_JSON: &str =
        r#"{"id":1,"name":"newsletter","source":"mail","medium":"email","campaign":"spring","content":null,"term":null}"#;

    #[test]
    fn create_accepts_wrapped_response() {
        let c = client();
        c.transport().push(respond(201, &format!(r#"{{"data":{PRESET_JSON}}}"#)));
        let preset = c
            .create_utm_preset(&UtmPresetRequest {
                name: "newsletter".to_string(),
                source: Some("mail".to_string()),
                medium: Some("email".to_string()),
                campaign: Some("spring".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(preset.id, 1);
        assert_eq!(preset.campaign, "spring");
        assert_eq!(preset.content, "");

        let req = c.transport().last_request();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/api/v1/link/utm-preset");
        assert_eq!(
            json_body(&req),
            json!({"name": "newsletter", "source": "mail", "medium": "email", "campaign": "spring"})
        );
    }

    #[test]
    fn get_accepts_bare_response() {
        let c = client();
        c.transport().push(respond(200, PRESET_JSON));
        let preset = c.get_utm_preset(1).unwrap();
        assert_eq!(preset.name, "newsletter");
        assert_eq!(
            c.transport().last_request().url,
            "http://localhost:3000/api/v1/link/utm-preset/1"
        );
    }

    #[test]
    fn list_accepts_both_envelopes() {
        let c = client();
        c.transport().push(respond(200, &format!("[{PRESET_JSON}]")));
        c.transport().push(respond(200, &format!(r#"{{"data":[{PRESET_JSON},{PRESET_JSON}]}}"#)));
        assert_eq!(c.list_utm_presets().unwrap().len(), 1);
        assert_eq!(c.list_utm_presets().unwrap().len(), 2);
    }

    #[test]
    fn unknown_shape_fails_with_decode_error() {
        let c = client();
        c.transport().push(respond(200, r#"{"foo":1}"#));
        let err = c.update_utm_preset(1, &UtmPresetRequest::default()).unwrap_err();
        assert!(matches!(err, ClientError::Decode { expected: "UTM preset", .. }));
        assert_eq!(c.transport().last_request().method, HttpMethod::Put);
    }

    #[test]
    fn delete_addresses_preset_by_path() {
        let c = client();
        c.delete_utm_preset(12).unwrap();
        let req = c.transport().last_request();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:3000/api/v1/link/utm-preset/12");
        assert!(req.body.is_none());
    }
}
